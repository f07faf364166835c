use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: u16,
    pub admin_username: String,
    pub admin_password: String,
    pub upi_payee_id: String,
    pub upi_payee_name: String,
    pub feed_heartbeat_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD")?,
            upi_payee_id: env::var("UPI_PAYEE_ID")?,
            upi_payee_name: env::var("UPI_PAYEE_NAME")
                .unwrap_or_else(|_| "RFC Dinner".to_string()),
            feed_heartbeat_secs: env::var("FEED_HEARTBEAT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            anyhow::bail!("SERVER_PORT must be greater than 0");
        }
        if self.admin_username.trim().is_empty() {
            anyhow::bail!("ADMIN_USERNAME is empty");
        }
        if self.admin_password.trim().is_empty() {
            anyhow::bail!("ADMIN_PASSWORD is empty");
        }
        if !self.upi_payee_id.contains('@') {
            anyhow::bail!("UPI_PAYEE_ID must look like name@bank");
        }
        if self.feed_heartbeat_secs == 0 {
            anyhow::bail!("FEED_HEARTBEAT_SECS must be greater than 0");
        }

        Ok(())
    }

    pub fn feed_heartbeat(&self) -> Duration {
        Duration::from_secs(self.feed_heartbeat_secs)
    }
}
