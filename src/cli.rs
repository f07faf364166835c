use clap::{Parser, Subcommand};

use crate::catalog::Catalog;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "preorder-core")]
#[command(about = "Dinner preorder service - order lifecycle and live admin feed", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Validate configuration and print the effective values
    Config,

    /// Print the configured menu
    Menu,
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Validating configuration...");

    config.validate()?;

    println!("Configuration:");
    println!("  Server Port: {}", config.server_port);
    println!("  Admin Username: {}", config.admin_username);
    println!("  Admin Password: ****");
    println!(
        "  UPI Payee: {} ({})",
        mask_payee(&config.upi_payee_id),
        config.upi_payee_name
    );
    println!("  Feed Heartbeat: {}s", config.feed_heartbeat_secs);

    tracing::info!("Configuration is valid");
    println!("✓ Configuration is valid");

    Ok(())
}

pub fn handle_menu(catalog: &Catalog) {
    println!("{:<4} {:<30} {:>8}", "ID", "Dish", "Price");
    println!("{}", "-".repeat(44));

    for dish in catalog.dishes() {
        println!("{:<4} {:<30} {:>8}", dish.id, dish.name, format!("₹{}", dish.price));
    }
}

fn mask_payee(payee_id: &str) -> String {
    match payee_id.split_once('@') {
        Some((user, bank)) => {
            let visible: String = user.chars().take(2).collect();
            format!("{}***@{}", visible, bank)
        }
        None => "***".to_string(),
    }
}
