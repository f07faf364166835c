//! Admin sessions backed by a single shared credential.
//!
//! Login exchanges the configured username/password for an opaque bearer
//! token; logout revokes it. Tokens live only as long as the process.

use anyhow::anyhow;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Clone)]
pub struct SessionService {
    username: String,
    password: String,
    tokens: Arc<RwLock<HashSet<Uuid>>>,
}

impl SessionService {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            tokens: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Uuid, AppError> {
        if username != self.username || password != self.password {
            tracing::warn!("admin login rejected");
            return Err(AppError::Unauthorized("invalid credentials".to_string()));
        }

        let token = Uuid::new_v4();
        self.tokens
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .insert(token);

        tracing::info!("admin session opened");
        Ok(token)
    }

    /// Revoking an already-revoked token is a no-op.
    pub fn logout(&self, token: &Uuid) -> Result<(), AppError> {
        self.tokens
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .remove(token);

        tracing::info!("admin session closed");
        Ok(())
    }

    pub fn is_valid(&self, token: &Uuid) -> bool {
        self.tokens
            .read()
            .map(|tokens| tokens.contains(token))
            .unwrap_or(false)
    }
}
