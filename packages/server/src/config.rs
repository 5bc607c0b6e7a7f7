use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Symmetric signing secret, fixed for the process lifetime. Rotating
    /// it invalidates every outstanding token.
    pub jwt_secret: String,
    pub port: u16,
    pub bootstrap_admin_username: String,
    pub bootstrap_admin_password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            bootstrap_admin_username: env::var("BOOTSTRAP_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            bootstrap_admin_password: env::var("BOOTSTRAP_ADMIN_PASSWORD")
                .context("BOOTSTRAP_ADMIN_PASSWORD must be set")?,
        })
    }
}
