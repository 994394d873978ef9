use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub nats_url: String,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
    pub push_api_url: String,
    pub push_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            nats_url: env::var("NATS_URL")
                .unwrap_or_else(|_| "nats://localhost:4222".to_string()),
            mail_api_url: env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.upply-mail.com/v1/send".to_string()),
            mail_api_key: env::var("MAIL_API_KEY")
                .context("MAIL_API_KEY must be set")?,
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@upply.com".to_string()),
            push_api_url: env::var("PUSH_API_URL")
                .unwrap_or_else(|_| "https://fcm.googleapis.com/v1/messages:send".to_string()),
            push_api_key: env::var("PUSH_API_KEY").ok(),
        })
    }
}
