use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a development default; nothing is required to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Shared secret for the admin surface, checked by the HTTP layer.
    pub admin_token: String,
    /// Public base URL embedded in confirmation and referral links.
    pub app_base_url: String,
    pub data_path: PathBuf,
    pub email_from: Option<String>,
    pub resend_api_key: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            port,
            admin_token: std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| "change-me".to_string()),
            app_base_url: std::env::var("APP_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
            data_path: std::env::var("DATA_PATH")
                .unwrap_or_else(|_| "data/store.json".to_string())
                .into(),
            email_from: optional_env("EMAIL_FROM"),
            resend_api_key: optional_env("RESEND_API_KEY"),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
