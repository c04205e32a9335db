use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use url::Url;

use crate::validation;

/// Client configuration loaded from environment variables (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Base endpoint every API request is resolved against. May carry a path prefix.
    pub api_url: Url,
    pub rust_log: String,
    pub storage_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = parse_api_url(&require_env("API_URL")?)?;

        Ok(Config {
            api_url,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            storage_path: std::env::var("DASHBOARD_STORAGE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".dashboard-storage.json")),
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url> {
    validation::parse_http_url(raw)
        .ok_or_else(|| anyhow!("API_URL must be an absolute http(s) URL, got '{raw}'"))
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
