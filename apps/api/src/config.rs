use anyhow::{Context, Result};

use crate::embedding_client::DEFAULT_EMBEDDING_URL;

/// Application configuration loaded from environment variables.
/// Only `PORT` and `EMBEDDING_TIMEOUT_SECS` can fail, and only when malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the embedding endpoint. `None` disables semantic matching.
    pub hf_api_key: Option<String>,
    pub embedding_url: String,
    pub embedding_timeout_secs: u64,
    /// When unset the service keeps its state in memory.
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            hf_api_key: optional_env("HF_API_KEY"),
            embedding_url: optional_env("EMBEDDING_API_URL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_URL.to_string()),
            embedding_timeout_secs: std::env::var("EMBEDDING_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("EMBEDDING_TIMEOUT_SECS must be a whole number of seconds")?,
            redis_url: optional_env("REDIS_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
