use anyhow::{anyhow, Context, Result};

use crate::affinity::AffinityScale;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Scale new sessions analyse in unless the request overrides it.
    pub default_scale: AffinityScale,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            default_scale: std::env::var("AFFINITY_SCALE")
                .unwrap_or_else(|_| "numeric".to_string())
                .parse::<AffinityScale>()
                .map_err(|e| anyhow!(e))
                .context("AFFINITY_SCALE must be 'numeric' or 'categorical'")?,
            max_upload_bytes: megabytes_to_bytes(
                std::env::var("MAX_UPLOAD_MB")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse::<usize>()
                    .context("MAX_UPLOAD_MB must be a whole number")?,
            )?,
        })
    }
}

fn megabytes_to_bytes(megabytes: usize) -> Result<usize> {
    megabytes
        .checked_mul(1024 * 1024)
        .context("MAX_UPLOAD_MB is too large")
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
