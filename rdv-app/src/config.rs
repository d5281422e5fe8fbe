//! Configuration loading from environment.

use std::env;
use std::time::Duration;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub api_key: String,
    pub rate_limit_per_minute: u32,
    pub export_ttl: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let api_key = env::var("RDV_API_KEY")
            .map_err(|_| anyhow::anyhow!("RDV_API_KEY environment variable is required"))?;

        let rate_limit_per_minute = env::var("RDV_RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()?;

        let export_ttl_secs: u64 = env::var("RDV_EXPORT_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()?;

        Ok(Self {
            port,
            api_key,
            rate_limit_per_minute,
            export_ttl: Duration::from_secs(export_ttl_secs),
        })
    }
}
