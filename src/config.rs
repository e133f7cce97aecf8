use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::store::limits;

pub const DEFAULT_API_URL: &str = "https://app.base44.com/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    /// Hosted application id; without it the sample store is used
    pub app_id: Option<String>,
    pub api_key: Option<String>,
    pub http_timeout: Duration,
    pub catalog_limit: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            api_url: non_empty("LINE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            app_id: non_empty("LINE_APP_ID"),
            api_key: non_empty("LINE_API_KEY"),
            http_timeout: Duration::from_secs(
                non_empty("LINE_HTTP_TIMEOUT_SECS")
                    .map(|raw| raw.parse())
                    .transpose()
                    .context("LINE_HTTP_TIMEOUT_SECS must be a whole number of seconds")?
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            catalog_limit: non_empty("LINE_CATALOG_LIMIT")
                .map(|raw| raw.parse())
                .transpose()
                .context("LINE_CATALOG_LIMIT must be a valid number")?
                .unwrap_or(limits::CATALOG),
        })
    }

    /// Whether a hosted store is configured
    pub fn uses_hosted_store(&self) -> bool {
        self.app_id.is_some()
    }
}
