//! Dashboard configuration: TOML parsing, defaults, and validation.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! dashboard pointed at a price service on `http://127.0.0.1:8000` offering
//! AAPL, GOOGL and MSFT. The service URL can also be overridden through the
//! `PRICE_DASHBOARD_URL` environment variable.
//!
//! ```toml
//! base_url = "http://prices.internal:8000"
//! request_timeout_secs = 10
//!
//! [[assets]]
//! symbol = "BTC-USD"
//! name = "Bitcoin"
//! type = "crypto"
//! ```

use std::{collections::HashSet, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use shared_utils::env::env_override;
use thiserror::Error;

use crate::models::{
    asset::{default_assets, Asset},
    request_params::{MAX_LOOKBACK_DAYS, TRAILING_YEAR_DAYS},
};

/// Environment variable that overrides [`DashboardConfig::base_url`].
pub const BASE_URL_ENV: &str = "PRICE_DASHBOARD_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Root URL of the price service; requests go to `{base_url}/stocks/`.
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Length of the trailing window, in calendar days.
    pub lookback_days: i64,
    pub assets: Vec<Asset>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 30,
            lookback_days: TRAILING_YEAR_DAYS,
            assets: default_assets(),
        }
    }
}

impl DashboardConfig {
    /// Parses and validates a config from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Applies `PRICE_DASHBOARD_URL` when it is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = env_override(BASE_URL_ENV) {
            self.base_url = url;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be > 0".into()));
        }
        if !(1..=MAX_LOOKBACK_DAYS).contains(&self.lookback_days) {
            return Err(ConfigError::Invalid(format!(
                "lookback_days must be between 1 and {MAX_LOOKBACK_DAYS}"
            )));
        }
        if self.assets.is_empty() {
            return Err(ConfigError::Invalid("at least one asset must be configured".into()));
        }

        let mut seen = HashSet::new();
        for asset in &self.assets {
            let symbol = asset.symbol.trim();
            if symbol.is_empty() {
                return Err(ConfigError::Invalid("asset symbol cannot be empty".into()));
            }
            if !seen.insert(symbol) {
                return Err(ConfigError::Invalid(format!("duplicate asset symbol: {symbol}")));
            }
        }
        Ok(())
    }
}
