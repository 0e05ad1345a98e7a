use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "https://api.mercadolibre.com";
pub const DEFAULT_SITE_ID: &str = "MLB";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub site_id: String,
    pub user_agent: String,
    /// No timeout when unset; a hung upstream blocks that query.
    pub timeout_seconds: Option<u64>,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            site_id: DEFAULT_SITE_ID.to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) DashML/0.1".to_string(),
            timeout_seconds: None,
            max_retries: 0,
            retry_base_delay_ms: 500,
            currency_symbol: "R$".to_string(),
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base must not be empty".into()));
        }
        if self.site_id.trim().is_empty() {
            return Err(ConfigError::Invalid("site_id must not be empty".into()));
        }
        if self.timeout_seconds == Some(0) {
            return Err(ConfigError::Invalid("timeout_seconds must be positive".into()));
        }
        Ok(())
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    let config: AppConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_or_default(path: &str) -> Result<AppConfig, ConfigError> {
    match load_config(path) {
        Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
            warn!("Config {} not found, using defaults", path);
            Ok(AppConfig::default())
        }
        other => other,
    }
}
