//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `CARD_LOOKUP__<SECTION>__<KEY>` environment variables. Command-line flags
//! are applied on top by the binary.

mod file_config;

pub use file_config::{default_config_path, find_config_file, write_default_config};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::sources::SCRYFALL_API_BASE;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "CARD_LOOKUP";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Card database API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Input handling settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Card database API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the card API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (unset = no timeout)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Custom User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    SCRYFALL_API_BASE.to_string()
}

/// Input handling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last edit before a lookup starts
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum query length (in characters) that triggers a lookup
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
        }
    }
}

impl SearchConfig {
    /// Quiet period as a Duration
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_chars() -> usize {
    2
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when neither RUST_LOG nor -v/-q is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl Config {
    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                self.api.base_url
            )));
        }
        if self.search.min_query_chars == 0 {
            return Err(ConfigError::Invalid(
                "search.min_query_chars must be at least 1".to_string(),
            ));
        }
        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from an optional file plus environment overrides
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
