//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section is
//! optional; missing values fall back to the public API endpoints.

use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::defined::{DefinedConfig, DEFINED_BASE_URL};
use crate::adapters::dexscreener::{DexScreenerConfig, DEXSCREENER_BASE_URL};
use crate::ports::{CredentialProvider, EnvCredentials, StaticCredentials, DEFINED_API_KEY_ENV};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dexscreener: DexScreenerSection,
    #[serde(default)]
    pub defined: DefinedSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// DexScreener API section
#[derive(Debug, Clone, Deserialize)]
pub struct DexScreenerSection {
    #[serde(default = "default_dexscreener_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DexScreenerSection {
    fn default() -> Self {
        Self {
            api_url: default_dexscreener_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Defined.fi API section
#[derive(Debug, Clone, Deserialize)]
pub struct DefinedSection {
    #[serde(default = "default_defined_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Environment variable the API key is read from
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Inline API key, takes precedence over `api_key_env` (keep it out of git)
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for DefinedSection {
    fn default() -> Self {
        Self {
            api_url: default_defined_url(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
            api_key: None,
        }
    }
}

impl DefinedSection {
    /// Credential source for the Defined client.
    /// A non-empty inline key wins, otherwise the key is read from `api_key_env` per call.
    pub fn credentials(&self) -> Arc<dyn CredentialProvider> {
        match self.api_key.as_deref().filter(|key| !key.trim().is_empty()) {
            Some(key) => Arc::new(StaticCredentials::new(key)),
            None => Arc::new(EnvCredentials::new(self.api_key_env.clone())),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_dexscreener_url() -> String {
    DEXSCREENER_BASE_URL.to_string()
}

fn default_defined_url() -> String {
    DEFINED_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_api_key_env() -> String {
    DEFINED_API_KEY_ENV.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file, then apply environment overrides
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Defaults plus environment overrides, for callers without a config file
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// `DEXSCREENER_API_URL` and `DEFINED_API_URL` replace the configured URLs
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = env_non_empty("DEXSCREENER_API_URL") {
            self.dexscreener.api_url = url;
        }
        if let Some(url) = env_non_empty("DEFINED_API_URL") {
            self.defined.api_url = url;
        }
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("dexscreener.api_url", &self.dexscreener.api_url)?;
        validate_url("defined.api_url", &self.defined.api_url)?;

        if self.dexscreener.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "dexscreener.timeout_secs must be > 0".to_string(),
            ));
        }

        if self.defined.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "defined.timeout_secs must be > 0".to_string(),
            ));
        }

        if self.defined.api_key_env.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "defined.api_key_env cannot be empty".to_string(),
            ));
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.logging.level
            )));
        }

        Ok(())
    }
}

fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(ConfigError::ValidationError(format!("{} cannot be empty", field)));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "{} must start with http:// or https://, got '{}'",
            field, url
        )));
    }
    Ok(())
}

fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

impl From<&DexScreenerSection> for DexScreenerConfig {
    fn from(section: &DexScreenerSection) -> Self {
        DexScreenerConfig {
            api_url: section.api_url.clone(),
            timeout: Duration::from_secs(section.timeout_secs),
        }
    }
}

impl From<&DefinedSection> for DefinedConfig {
    fn from(section: &DefinedSection) -> Self {
        DefinedConfig {
            api_url: section.api_url.clone(),
            timeout: Duration::from_secs(section.timeout_secs),
        }
    }
}
