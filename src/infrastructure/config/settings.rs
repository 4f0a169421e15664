//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all tunable
//! parameters of the core: the cache TTL table, the dedup guard, retry
//! backoff and logging. Everything is fixed once loaded.
//!
//! # Example
//!
//! ```no_run
//! use pitwall::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::application::cache::CacheConfig;
use crate::application::dedup::DedupConfig;
use crate::application::retry::RetryConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; omitted sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Namespace TTL table for the freshness cache.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Delivery dedup capacity and eviction policy.
    #[serde(default)]
    pub dedup: DedupConfig,

    /// Backoff for rate-limited outbound setup calls.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        self.cache.validate()?;
        self.dedup.validate()?;
        self.retry.validate()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
