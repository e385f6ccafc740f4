//! Pipeline configuration
//!
//! All settings carry serde defaults so a partial (or empty) TOML document
//! yields a fully usable configuration.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::{policy::retry::RetryPolicy, rate_limit::RateLimitConfig};

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the delivery pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Per-provider retry behavior
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Attempt rate limiting across all providers
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// How long the drain loop idles when the queue is empty (in
    /// milliseconds)
    ///
    /// Default: 1000 ms (1 second)
    #[serde(default = "default_idle_poll_ms")]
    pub idle_poll_ms: u64,

    /// Maximum number of terminal statuses retained for polling (minimum 1).
    ///
    /// The oldest terminal entries are evicted beyond this bound;
    /// unresolved messages are never evicted.
    ///
    /// Default: 1024
    #[serde(default = "default_status_capacity")]
    pub status_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            rate_limit: RateLimitConfig::default(),
            idle_poll_ms: default_idle_poll_ms(),
            status_capacity: default_status_capacity(),
        }
    }
}

const fn default_idle_poll_ms() -> u64 {
    1000 // 1 second
}

const fn default_status_capacity() -> usize {
    1024
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }
}
