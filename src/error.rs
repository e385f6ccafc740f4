//! Typed error handling for the delivery pipeline.
//!
//! Provider transport faults are recovered locally: they fold into the
//! retry/backoff flow and are never surfaced to the submitting caller.

use thiserror::Error;

/// Transport-level fault raised by a provider while attempting a send.
///
/// Distinct from an explicit rejection (`SendOutcome::Rejected`), though the
/// retry loop treats both identically.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Failed to reach the provider at all.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The provider did not respond in time.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The provider reported itself unavailable.
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by pipeline construction and configuration.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The pipeline was built with an empty provider list.
    #[error("No delivery providers configured")]
    NoProviders,

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
