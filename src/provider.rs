//! Delivery provider capability
//!
//! A provider is an external backend able to attempt delivery of one message
//! and report the outcome. The pipeline consumes providers as trait objects
//! and treats an explicit rejection and a transport fault identically.

use async_trait::async_trait;

use crate::{error::ProviderError, types::Message};

/// Outcome of a single provider send attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The provider accepted the message
    Delivered,
    /// The provider declined the message
    Rejected,
}

/// An external delivery backend.
///
/// Implementations are supplied by the embedding application in priority
/// order; the pipeline never constructs providers itself.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Name used in logs to identify this provider
    fn name(&self) -> &str;

    /// Attempt to deliver one message.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on a transport-level fault. The pipeline
    /// folds faults into the same retry flow as an explicit rejection.
    async fn send(&self, message: &Message) -> Result<SendOutcome, ProviderError>;
}
