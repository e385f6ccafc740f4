//! Outbound message delivery pipeline
//!
//! This crate accepts message-send requests, queues them, and delivers each
//! through one of several interchangeable backends:
//! - FIFO queue of pending messages, drained by a background loop
//! - Per-provider retry with exponential backoff
//! - Multi-provider fallback in declared priority order
//! - Fixed-window rate limiting across all delivery attempts
//! - Status tracking observable by the submitting caller
//!
//! Delivery backends are consumed through the [`Provider`] trait; the
//! pipeline never constructs them itself. All state is in memory.

pub mod config;
pub mod logging;
pub mod policy;
pub mod provider;
pub mod queue;
pub mod rate_limit;
pub mod service;
pub mod status;
pub mod types;

mod error;
mod pipeline;

pub use tracing;

pub use config::PipelineConfig;
pub use error::{PipelineError, ProviderError};
pub use pipeline::DeliveryPipeline;
pub use policy::{FallbackCoordinator, RetryPolicy};
pub use provider::{Provider, SendOutcome};
pub use queue::DeliveryQueue;
pub use rate_limit::{RateLimitConfig, RateLimiter};
pub use service::DeliveryService;
pub use status::StatusTracker;
pub use types::{DeliveryStatus, Message, MessageId};

/// Process-level control signal broadcast to background tasks
#[derive(Debug, Clone, Copy)]
pub enum Signal {
    /// Stop draining; in-flight work completes before exit
    Shutdown,
}
