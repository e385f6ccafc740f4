//! Delivery policies
//!
//! - [`RetryPolicy`]: per-provider retry configuration and backoff timing
//! - [`FallbackCoordinator`]: runs the retry loop against each provider in
//!   declared priority order until one succeeds or all are exhausted

pub mod fallback;
pub mod retry;

pub use fallback::FallbackCoordinator;
pub use retry::RetryPolicy;
