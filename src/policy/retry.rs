//! Retry policy for delivery attempts.
//!
//! Encapsulates retry configuration and backoff timing so the behavior can
//! be tested independently of the coordinator that executes the loop.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retry configuration applied per provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum send attempts per provider before falling back.
    ///
    /// A maximum of 1 disables retries entirely.
    ///
    /// Default: 3 attempts
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Base unit for exponential backoff (in milliseconds).
    ///
    /// The wait before the attempt following attempt `n` is
    /// `unit * 2^n`, so delays grow 2, 4, 8, … units.
    ///
    /// Default: 1000 ms (1 second)
    #[serde(default = "defaults::backoff_unit_ms")]
    pub backoff_unit_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: defaults::max_attempts(),
            backoff_unit_ms: defaults::backoff_unit_ms(),
        }
    }
}

impl RetryPolicy {
    /// Check if another attempt should follow attempt number `attempt`
    /// (1-indexed).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Backoff duration inserted after failed attempt number `attempt`
    /// (1-indexed): `unit * 2^attempt`, saturating on overflow.
    #[must_use]
    pub const fn backoff_delay(&self, attempt: u32) -> Duration {
        let millis = if attempt >= 63 {
            u64::MAX
        } else {
            self.backoff_unit_ms.saturating_mul(1u64 << attempt)
        };
        Duration::from_millis(millis)
    }
}

mod defaults {
    pub(super) const fn max_attempts() -> u32 {
        3
    }

    pub(super) const fn backoff_unit_ms() -> u64 {
        1000 // 1 second
    }
}
