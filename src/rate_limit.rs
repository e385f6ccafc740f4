//! Fixed-window rate limiting for delivery attempts
//!
//! Counts every delivery attempt in the current window and denies attempts
//! once the threshold is exceeded. The counter increments on denials too, so
//! it reflects total attempt pressure rather than admitted attempts only. A
//! fixed window is sufficient for low-volume transactional traffic; this is
//! deliberately not a sliding-window or token-bucket limiter.
//!
//! The window reset is driven externally: the pipeline runs a periodic timer
//! that calls [`RateLimiter::reset`] once per window.

use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for rate limiting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum delivery attempts admitted per window
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    /// Window duration in seconds (minimum 1)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            window_secs: default_window_secs(),
        }
    }
}

const fn default_threshold() -> u32 {
    10
}

const fn default_window_secs() -> u64 {
    60 // 1 minute
}

/// Fixed-window attempt counter shared by every delivery attempt
#[derive(Debug)]
pub struct RateLimiter {
    threshold: u32,
    window: Duration,
    attempts: Mutex<u32>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    ///
    /// A zero window is clamped to one second; the reset timer cannot run on
    /// a zero period.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            threshold: config.threshold,
            window: Duration::from_secs(config.window_secs.max(1)),
            attempts: Mutex::new(0),
        }
    }

    /// Record an attempt and check whether it is admitted.
    ///
    /// Returns `true` if the post-increment counter is within the threshold.
    /// The counter increments even when the attempt is denied.
    pub fn try_acquire(&self) -> bool {
        let mut attempts = self.attempts.lock();
        *attempts = attempts.saturating_add(1);
        let allowed = *attempts <= self.threshold;

        if !allowed {
            debug!(
                attempts = *attempts,
                threshold = self.threshold,
                "Rate limit exceeded"
            );
        }

        allowed
    }

    /// Reset the window counter to zero.
    ///
    /// Called once per window by the pipeline's reset timer; the sole state
    /// mutation not tied to an attempt.
    pub fn reset(&self) {
        *self.attempts.lock() = 0;
        debug!("Rate limit window reset");
    }

    /// The configured window duration, used to drive the reset timer
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Attempts recorded in the current window (for monitoring/debugging)
    pub fn attempts(&self) -> u32 {
        *self.attempts.lock()
    }
}
