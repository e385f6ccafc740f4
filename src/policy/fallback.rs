//! Provider fallback coordination
//!
//! Runs the per-provider retry loop against each provider in declared
//! priority order. The first provider to accept the message wins and later
//! providers are never consulted; a provider whose retries are exhausted
//! advances the sequence to the next one. A rate-limit denial ends the
//! delivery outright: the terminal `Failed` status is recorded immediately,
//! and the window that denied this attempt would deny the remaining
//! providers as well.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    policy::retry::RetryPolicy,
    provider::{Provider, SendOutcome},
    rate_limit::RateLimiter,
    status::StatusTracker,
    types::{DeliveryStatus, Message},
};

/// Result of one per-provider retry cycle
enum AttemptOutcome {
    /// The provider accepted the message
    Delivered,
    /// All attempts against this provider failed
    Exhausted,
    /// The rate limiter denied an attempt; no further provider may run
    RateLimited,
}

/// Drives retry, backoff, and provider fallback for a single message at a
/// time, recording status transitions as a side effect.
pub struct FallbackCoordinator {
    retry: RetryPolicy,
    rate_limiter: Arc<RateLimiter>,
    tracker: StatusTracker,
}

impl FallbackCoordinator {
    /// Create a coordinator sharing the pipeline's limiter and tracker
    #[must_use]
    pub const fn new(
        retry: RetryPolicy,
        rate_limiter: Arc<RateLimiter>,
        tracker: StatusTracker,
    ) -> Self {
        Self {
            retry,
            rate_limiter,
            tracker,
        }
    }

    /// Deliver `message` through the first provider in `providers` that
    /// accepts it, returning the terminal status recorded for the message.
    pub async fn deliver(
        &self,
        providers: &[Arc<dyn Provider>],
        message: &Message,
    ) -> DeliveryStatus {
        for (index, provider) in providers.iter().enumerate() {
            match self.attempt(provider.as_ref(), message).await {
                AttemptOutcome::Delivered => return DeliveryStatus::Success,
                AttemptOutcome::RateLimited => {
                    self.tracker.set_status(message.id, DeliveryStatus::Failed);
                    return DeliveryStatus::Failed;
                }
                AttemptOutcome::Exhausted => {
                    if let Some(next) = providers.get(index + 1) {
                        info!(
                            message_id = %message.id,
                            from = provider.name(),
                            to = next.name(),
                            "Provider exhausted, falling back"
                        );
                    }
                }
            }
        }

        self.tracker.set_status(message.id, DeliveryStatus::Failed);
        DeliveryStatus::Failed
    }

    /// Run the bounded retry loop against a single provider.
    ///
    /// Exhaustion does not record a terminal status; the caller decides
    /// whether another provider gets a turn.
    async fn attempt(&self, provider: &dyn Provider, message: &Message) -> AttemptOutcome {
        let mut attempt = 1u32;

        loop {
            if !self.rate_limiter.try_acquire() {
                warn!(
                    message_id = %message.id,
                    provider = provider.name(),
                    "Rate limit exceeded, abandoning delivery"
                );
                return AttemptOutcome::RateLimited;
            }

            debug!(
                message_id = %message.id,
                provider = provider.name(),
                attempt,
                "Attempting delivery"
            );

            match provider.send(message).await {
                Ok(SendOutcome::Delivered) => {
                    self.tracker.set_status(message.id, DeliveryStatus::Success);
                    info!(
                        message_id = %message.id,
                        provider = provider.name(),
                        attempt,
                        "Message delivered"
                    );
                    return AttemptOutcome::Delivered;
                }
                Ok(SendOutcome::Rejected) => {
                    debug!(
                        message_id = %message.id,
                        provider = provider.name(),
                        attempt,
                        "Provider rejected message"
                    );
                }
                // Transport faults fold into the same retry path as a rejection
                Err(error) => {
                    warn!(
                        message_id = %message.id,
                        provider = provider.name(),
                        attempt,
                        %error,
                        "Provider transport fault"
                    );
                }
            }

            if !self.retry.should_retry(attempt) {
                warn!(
                    message_id = %message.id,
                    provider = provider.name(),
                    attempts = attempt,
                    "Retries exhausted for provider"
                );
                return AttemptOutcome::Exhausted;
            }

            self.tracker.set_status(message.id, DeliveryStatus::Retrying);
            let delay = self.retry.backoff_delay(attempt);
            debug!(
                message_id = %message.id,
                provider = provider.name(),
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Backing off before retry"
            );
            tokio::time::sleep(delay).await;

            attempt += 1;
        }
    }
}
