//! Top-level delivery pipeline
//!
//! Owns the queue, status tracker, rate limiter, and provider list, and runs
//! the continuous drain loop that resolves one message at a time.

use std::{sync::Arc, time::Duration};

use tokio::sync::broadcast;
use tracing::info;

use crate::{
    Signal, internal,
    config::PipelineConfig,
    error::PipelineError,
    policy::fallback::FallbackCoordinator,
    provider::Provider,
    queue::DeliveryQueue,
    rate_limit::RateLimiter,
    status::StatusTracker,
    types::{DeliveryStatus, Message, MessageId},
};

/// Pipeline bridging external submission to background delivery.
///
/// Submission and the drain loop run concurrently: `submit` only touches the
/// queue tail and the status map, never the in-flight message. Processing is
/// strictly sequential, one message fully resolved (through all providers
/// and all retries) before the next is dequeued.
pub struct DeliveryPipeline {
    providers: Vec<Arc<dyn Provider>>,
    queue: DeliveryQueue,
    tracker: StatusTracker,
    rate_limiter: Arc<RateLimiter>,
    coordinator: FallbackCoordinator,
    idle_poll: Duration,
}

impl DeliveryPipeline {
    /// Build a pipeline delivering through `providers` in declared priority
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoProviders`] if the provider list is empty.
    pub fn new(
        config: PipelineConfig,
        providers: Vec<Arc<dyn Provider>>,
    ) -> Result<Self, PipelineError> {
        if providers.is_empty() {
            return Err(PipelineError::NoProviders);
        }

        let tracker = StatusTracker::new(config.status_capacity);
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit));
        let coordinator = FallbackCoordinator::new(
            config.retry,
            Arc::clone(&rate_limiter),
            tracker.clone(),
        );

        Ok(Self {
            providers,
            queue: DeliveryQueue::new(),
            tracker,
            rate_limiter,
            coordinator,
            idle_poll: Duration::from_millis(config.idle_poll_ms),
        })
    }

    /// Submit a message for delivery.
    ///
    /// Records an initial `Pending` status, enqueues the message, and returns
    /// its id along with the status at call time. Never blocks on delivery;
    /// callers poll [`status`](Self::status) to observe completion.
    pub fn submit(
        &self,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> (MessageId, DeliveryStatus) {
        let message = Message::new(recipient, subject, body);
        let id = message.id;

        self.tracker.set_status(id, DeliveryStatus::Pending);
        self.queue.enqueue(message);
        info!(message_id = %id, "Message added to queue");

        let status = self.tracker.get(&id).unwrap_or(DeliveryStatus::Pending);
        (id, status)
    }

    /// Current status for a message, `None` if the id was never recorded
    pub fn status(&self, id: &MessageId) -> Option<DeliveryStatus> {
        self.tracker.get(id)
    }

    /// Number of messages awaiting processing
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Run the delivery pipeline until a shutdown signal is received.
    ///
    /// Drains the queue continuously: one message is dequeued and fully
    /// resolved at a time, and the loop idles briefly whenever the queue is
    /// empty. The rate-limit window reset runs on an independent timer task
    /// for the lifetime of this call. On shutdown the in-flight message
    /// completes before the loop exits.
    ///
    /// # Errors
    ///
    /// Currently infallible at runtime; the `Result` covers future fatal
    /// conditions and keeps the signature stable for embedders.
    pub async fn serve(
        &self,
        mut shutdown: broadcast::Receiver<Signal>,
    ) -> Result<(), PipelineError> {
        internal!("Delivery pipeline starting");

        let reset_timer = self.spawn_reset_timer(shutdown.resubscribe());

        loop {
            if let Some(message) = self.queue.dequeue() {
                self.process(message).await;

                // Check for shutdown between messages without blocking the drain
                match shutdown.try_recv() {
                    Ok(Signal::Shutdown) | Err(broadcast::error::TryRecvError::Closed) => break,
                    Err(
                        broadcast::error::TryRecvError::Empty
                        | broadcast::error::TryRecvError::Lagged(_),
                    ) => {}
                }
            } else {
                tokio::select! {
                    () = tokio::time::sleep(self.idle_poll) => {}
                    _ = shutdown.recv() => break,
                }
            }
        }

        // The reset task watches its own shutdown receiver
        let _ = reset_timer.await;

        internal!("Delivery pipeline shutdown complete");
        Ok(())
    }

    /// Resolve a single message through the provider fallback sequence
    async fn process(&self, message: Message) {
        info!(
            message_id = %message.id,
            recipient = %message.recipient,
            "Processing message"
        );

        let status = self.coordinator.deliver(&self.providers, &message).await;

        info!(
            message_id = %message.id,
            %status,
            "Message processing completed"
        );
    }

    /// Spawn the periodic rate-limit window reset, independent of the drain
    /// loop so long backoffs cannot stall it
    fn spawn_reset_timer(
        &self,
        mut shutdown: broadcast::Receiver<Signal>,
    ) -> tokio::task::JoinHandle<()> {
        let limiter = Arc::clone(&self.rate_limiter);

        tokio::spawn(async move {
            let mut timer = tokio::time::interval(limiter.window());
            // Skip the first tick to avoid an immediate reset
            timer.tick().await;

            loop {
                tokio::select! {
                    _ = timer.tick() => limiter.reset(),
                    _ = shutdown.recv() => break,
                }
            }
        })
    }
}
