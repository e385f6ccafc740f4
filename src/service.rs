//! Service trait abstraction over the pipeline's submission surface
//!
//! Decouples thin request handlers (HTTP endpoints, control sockets) from
//! the concrete [`DeliveryPipeline`] so they can be tested against a mock.

use crate::{
    pipeline::DeliveryPipeline,
    types::{DeliveryStatus, MessageId},
};

/// Submission and status-query surface consumed by request handlers.
pub trait DeliveryService: Send + Sync {
    /// Submit a message for delivery.
    ///
    /// Returns the assigned id and the status at call time; the return value
    /// does not reflect the eventual outcome. Must not block on delivery.
    fn submit(&self, recipient: &str, subject: &str, body: &str) -> (MessageId, DeliveryStatus);

    /// Current status for a message.
    ///
    /// Returns `None` if the id was never recorded.
    fn status(&self, id: &MessageId) -> Option<DeliveryStatus>;

    /// Number of messages awaiting processing
    fn queue_len(&self) -> usize;
}

impl DeliveryService for DeliveryPipeline {
    fn submit(&self, recipient: &str, subject: &str, body: &str) -> (MessageId, DeliveryStatus) {
        Self::submit(self, recipient, subject, body)
    }

    fn status(&self, id: &MessageId) -> Option<DeliveryStatus> {
        Self::status(self, id)
    }

    fn queue_len(&self) -> usize {
        Self::queue_len(self)
    }
}
