//! FIFO queue of messages awaiting delivery

use std::{collections::VecDeque, sync::Arc};

use parking_lot::Mutex;

use crate::types::Message;

/// Unbounded FIFO queue of pending messages.
///
/// Submission pushes the tail, the drain loop pops the head; FIFO ordering is
/// the only guarantee. Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct DeliveryQueue {
    entries: Arc<Mutex<VecDeque<Message>>>,
}

impl DeliveryQueue {
    /// Create a new empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the tail of the queue
    pub fn enqueue(&self, message: Message) {
        self.entries.lock().push_back(message);
    }

    /// Remove and return the head of the queue.
    ///
    /// Returns `None` immediately when nothing is pending; an empty queue is
    /// not an error.
    pub fn dequeue(&self) -> Option<Message> {
        self.entries.lock().pop_front()
    }

    /// Number of messages awaiting processing (for the control interface)
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
