//! Core types for the delivery pipeline

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier assigned to a message on submission
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(ulid::Ulid);

impl MessageId {
    /// Generate a fresh unique identifier
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An outbound message awaiting delivery.
///
/// Created on submission and never mutated afterwards; ownership moves from
/// the queue to the in-flight delivery routine on dequeue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Identifier used to track delivery status
    pub id: MessageId,
    /// Recipient address
    pub recipient: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub body: String,
}

impl Message {
    /// Build a new message with a freshly generated id
    #[must_use]
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Last known delivery status for a message.
///
/// `Pending` and `Retrying` are transient; `Success` and `Failed` are
/// terminal and no further transition is recorded after either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// Queued, no attempt resolved yet
    Pending,
    /// At least one attempt failed, another is scheduled
    Retrying,
    /// A provider accepted the message
    Success,
    /// All providers exhausted, or delivery denied by rate limiting
    Failed,
}

impl DeliveryStatus {
    /// Whether this status ends the message's lifecycle
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::Retrying => "Retrying",
            Self::Success => "Success",
            Self::Failed => "Failed",
        })
    }
}
