//! Delivery status tracking
//!
//! Maps message ids to their last known delivery status. Transitions are
//! validated: once a terminal status (`Success` or `Failed`) is recorded for
//! an id, no further writes are accepted, and `Pending` is only legal as the
//! initial status. Rejected writes are logged rather than applied.

use std::{collections::VecDeque, sync::Arc};

use dashmap::{DashMap, mapref::entry::Entry};
use parking_lot::Mutex;
use tracing::warn;

use crate::types::{DeliveryStatus, MessageId};

const DEFAULT_CAPACITY: usize = 1024;

/// Tracks the current delivery status of every submitted message.
///
/// Terminal entries are retained up to a capacity bound so callers can poll
/// outcomes; the oldest terminal entries are evicted beyond that. Entries for
/// unresolved messages are never evicted. Cloning yields another handle to
/// the same map.
#[derive(Debug, Clone)]
pub struct StatusTracker {
    statuses: Arc<DashMap<MessageId, DeliveryStatus>>,
    /// Terminal ids in completion order, used for capacity eviction
    retired: Arc<Mutex<VecDeque<MessageId>>>,
    capacity: usize,
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl StatusTracker {
    /// Create a tracker retaining at most `capacity` terminal entries.
    ///
    /// A zero capacity is clamped to 1 so the most recent outcome always
    /// remains observable.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            statuses: Arc::new(DashMap::new()),
            retired: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Record a status for a message.
    ///
    /// Returns `false` if the transition is illegal (a write after a terminal
    /// status, or a non-initial write of `Pending`), in which case the stored
    /// status is left untouched. Callers are expected to only issue legal
    /// transitions, so a rejection indicates a bug upstream.
    pub fn set_status(&self, id: MessageId, status: DeliveryStatus) -> bool {
        match self.statuses.entry(id) {
            Entry::Occupied(mut entry) => {
                let current = *entry.get();
                if !Self::permits(current, status) {
                    warn!(
                        message_id = %id,
                        from = %current,
                        to = %status,
                        "Rejected illegal status transition"
                    );
                    return false;
                }
                entry.insert(status);
            }
            Entry::Vacant(entry) => {
                entry.insert(status);
            }
        }

        if status.is_terminal() {
            self.retire(id);
        }

        true
    }

    /// Current status for a message, `None` if the id was never recorded
    pub fn get(&self, id: &MessageId) -> Option<DeliveryStatus> {
        self.statuses.get(id).map(|entry| *entry.value())
    }

    /// Number of tracked messages (for the control interface)
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Check whether any message is tracked
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Terminal statuses never change, and `Pending` is initial-only
    const fn permits(from: DeliveryStatus, to: DeliveryStatus) -> bool {
        !from.is_terminal() && !matches!(to, DeliveryStatus::Pending)
    }

    /// Record a completed id and evict the oldest beyond capacity
    fn retire(&self, id: MessageId) {
        let mut retired = self.retired.lock();
        retired.push_back(id);
        while retired.len() > self.capacity {
            if let Some(oldest) = retired.pop_front() {
                self.statuses.remove(&oldest);
            }
        }
    }
}
