//! Shared test support: scripted delivery providers

use std::{
    collections::VecDeque,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
};

use async_trait::async_trait;
use courier::{Message, MessageId, Provider, ProviderError, SendOutcome};
use parking_lot::Mutex;

/// One scripted response from a provider
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Accept the message
    Deliver,
    /// Decline the message
    Reject,
    /// Raise a transport fault
    Fault,
}

/// Provider that follows a fixed script of outcomes, then repeats a default
/// outcome once the script is exhausted. Records every call for assertions.
pub struct ScriptedProvider {
    name: &'static str,
    script: Mutex<VecDeque<Step>>,
    default: Step,
    calls: AtomicU32,
    seen: Mutex<Vec<MessageId>>,
}

impl ScriptedProvider {
    pub fn new(name: &'static str, script: Vec<Step>, default: Step) -> Arc<Self> {
        Arc::new(Self {
            name,
            script: Mutex::new(script.into()),
            default,
            calls: AtomicU32::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Provider that responds the same way to every call
    pub fn always(name: &'static str, step: Step) -> Arc<Self> {
        Self::new(name, Vec::new(), step)
    }

    /// Total number of send attempts this provider has received
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Message ids in the order this provider saw them
    pub fn seen(&self) -> Vec<MessageId> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn send(&self, message: &Message) -> Result<SendOutcome, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(message.id);

        let step = self.script.lock().pop_front().unwrap_or(self.default);
        match step {
            Step::Deliver => Ok(SendOutcome::Delivered),
            Step::Reject => Ok(SendOutcome::Rejected),
            Step::Fault => Err(ProviderError::Connection(
                "connection refused".to_string(),
            )),
        }
    }
}
