use std::sync::Mutex;

use super::Transport;
use crate::kernel::envelope::{EventEnvelope, EventType};

/// Keeps every envelope it is handed. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<EventEnvelope>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn envelopes(&self) -> Vec<EventEnvelope> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn event_types(&self) -> Vec<EventType> {
        self.envelopes().iter().map(|e| e.event_type).collect()
    }

    pub fn of_type(&self, kind: EventType) -> Vec<EventEnvelope> {
        self.envelopes()
            .into_iter()
            .filter(|e| e.event_type == kind)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.envelopes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Transport for MemoryTransport {
    fn send(&self, envelope: EventEnvelope) {
        match self.sent.lock() {
            Ok(mut sent) => sent.push(envelope),
            Err(poisoned) => poisoned.into_inner().push(envelope),
        }
    }
}
