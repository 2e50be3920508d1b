//! Event persistence collaborator.
//!
//! Persistence of event history is out of scope for the core, but the
//! pipeline still records each completed event through an injected store so
//! hosts can plug in real storage without touching the decision logic.

use std::sync::Mutex;

use fridgewatch_common::error::FridgeResult;
use fridgewatch_event_model::access::AccessEvent;

/// Append-only sink for completed access events.
pub trait EventStore: Send + Sync {
    fn append(&self, event: &AccessEvent) -> FridgeResult<()>;
}

/// Keeps events in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: Mutex<Vec<AccessEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded event, in append order.
    pub fn events(&self) -> Vec<AccessEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventStore for InMemoryEventStore {
    fn append(&self, event: &AccessEvent) -> FridgeResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Discards every event. For hosts that opt out of history entirely.
#[derive(Debug, Default)]
pub struct NullEventStore;

impl EventStore for NullEventStore {
    fn append(&self, _event: &AccessEvent) -> FridgeResult<()> {
        Ok(())
    }
}
