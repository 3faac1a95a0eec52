//! Event bus that records published events

use std::sync::{Mutex, MutexGuard};

use core_kernel::DomainPort;

use crate::events::ReverseWithdrawalEvent;
use crate::ports::EventPublisher;

/// Collects published events in order
#[derive(Debug, Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<ReverseWithdrawalEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ReverseWithdrawalEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of everything published so far
    pub fn events(&self) -> Vec<ReverseWithdrawalEvent> {
        self.lock().clone()
    }

    /// Removes and returns everything published so far
    pub fn drain(&self) -> Vec<ReverseWithdrawalEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl DomainPort for InMemoryEventBus {}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: ReverseWithdrawalEvent) {
        self.lock().push(event);
    }
}
