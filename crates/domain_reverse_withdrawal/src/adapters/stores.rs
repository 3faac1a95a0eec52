//! Per-vendor key-value stores and a fixed identity

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use core_kernel::{DomainPort, PortError, VendorId};

use crate::failed_actions::FailedAction;
use crate::ports::{FailedActionsStore, IdentityProvider, ThresholdStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Threshold exceed dates keyed by vendor
///
/// `set_if_absent` checks and writes under one lock, so concurrent callers
/// cannot both observe an empty slot.
#[derive(Debug, Default)]
pub struct InMemoryThresholdStore {
    dates: Mutex<HashMap<VendorId, NaiveDate>>,
}

impl InMemoryThresholdStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryThresholdStore {}

impl ThresholdStore for InMemoryThresholdStore {
    fn get(&self, vendor_id: VendorId) -> Result<Option<NaiveDate>, PortError> {
        Ok(lock(&self.dates).get(&vendor_id).copied())
    }

    fn set(&self, vendor_id: VendorId, date: NaiveDate) -> Result<(), PortError> {
        lock(&self.dates).insert(vendor_id, date);
        Ok(())
    }

    fn set_if_absent(&self, vendor_id: VendorId, date: NaiveDate) -> Result<bool, PortError> {
        let mut dates = lock(&self.dates);
        if dates.contains_key(&vendor_id) {
            return Ok(false);
        }
        dates.insert(vendor_id, date);
        Ok(true)
    }

    fn clear(&self, vendor_id: VendorId) -> Result<(), PortError> {
        lock(&self.dates).remove(&vendor_id);
        Ok(())
    }
}

/// Failed actions keyed by vendor; unknown vendors have none
#[derive(Debug, Default)]
pub struct InMemoryFailedActionsStore {
    actions: Mutex<HashMap<VendorId, BTreeSet<FailedAction>>>,
}

impl InMemoryFailedActionsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryFailedActionsStore {}

impl FailedActionsStore for InMemoryFailedActionsStore {
    fn get(&self, vendor_id: VendorId) -> Result<BTreeSet<FailedAction>, PortError> {
        Ok(lock(&self.actions).get(&vendor_id).cloned().unwrap_or_default())
    }

    fn set(&self, vendor_id: VendorId, actions: BTreeSet<FailedAction>) -> Result<(), PortError> {
        let mut map = lock(&self.actions);
        if actions.is_empty() {
            map.remove(&vendor_id);
        } else {
            map.insert(vendor_id, actions);
        }
        Ok(())
    }
}

/// Identity fixed at construction, e.g. from an authenticated session
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticIdentity(pub Option<VendorId>);

impl DomainPort for StaticIdentity {}

impl IdentityProvider for StaticIdentity {
    fn current_vendor(&self) -> Option<VendorId> {
        self.0
    }
}
