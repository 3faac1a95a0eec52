//! Reverse Withdrawal Ports
//!
//! The calculator never touches host-store state directly. Everything it
//! reads or writes goes through the traits below:
//!
//! - `BalanceLedgerQuery`: the vendor's reverse withdrawal ledger
//! - `SettingsProvider`: administrator configuration
//! - `ThresholdStore`: per-vendor "threshold first exceeded" date
//! - `FailedActionsStore`: enforcement actions currently applied to a vendor
//! - `IdentityProvider`: the vendor the current request acts for
//! - `EventPublisher`: notification channel for enforcement/notification jobs
//!
//! In-memory adapters for all of them live in `crate::adapters`.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{DateRangeFilter, DomainPort, PortError, Timezone, VendorId};

use crate::events::ReverseWithdrawalEvent;
use crate::failed_actions::FailedAction;
use crate::settings::BillingType;

/// Read access to the vendor ledger
pub trait BalanceLedgerQuery: DomainPort {
    /// Sum of debits minus credits for entries dated within `range`
    fn get_balance(&self, vendor_id: VendorId, range: &DateRangeFilter) -> Result<Decimal, PortError>;

    /// Sum of vendor payments dated within `range`
    fn get_payments(&self, vendor_id: VendorId, range: &DateRangeFilter) -> Result<Decimal, PortError>;
}

/// Administrator configuration
pub trait SettingsProvider: DomainPort {
    fn billing_type(&self) -> Result<BillingType, PortError>;

    fn billing_day(&self) -> Result<Option<u32>, PortError>;

    fn due_period(&self) -> Result<Option<u32>, PortError>;

    fn balance_threshold(&self) -> Result<Decimal, PortError>;

    fn failed_actions(&self) -> Result<Vec<FailedAction>, PortError>;

    fn timezone(&self) -> Result<Timezone, PortError>;
}

/// Per-vendor date on which the balance threshold was first exceeded
pub trait ThresholdStore: DomainPort {
    fn get(&self, vendor_id: VendorId) -> Result<Option<NaiveDate>, PortError>;

    /// Overwrites the stored date
    fn set(&self, vendor_id: VendorId, date: NaiveDate) -> Result<(), PortError>;

    /// Stores `date` only if nothing is stored yet, atomically.
    ///
    /// Returns `true` when this call stored the value.
    fn set_if_absent(&self, vendor_id: VendorId, date: NaiveDate) -> Result<bool, PortError>;

    fn clear(&self, vendor_id: VendorId) -> Result<(), PortError>;
}

/// Per-vendor enforcement actions, written by the enforcement job
pub trait FailedActionsStore: DomainPort {
    fn get(&self, vendor_id: VendorId) -> Result<BTreeSet<FailedAction>, PortError>;

    fn set(&self, vendor_id: VendorId, actions: BTreeSet<FailedAction>) -> Result<(), PortError>;
}

/// Resolves the vendor the current request acts for
pub trait IdentityProvider: DomainPort {
    fn current_vendor(&self) -> Option<VendorId>;
}

/// Notification channel for domain events
pub trait EventPublisher: DomainPort {
    fn publish(&self, event: ReverseWithdrawalEvent);
}
