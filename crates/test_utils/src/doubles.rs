//! Port Test Doubles
//!
//! Ledger and store implementations that fail on demand or count calls,
//! for exercising error propagation and short-circuit behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{DateRangeFilter, DomainPort, PortError, Timezone, VendorId};
use domain_reverse_withdrawal::{
    BalanceLedgerQuery, BillingType, FailedAction, SettingsProvider, ThresholdStore,
};
use rust_decimal::Decimal;

fn unreachable_database() -> PortError {
    let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    PortError::connection_with_source("ledger database unreachable", refused)
}

/// Ledger whose every lookup fails with a connection error
#[derive(Debug, Default)]
pub struct FailingLedger;

impl DomainPort for FailingLedger {}

impl BalanceLedgerQuery for FailingLedger {
    fn get_balance(&self, _vendor_id: VendorId, _range: &DateRangeFilter) -> Result<Decimal, PortError> {
        Err(unreachable_database())
    }

    fn get_payments(&self, _vendor_id: VendorId, _range: &DateRangeFilter) -> Result<Decimal, PortError> {
        Err(unreachable_database())
    }
}

/// Wraps a ledger and records how it is queried
pub struct CountingLedger {
    inner: Arc<dyn BalanceLedgerQuery>,
    balance_calls: AtomicUsize,
    payment_calls: AtomicUsize,
    fail_payments: bool,
}

impl CountingLedger {
    pub fn new(inner: Arc<dyn BalanceLedgerQuery>) -> Self {
        Self {
            inner,
            balance_calls: AtomicUsize::new(0),
            payment_calls: AtomicUsize::new(0),
            fail_payments: false,
        }
    }

    /// Makes payment lookups fail while balance lookups keep working
    pub fn failing_payments(mut self) -> Self {
        self.fail_payments = true;
        self
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn payment_calls(&self) -> usize {
        self.payment_calls.load(Ordering::SeqCst)
    }
}

impl DomainPort for CountingLedger {}

impl BalanceLedgerQuery for CountingLedger {
    fn get_balance(&self, vendor_id: VendorId, range: &DateRangeFilter) -> Result<Decimal, PortError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_balance(vendor_id, range)
    }

    fn get_payments(&self, vendor_id: VendorId, range: &DateRangeFilter) -> Result<Decimal, PortError> {
        self.payment_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_payments {
            return Err(PortError::Timeout {
                operation: "get_payments".to_string(),
                duration_ms: 30_000,
            });
        }
        self.inner.get_payments(vendor_id, range)
    }
}

/// Settings provider whose option table cannot be read
#[derive(Debug, Default)]
pub struct UnavailableSettings;

impl DomainPort for UnavailableSettings {}

impl SettingsProvider for UnavailableSettings {
    fn billing_type(&self) -> Result<BillingType, PortError> {
        Err(PortError::ServiceUnavailable { service: "options".to_string() })
    }

    fn billing_day(&self) -> Result<Option<u32>, PortError> {
        Err(PortError::ServiceUnavailable { service: "options".to_string() })
    }

    fn due_period(&self) -> Result<Option<u32>, PortError> {
        Err(PortError::ServiceUnavailable { service: "options".to_string() })
    }

    fn balance_threshold(&self) -> Result<Decimal, PortError> {
        Err(PortError::ServiceUnavailable { service: "options".to_string() })
    }

    fn failed_actions(&self) -> Result<Vec<FailedAction>, PortError> {
        Err(PortError::ServiceUnavailable { service: "options".to_string() })
    }

    fn timezone(&self) -> Result<Timezone, PortError> {
        Err(PortError::ServiceUnavailable { service: "options".to_string() })
    }
}

/// Threshold store that loses every race: it reports empty on the first
/// read, refuses the insert, and then returns `winner`
pub struct RacingThresholdStore {
    winner: NaiveDate,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl RacingThresholdStore {
    pub fn new(winner: NaiveDate) -> Self {
        Self {
            winner,
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl DomainPort for RacingThresholdStore {}

impl ThresholdStore for RacingThresholdStore {
    fn get(&self, _vendor_id: VendorId) -> Result<Option<NaiveDate>, PortError> {
        if self.reads.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(None)
        } else {
            Ok(Some(self.winner))
        }
    }

    fn set(&self, _vendor_id: VendorId, _date: NaiveDate) -> Result<(), PortError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn set_if_absent(&self, _vendor_id: VendorId, _date: NaiveDate) -> Result<bool, PortError> {
        Ok(false)
    }

    fn clear(&self, _vendor_id: VendorId) -> Result<(), PortError> {
        Ok(())
    }
}
