//! Test Data Builders
//!
//! Builders for ledgers and fully wired calculators. Tests specify only the
//! entries and settings they care about.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{Clock, FixedClock, VendorId};
use domain_reverse_withdrawal::adapters::{InMemoryEventBus, InMemoryLedger, InMemoryThresholdStore, StaticIdentity};
use domain_reverse_withdrawal::{
    BalanceLedgerQuery, DueStatusCalculator, LedgerEntry, ReverseWithdrawalSettings, TransactionType,
};
use rust_decimal::Decimal;

use crate::fixtures::{DateFixtures, VendorFixtures};

/// Builder for an in-memory ledger
pub struct LedgerBuilder {
    vendor_id: VendorId,
    entries: Vec<LedgerEntry>,
    next_trn_id: u64,
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerBuilder {
    /// Creates a builder recording entries for the primary vendor
    pub fn new() -> Self {
        Self {
            vendor_id: VendorFixtures::primary(),
            entries: Vec::new(),
            next_trn_id: 1000,
        }
    }

    /// Switches the vendor subsequent entries are recorded for
    pub fn for_vendor(mut self, vendor_id: VendorId) -> Self {
        self.vendor_id = vendor_id;
        self
    }

    /// Adds an entry of any type
    pub fn entry(mut self, trn_type: TransactionType, date: NaiveDate, amount: Decimal) -> Self {
        self.next_trn_id += 1;
        let entry = LedgerEntry::new(self.vendor_id, trn_type, self.next_trn_id, date, amount).unwrap();
        self.entries.push(entry);
        self
    }

    /// Adds an order commission the vendor owes
    pub fn commission(self, date: NaiveDate, amount: Decimal) -> Self {
        self.entry(TransactionType::OrderCommission, date, amount)
    }

    /// Adds a payment the vendor made
    pub fn payment(self, date: NaiveDate, amount: Decimal) -> Self {
        self.entry(TransactionType::VendorPayment, date, amount)
    }

    pub fn build(self) -> InMemoryLedger {
        let ledger = InMemoryLedger::new();
        for entry in self.entries {
            ledger.record(entry).unwrap();
        }
        ledger
    }
}

/// A calculator together with handles to every adapter behind it
pub struct CalculatorHarness {
    pub calculator: DueStatusCalculator,
    pub thresholds: Arc<InMemoryThresholdStore>,
    pub events: Arc<InMemoryEventBus>,
}

/// Builder for `CalculatorHarness`
pub struct CalculatorHarnessBuilder {
    ledger: Arc<dyn BalanceLedgerQuery>,
    settings: ReverseWithdrawalSettings,
    now: DateTime<Utc>,
    identity: Option<VendorId>,
    thresholds: Arc<InMemoryThresholdStore>,
}

impl Default for CalculatorHarnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorHarnessBuilder {
    /// Empty ledger, default settings, clock at 10 March 2024
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(InMemoryLedger::new()),
            settings: ReverseWithdrawalSettings::default(),
            now: DateFixtures::march_10(),
            identity: None,
            thresholds: Arc::new(InMemoryThresholdStore::new()),
        }
    }

    pub fn with_ledger(mut self, ledger: impl BalanceLedgerQuery) -> Self {
        self.ledger = Arc::new(ledger);
        self
    }

    pub fn with_shared_ledger(mut self, ledger: Arc<dyn BalanceLedgerQuery>) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn with_settings(mut self, settings: ReverseWithdrawalSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_identity(mut self, vendor_id: VendorId) -> Self {
        self.identity = Some(vendor_id);
        self
    }

    /// Shares a threshold store with another harness
    pub fn with_thresholds(mut self, thresholds: Arc<InMemoryThresholdStore>) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn build(self) -> CalculatorHarness {
        let events = Arc::new(InMemoryEventBus::new());
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(self.now));

        let calculator = DueStatusCalculator::new(
            self.ledger,
            Arc::new(self.settings),
            self.thresholds.clone(),
            events.clone(),
        )
        .with_clock(clock)
        .with_identity(Arc::new(StaticIdentity(self.identity)));

        CalculatorHarness {
            calculator,
            thresholds: self.thresholds,
            events,
        }
    }
}
