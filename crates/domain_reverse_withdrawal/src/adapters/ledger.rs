//! In-memory reverse withdrawal ledger
//!
//! Entries are append-only: a correction is posted as a new entry of the
//! opposite side, never by editing an existing one.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{DateRangeFilter, DomainPort, EntryId, PortError, VendorId};

use crate::error::ReverseWithdrawalError;
use crate::ports::BalanceLedgerQuery;
use crate::transaction::{LedgerEntry, Statement, TransactionType};

/// Append-only ledger of reverse withdrawal entries for all vendors
///
/// # Invariants
///
/// - Every stored entry passes `LedgerEntry::validate`
/// - A vendor's balance is always `Σ debit − Σ credit` of their entries
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: RwLock<Vec<LedgerEntry>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<LedgerEntry>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<LedgerEntry>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends an entry
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` if the entry carries amounts on the wrong side
    pub fn record(&self, entry: LedgerEntry) -> Result<EntryId, ReverseWithdrawalError> {
        entry.validate()?;

        let id = entry.id;
        debug!(
            vendor_id = %entry.vendor_id,
            trn_type = entry.trn_type.key(),
            debit = %entry.debit,
            credit = %entry.credit,
            "recording reverse withdrawal entry"
        );
        self.write().push(entry);
        Ok(id)
    }

    /// Entries of `vendor_id` dated within `range`, in insertion order
    pub fn entries_for(&self, vendor_id: VendorId, range: &DateRangeFilter) -> Vec<LedgerEntry> {
        self.read()
            .iter()
            .filter(|entry| entry.vendor_id == vendor_id && range.contains(entry.trn_date))
            .cloned()
            .collect()
    }

    /// Statement for `range`, opening with everything dated before it
    pub fn statement(&self, vendor_id: VendorId, range: DateRangeFilter) -> Statement {
        let opening_balance = match range.from.and_then(|from| from.pred_opt()) {
            Some(day_before) => self.sum(vendor_id, &DateRangeFilter::until(day_before), |e| e.balance_change()),
            None => Decimal::ZERO,
        };

        Statement::build(vendor_id, range, opening_balance, self.entries_for(vendor_id, &range))
    }

    fn sum(&self, vendor_id: VendorId, range: &DateRangeFilter, amount: impl Fn(&LedgerEntry) -> Decimal) -> Decimal {
        self.read()
            .iter()
            .filter(|entry| entry.vendor_id == vendor_id && range.contains(entry.trn_date))
            .map(amount)
            .sum()
    }
}

impl DomainPort for InMemoryLedger {}

impl BalanceLedgerQuery for InMemoryLedger {
    fn get_balance(&self, vendor_id: VendorId, range: &DateRangeFilter) -> Result<Decimal, PortError> {
        Ok(self.sum(vendor_id, range, LedgerEntry::balance_change))
    }

    fn get_payments(&self, vendor_id: VendorId, range: &DateRangeFilter) -> Result<Decimal, PortError> {
        Ok(self.sum(vendor_id, range, |entry| {
            if entry.trn_type == TransactionType::VendorPayment {
                entry.credit
            } else {
                Decimal::ZERO
            }
        }))
    }
}
