//! Monthly payable amount
//!
//! Under `by_month` billing a vendor owes what was left on the ledger at
//! the end of the previous month, less whatever they already paid during
//! the current month.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::temporal::last_day_of_previous_month;
use core_kernel::{DateRangeFilter, VendorId};

use crate::error::ReverseWithdrawalError;
use crate::ports::BalanceLedgerQuery;

/// Computes the amount due for the month containing a reference date
pub struct PayableAmountByMonth<'a> {
    ledger: &'a dyn BalanceLedgerQuery,
}

impl<'a> PayableAmountByMonth<'a> {
    pub fn new(ledger: &'a dyn BalanceLedgerQuery) -> Self {
        Self { ledger }
    }

    /// Previous month's closing balance minus payments made this month.
    ///
    /// Returns zero without querying payments when the previous month
    /// closed at or below zero.
    ///
    /// # Errors
    ///
    /// Ledger lookup failures are returned unchanged as `LookupFailure`
    pub fn compute(&self, vendor_id: VendorId, reference: NaiveDate) -> Result<Decimal, ReverseWithdrawalError> {
        let previous_month_end = last_day_of_previous_month(reference);
        let previous_balance = self
            .ledger
            .get_balance(vendor_id, &DateRangeFilter::until(previous_month_end))?;

        if previous_balance <= Decimal::ZERO {
            debug!(%vendor_id, %previous_balance, "nothing carried over from previous month");
            return Ok(Decimal::ZERO);
        }

        let paid_this_month = self
            .ledger
            .get_payments(vendor_id, &DateRangeFilter::month_of(reference))?;

        Ok(previous_balance - paid_this_month)
    }
}
