//! Vendor due-status evaluation
//!
//! Decides whether a vendor currently has to pay their reverse withdrawal
//! balance and by when.
//!
//! # Billing types
//!
//! - **by_month**: the previous month's closing balance, less payments made
//!   this month, is due. The due date is the first of the reference month,
//!   moved forward by `billing_day - 1` and then `due_period - 1` days.
//! - **by_amount**: the running balance is due once it reaches the
//!   threshold. The due date counts `due_period - 1` days from the day the
//!   threshold was first exceeded. That day is recorded the first time a
//!   breach is seen on an evaluation of *today*; back-dated evaluations
//!   never write it.
//!
//! In both cases a reference instant past the due date (23:59:59 on that
//! day) yields `DueDate::Immediate`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info, instrument, warn};

use core_kernel::temporal::{
    add_days, end_of_day, first_day_of_month, format_date, parse_reference_instant, DATE_FORMAT,
};
use core_kernel::{Clock, DateRangeFilter, SystemClock, TemporalError, Timezone, VendorId};

use crate::error::ReverseWithdrawalError;
use crate::events::ReverseWithdrawalEvent;
use crate::payable::PayableAmountByMonth;
use crate::ports::{BalanceLedgerQuery, EventPublisher, IdentityProvider, SettingsProvider, ThresholdStore};
use crate::settings::BillingType;

const IMMEDIATE: &str = "immediate";

/// When a due balance has to be paid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDate {
    /// Nothing is due, or the due date was not computed; serialized as `""`
    NotDue,
    /// The due date has passed; serialized as `"immediate"`
    Immediate,
    /// Pay by the end of this day; serialized as `YYYY-MM-DD`
    On(NaiveDate),
}

impl DueDate {
    /// `Immediate` when `at` is past `due`, otherwise `On(due's day)`
    pub fn relative_to(at: NaiveDateTime, due: NaiveDateTime) -> Self {
        if at > due {
            DueDate::Immediate
        } else {
            DueDate::On(due.date())
        }
    }

    pub fn is_immediate(&self) -> bool {
        matches!(self, DueDate::Immediate)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DueDate::On(date) => Some(*date),
            _ => None,
        }
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueDate::NotDue => Ok(()),
            DueDate::Immediate => f.write_str(IMMEDIATE),
            DueDate::On(date) => f.write_str(&format_date(*date)),
        }
    }
}

impl FromStr for DueDate {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(DueDate::NotDue),
            IMMEDIATE => Ok(DueDate::Immediate),
            other => NaiveDate::parse_from_str(other, DATE_FORMAT)
                .map(DueDate::On)
                .map_err(|_| TemporalError::invalid_date(other)),
        }
    }
}

impl Serialize for DueDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A vendor's balance together with the settings it was judged against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorBalance {
    pub vendor_id: VendorId,
    /// Running balance up to the reference date
    pub balance: Decimal,
    pub billing_type: BillingType,
    pub billing_day: Option<u32>,
    pub due_period: Option<u32>,
    pub threshold: Decimal,
    /// Amount the billing type considers payable; zero for unknown billing types
    pub payable_amount: Decimal,
}

/// Result of one due-status evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueStatus {
    /// Whether the vendor has to pay
    pub status: bool,
    pub due_date: DueDate,
    pub balance: VendorBalance,
}

impl DueStatus {
    fn not_due(balance: VendorBalance) -> Self {
        Self {
            status: false,
            due_date: DueDate::NotDue,
            balance,
        }
    }
}

/// Settings read once per evaluation
#[derive(Debug, Clone)]
struct BillingPolicy {
    billing_type: BillingType,
    billing_day: Option<u32>,
    due_period: Option<u32>,
    threshold: Decimal,
    timezone: Timezone,
}

impl BillingPolicy {
    fn load(settings: &dyn SettingsProvider) -> Result<Self, ReverseWithdrawalError> {
        Ok(Self {
            billing_type: settings.billing_type()?,
            billing_day: settings.billing_day()?,
            due_period: settings.due_period()?,
            threshold: settings.balance_threshold()?,
            timezone: settings.timezone()?,
        })
    }
}

/// Moves `at` forward by `days - 1` days when `days` is set
fn advance(at: NaiveDateTime, days: Option<u32>) -> Result<NaiveDateTime, TemporalError> {
    match days {
        Some(days) if days > 1 => add_days(at, u64::from(days - 1)),
        _ => Ok(at),
    }
}

/// Evaluates whether vendors owe a reverse withdrawal payment
///
/// All state is reached through ports, so the calculator itself is
/// stateless and can be shared across threads.
///
/// # Example
///
/// ```rust,ignore
/// let calculator = DueStatusCalculator::new(ledger, settings, thresholds, events)
///     .with_identity(identity);
///
/// let status = calculator.evaluate(None, Some("2024-03-10"))?;
/// if status.status {
///     println!("pay {} by {}", status.balance.payable_amount, status.due_date);
/// }
/// ```
pub struct DueStatusCalculator {
    ledger: Arc<dyn BalanceLedgerQuery>,
    settings: Arc<dyn SettingsProvider>,
    thresholds: Arc<dyn ThresholdStore>,
    events: Arc<dyn EventPublisher>,
    identity: Option<Arc<dyn IdentityProvider>>,
    clock: Arc<dyn Clock>,
}

impl DueStatusCalculator {
    pub fn new(
        ledger: Arc<dyn BalanceLedgerQuery>,
        settings: Arc<dyn SettingsProvider>,
        thresholds: Arc<dyn ThresholdStore>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            ledger,
            settings,
            thresholds,
            events,
            identity: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Resolves the vendor when callers omit one
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Evaluates the due status of a vendor.
    ///
    /// `vendor_id` falls back to the current identity. `reference` defaults
    /// to now; see `core_kernel::temporal::parse_reference_instant` for the
    /// accepted formats.
    ///
    /// # Errors
    ///
    /// - `InvalidVendorId` if no vendor can be resolved
    /// - `InvalidDate` if `reference` does not parse
    /// - `LookupFailure` if a ledger, settings or threshold lookup fails
    #[instrument(skip(self))]
    pub fn evaluate(
        &self,
        vendor_id: Option<VendorId>,
        reference: Option<&str>,
    ) -> Result<DueStatus, ReverseWithdrawalError> {
        let result = self.resolve_vendor(vendor_id).and_then(|vendor_id| {
            let policy = BillingPolicy::load(self.settings.as_ref())?;
            let now = self.local_now(&policy)?;
            let at = Self::reference_instant(reference, &policy, now)?;
            self.evaluate_with(vendor_id, at, now, &policy)
        });

        if let Err(error) = &result {
            warn!(code = error.code(), %error, "due status evaluation failed");
        }
        result
    }

    /// Evaluates the due status at a site-local instant
    #[instrument(skip(self))]
    pub fn evaluate_at(&self, vendor_id: VendorId, at: NaiveDateTime) -> Result<DueStatus, ReverseWithdrawalError> {
        let policy = BillingPolicy::load(self.settings.as_ref())?;
        let now = self.local_now(&policy)?;
        self.evaluate_with(vendor_id, at, now, &policy)
    }

    /// The balance record alone, without deciding on a due date
    pub fn vendor_balance(
        &self,
        vendor_id: Option<VendorId>,
        reference: Option<&str>,
    ) -> Result<VendorBalance, ReverseWithdrawalError> {
        let vendor_id = self.resolve_vendor(vendor_id)?;
        let policy = BillingPolicy::load(self.settings.as_ref())?;
        let now = self.local_now(&policy)?;
        let at = Self::reference_instant(reference, &policy, now)?;
        self.balance_at(vendor_id, at.date(), &policy)
    }

    /// Whether the vendor has to pay as of now
    pub fn is_balance_due(&self, vendor_id: Option<VendorId>) -> Result<bool, ReverseWithdrawalError> {
        Ok(self.evaluate(vendor_id, None)?.status)
    }

    fn resolve_vendor(&self, vendor_id: Option<VendorId>) -> Result<VendorId, ReverseWithdrawalError> {
        vendor_id
            .or_else(|| self.identity.as_ref().and_then(|identity| identity.current_vendor()))
            .ok_or(ReverseWithdrawalError::InvalidVendorId)
    }

    fn local_now(&self, policy: &BillingPolicy) -> Result<NaiveDateTime, ReverseWithdrawalError> {
        Ok(policy
            .timezone
            .to_local(self.clock.now())
            .ok_or(TemporalError::OutOfRange)?)
    }

    fn reference_instant(
        reference: Option<&str>,
        policy: &BillingPolicy,
        now: NaiveDateTime,
    ) -> Result<NaiveDateTime, ReverseWithdrawalError> {
        match reference {
            None => Ok(now),
            Some(input) => Ok(parse_reference_instant(input, policy.timezone, now)?),
        }
    }

    fn balance_at(
        &self,
        vendor_id: VendorId,
        reference: NaiveDate,
        policy: &BillingPolicy,
    ) -> Result<VendorBalance, ReverseWithdrawalError> {
        let balance = self
            .ledger
            .get_balance(vendor_id, &DateRangeFilter::until(reference))?;

        let payable_amount = match policy.billing_type {
            BillingType::ByMonth => PayableAmountByMonth::new(self.ledger.as_ref()).compute(vendor_id, reference)?,
            BillingType::ByAmount => balance,
            BillingType::Unknown => Decimal::ZERO,
        };

        Ok(VendorBalance {
            vendor_id,
            balance,
            billing_type: policy.billing_type,
            billing_day: policy.billing_day,
            due_period: policy.due_period,
            threshold: policy.threshold,
            payable_amount,
        })
    }

    fn evaluate_with(
        &self,
        vendor_id: VendorId,
        at: NaiveDateTime,
        now: NaiveDateTime,
        policy: &BillingPolicy,
    ) -> Result<DueStatus, ReverseWithdrawalError> {
        let balance = self.balance_at(vendor_id, at.date(), policy)?;
        let mut status = DueStatus::not_due(balance);

        match policy.billing_type {
            BillingType::ByMonth => {
                if status.balance.payable_amount <= Decimal::ZERO {
                    debug!(%vendor_id, "no monthly balance to pay");
                    return Ok(status);
                }

                status.status = true;
                let due = end_of_day(first_day_of_month(at.date()));
                let due = advance(due, policy.billing_day)?;
                let due = advance(due, policy.due_period)?;
                status.due_date = DueDate::relative_to(at, due);
            }
            BillingType::ByAmount => {
                if status.balance.payable_amount < policy.threshold {
                    debug!(%vendor_id, threshold = %policy.threshold, "balance below threshold");
                    return Ok(status);
                }

                status.status = true;
                let (exceed_date, freshly_recorded) = self.threshold_anchor(vendor_id, at.date(), now.date())?;
                let due = advance(end_of_day(exceed_date), policy.due_period)?;
                status.due_date = DueDate::relative_to(at, due);

                if freshly_recorded {
                    info!(%vendor_id, %exceed_date, due_date = %status.due_date, "balance threshold exceeded");
                    self.events.publish(ReverseWithdrawalEvent::threshold_exceeded(
                        vendor_id,
                        status.clone(),
                        exceed_date,
                        self.clock.now(),
                    ));
                }
            }
            BillingType::Unknown => {
                debug!(%vendor_id, "unknown billing type, nothing is due");
            }
        }

        Ok(status)
    }

    /// Day the threshold was first exceeded, and whether this call recorded it.
    ///
    /// Without a stored date, today is the anchor. It is only stored when
    /// the evaluation is for today.
    fn threshold_anchor(
        &self,
        vendor_id: VendorId,
        reference: NaiveDate,
        today: NaiveDate,
    ) -> Result<(NaiveDate, bool), ReverseWithdrawalError> {
        if let Some(recorded) = self.thresholds.get(vendor_id)? {
            return Ok((recorded, false));
        }

        if reference != today {
            debug!(%vendor_id, %reference, "back-dated evaluation, exceed date not recorded");
            return Ok((today, false));
        }

        if self.thresholds.set_if_absent(vendor_id, today)? {
            return Ok((today, true));
        }

        // a concurrent evaluation stored it between our read and write
        let recorded = self.thresholds.get(vendor_id)?.unwrap_or(today);
        Ok((recorded, false))
    }
}
