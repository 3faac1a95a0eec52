//! Pre-built Test Fixtures
//!
//! Provides predictable vendors, dates and settings. Dates centre on
//! March 2024 (a leap-year February precedes it).

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use core_kernel::{Timezone, VendorId};
use domain_reverse_withdrawal::{BillingType, FailedAction, ReverseWithdrawalSettings};
use rust_decimal_macros::dec;

/// Fixture for vendor identifiers
pub struct VendorFixtures;

impl VendorFixtures {
    /// The vendor most tests act for
    pub fn primary() -> VendorId {
        VendorId::new(101).unwrap()
    }

    /// A second vendor, for isolation checks
    pub fn other() -> VendorId {
        VendorId::new(202).unwrap()
    }
}

/// Fixture for dates and instants
pub struct DateFixtures;

impl DateFixtures {
    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Site-local wall-clock time
    pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        Self::date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    /// UTC instant, for clocks
    pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    /// Mid-morning on 10 March 2024 (UTC)
    pub fn march_10() -> DateTime<Utc> {
        Self::utc(2024, 3, 10, 10, 0)
    }
}

/// Fixture for reverse withdrawal settings
pub struct SettingsFixtures;

impl SettingsFixtures {
    /// Monthly billing with no billing day or due period
    pub fn by_month() -> ReverseWithdrawalSettings {
        ReverseWithdrawalSettings::default()
            .with_billing_type(BillingType::ByMonth)
            .with_billing_day(None)
            .with_due_period(None)
    }

    /// Threshold billing at 50.00 with a seven day due period
    pub fn by_amount() -> ReverseWithdrawalSettings {
        ReverseWithdrawalSettings::default()
            .with_billing_type(BillingType::ByAmount)
            .with_threshold(dec!(50.00))
            .with_due_period(Some(7))
    }

    pub fn unknown_billing() -> ReverseWithdrawalSettings {
        ReverseWithdrawalSettings::default().with_billing_type(BillingType::Unknown)
    }

    /// Every failed action enabled
    pub fn all_failed_actions() -> ReverseWithdrawalSettings {
        ReverseWithdrawalSettings::default().with_failed_actions(FailedAction::ALL.to_vec())
    }

    /// by_amount billing evaluated in a far-east site timezone
    pub fn by_amount_in_tokyo() -> ReverseWithdrawalSettings {
        Self::by_amount().with_timezone(Timezone::new(chrono_tz::Asia::Tokyo))
    }
}
