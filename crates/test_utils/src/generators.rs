//! Property-Based Test Generators
//!
//! Provides proptest strategies for amounts, dates and billing settings
//! that respect the domain's ranges.

use chrono::NaiveDate;
use domain_reverse_withdrawal::settings::MAX_BILLING_DAY;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for positive currency amounts with two decimal places
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for dates between 2000 and 2099, day 1..=28
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100i32, 1u32..=12u32, 1u32..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy for optional billing days
pub fn billing_day_strategy() -> impl Strategy<Value = Option<u32>> {
    proptest::option::of(1u32..=MAX_BILLING_DAY)
}

/// Strategy for optional due periods
pub fn due_period_strategy() -> impl Strategy<Value = Option<u32>> {
    proptest::option::of(1u32..=60u32)
}
