//! Custom Test Assertions
//!
//! Assertion helpers for due statuses that print the whole status on
//! failure.

use chrono::NaiveDate;
use domain_reverse_withdrawal::{DueDate, DueStatus};
use rust_decimal::Decimal;

/// Asserts nothing is due and no due date was produced
pub fn assert_not_due(status: &DueStatus) {
    assert!(
        !status.status && status.due_date == DueDate::NotDue,
        "Expected nothing due, got {:?}",
        status
    );
}

/// Asserts the balance is due on `date`
pub fn assert_due_on(status: &DueStatus, date: NaiveDate) {
    assert!(status.status, "Expected a due balance, got {:?}", status);
    assert_eq!(
        status.due_date,
        DueDate::On(date),
        "Due date mismatch for {:?}",
        status
    );
}

/// Asserts the balance is due immediately
pub fn assert_due_immediately(status: &DueStatus) {
    assert!(
        status.status && status.due_date.is_immediate(),
        "Expected an immediate due date, got {:?}",
        status
    );
}

/// Asserts the payable amount on the status
pub fn assert_payable(status: &DueStatus, expected: Decimal) {
    assert_eq!(
        status.balance.payable_amount,
        expected,
        "Payable amount mismatch: actual={}, expected={}",
        status.balance.payable_amount,
        expected
    );
}
