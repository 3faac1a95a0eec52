//! Reverse Withdrawal Domain - Vendor Balance Dues
//!
//! When a marketplace collects payment on a vendor's behalf it withholds its
//! commission before paying out. For cash-on-delivery and similar orders the
//! vendor is paid directly, so the commission becomes a debt the vendor owes
//! the marketplace: a *reverse withdrawal* balance.
//!
//! This crate decides when that balance has to be paid:
//!
//! - **by_month** billing makes the previous month's closing balance due
//!   on a configured day of each month
//! - **by_amount** billing makes the running balance due once it reaches a
//!   threshold, counting the due period from the first day it was exceeded
//!
//! # Ports
//!
//! Ledger data, settings and per-vendor state are reached through the
//! traits in [`ports`]; in-memory implementations live in [`adapters`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_reverse_withdrawal::adapters::*;
//! use domain_reverse_withdrawal::{DueStatusCalculator, ReverseWithdrawalSettings};
//!
//! let calculator = DueStatusCalculator::new(
//!     Arc::new(InMemoryLedger::new()),
//!     Arc::new(ReverseWithdrawalSettings::from_env()?),
//!     Arc::new(InMemoryThresholdStore::new()),
//!     Arc::new(InMemoryEventBus::new()),
//! );
//!
//! let due = calculator.is_balance_due(Some(vendor_id))?;
//! ```

pub mod adapters;
pub mod due_status;
pub mod error;
pub mod events;
pub mod failed_actions;
pub mod payable;
pub mod ports;
pub mod settings;
pub mod transaction;

pub use due_status::{DueDate, DueStatus, DueStatusCalculator, VendorBalance};
pub use error::ReverseWithdrawalError;
pub use events::ReverseWithdrawalEvent;
pub use failed_actions::{formatted_failed_actions, formatted_failed_actions_by_vendor, FailedAction};
pub use payable::PayableAmountByMonth;
pub use ports::{
    BalanceLedgerQuery, EventPublisher, FailedActionsStore, IdentityProvider, SettingsProvider, ThresholdStore,
};
pub use settings::{BillingType, ReverseWithdrawalSettings};
pub use transaction::{default_statement_range, LedgerEntry, PostingType, Statement, StatementLine, TransactionType};
