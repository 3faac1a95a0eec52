//! Reverse withdrawal domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{PortError, TemporalError};

/// Errors that can occur in the reverse withdrawal domain
#[derive(Debug, Error)]
pub enum ReverseWithdrawalError {
    /// No vendor id was supplied and none could be resolved for the caller
    #[error("Invalid vendor provided")]
    InvalidVendorId,

    /// The reference date could not be parsed or moved
    #[error("Invalid date provided: {0}")]
    InvalidDate(#[from] TemporalError),

    /// A collaborator lookup failed; the cause is kept as the error source
    #[error("Lookup failed: {0}")]
    LookupFailure(#[from] PortError),

    /// A ledger entry failed validation
    #[error("Invalid ledger entry: {0}")]
    InvalidEntry(String),

    /// A ledger amount must be strictly positive
    #[error("Ledger amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
}

impl ReverseWithdrawalError {
    /// Stable machine-readable identifier for callers building user-facing messages
    pub fn code(&self) -> &'static str {
        match self {
            ReverseWithdrawalError::InvalidVendorId => "invalid_vendor_id",
            ReverseWithdrawalError::InvalidDate(_) => "invalid_date",
            ReverseWithdrawalError::LookupFailure(_) => "lookup_failure",
            ReverseWithdrawalError::InvalidEntry(_) => "invalid_entry",
            ReverseWithdrawalError::NonPositiveAmount(_) => "non_positive_amount",
        }
    }
}
