//! Ledger entries and vendor statements
//!
//! Every reverse withdrawal entry is either a debit (the vendor owes the
//! marketplace more) or a credit (the vendor paid or was refunded). The
//! running balance of a vendor is `Σ debit − Σ credit`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::temporal::one_month_before;
use core_kernel::{DateRangeFilter, EntryId, VendorId};

use crate::error::ReverseWithdrawalError;

/// Side of the ledger an entry lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingType {
    /// Increases what the vendor owes
    Debit,
    /// Decreases what the vendor owes
    Credit,
}

/// Kinds of reverse withdrawal transactions.
///
/// The keys are persisted by the host store and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    OrderCommission,
    FailedTransferReversal,
    ProductAdvertisement,
    ManualOrderCommission,
    VendorPayment,
    OrderRefund,
}

impl TransactionType {
    pub const ALL: [TransactionType; 6] = [
        TransactionType::OrderCommission,
        TransactionType::FailedTransferReversal,
        TransactionType::ProductAdvertisement,
        TransactionType::ManualOrderCommission,
        TransactionType::VendorPayment,
        TransactionType::OrderRefund,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TransactionType::OrderCommission => "order_commission",
            TransactionType::FailedTransferReversal => "failed_transfer_reversal",
            TransactionType::ProductAdvertisement => "product_advertisement",
            TransactionType::ManualOrderCommission => "manual_order_commission",
            TransactionType::VendorPayment => "vendor_payment",
            TransactionType::OrderRefund => "order_refund",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::OrderCommission => "Commission",
            TransactionType::FailedTransferReversal => "Failed Transfer Reversal",
            TransactionType::ProductAdvertisement => "Product Advertisement",
            TransactionType::ManualOrderCommission => "Manual Order Commission",
            TransactionType::VendorPayment => "Payment",
            TransactionType::OrderRefund => "Refund",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    /// Label for a stored key, or "" for keys this version does not know
    pub fn label_for_key(key: &str) -> &'static str {
        Self::from_key(key).map_or("", |t| t.label())
    }

    pub fn posting_type(&self) -> PostingType {
        match self {
            TransactionType::VendorPayment | TransactionType::OrderRefund => PostingType::Credit,
            _ => PostingType::Debit,
        }
    }
}

/// A single reverse withdrawal ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    /// Order, product or payment the entry refers to
    pub trn_id: u64,
    pub trn_type: TransactionType,
    pub trn_date: NaiveDate,
    pub vendor_id: VendorId,
    pub note: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl LedgerEntry {
    /// Creates an entry whose side follows the transaction type
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` unless `amount > 0`
    pub fn new(
        vendor_id: VendorId,
        trn_type: TransactionType,
        trn_id: u64,
        trn_date: NaiveDate,
        amount: Decimal,
    ) -> Result<Self, ReverseWithdrawalError> {
        if amount <= Decimal::ZERO {
            return Err(ReverseWithdrawalError::NonPositiveAmount(amount));
        }

        let (debit, credit) = match trn_type.posting_type() {
            PostingType::Debit => (amount, Decimal::ZERO),
            PostingType::Credit => (Decimal::ZERO, amount),
        };

        Ok(Self {
            id: EntryId::new_v7(),
            trn_id,
            trn_type,
            trn_date,
            vendor_id,
            note: String::new(),
            debit,
            credit,
        })
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Checks that exactly one side is set, on the side the type requires
    pub fn validate(&self) -> Result<(), ReverseWithdrawalError> {
        if self.debit.is_sign_negative() || self.credit.is_sign_negative() {
            return Err(ReverseWithdrawalError::InvalidEntry(format!(
                "entry {} has a negative side",
                self.id
            )));
        }

        let ok = match self.trn_type.posting_type() {
            PostingType::Debit => self.debit > Decimal::ZERO && self.credit.is_zero(),
            PostingType::Credit => self.credit > Decimal::ZERO && self.debit.is_zero(),
        };

        if !ok {
            return Err(ReverseWithdrawalError::InvalidEntry(format!(
                "{} entry {} must only carry a {:?} amount",
                self.trn_type.key(),
                self.id,
                self.trn_type.posting_type()
            )));
        }

        Ok(())
    }

    /// Effect on the running balance
    pub fn balance_change(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// A statement row: the entry plus the running balance after it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementLine {
    #[serde(flatten)]
    pub entry: LedgerEntry,
    pub label: &'static str,
    pub balance: Decimal,
}

/// A vendor's ledger over a date range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub vendor_id: VendorId,
    pub range: DateRangeFilter,
    /// Balance carried in from before the range
    pub opening_balance: Decimal,
    pub lines: Vec<StatementLine>,
    pub closing_balance: Decimal,
}

impl Statement {
    /// Builds running balances starting from `opening_balance`.
    ///
    /// Entries are ordered by date; entries on the same date keep their
    /// given order.
    pub fn build(
        vendor_id: VendorId,
        range: DateRangeFilter,
        opening_balance: Decimal,
        entries: impl IntoIterator<Item = LedgerEntry>,
    ) -> Self {
        let mut entries: Vec<LedgerEntry> = entries.into_iter().collect();
        entries.sort_by_key(|entry| entry.trn_date);

        let mut balance = opening_balance;
        let lines = entries
            .into_iter()
            .map(|entry| {
                balance += entry.balance_change();
                StatementLine {
                    label: entry.trn_type.label(),
                    balance,
                    entry,
                }
            })
            .collect();

        Self {
            vendor_id,
            range,
            opening_balance,
            lines,
            closing_balance: balance,
        }
    }

    pub fn total_debit(&self) -> Decimal {
        self.lines.iter().map(|line| line.entry.debit).sum()
    }

    pub fn total_credit(&self) -> Decimal {
        self.lines.iter().map(|line| line.entry.credit).sum()
    }
}

/// Range a statement covers when the caller does not pick one: the last month up to today
pub fn default_statement_range(today: NaiveDate) -> DateRangeFilter {
    DateRangeFilter {
        from: Some(one_month_before(today)),
        to: Some(today),
    }
}
