//! Domain events for reverse withdrawal
//!
//! Events are consumed by the enforcement and notification jobs, which are
//! not part of this crate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{EventId, VendorId};

use crate::due_status::DueStatus;

/// Events emitted while evaluating vendor dues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReverseWithdrawalEvent {
    /// A vendor's balance reached the threshold and the exceed date was recorded
    ThresholdExceeded {
        event_id: EventId,
        vendor_id: VendorId,
        due_status: DueStatus,
        exceed_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
}

impl ReverseWithdrawalEvent {
    pub fn threshold_exceeded(
        vendor_id: VendorId,
        due_status: DueStatus,
        exceed_date: NaiveDate,
        timestamp: DateTime<Utc>,
    ) -> Self {
        ReverseWithdrawalEvent::ThresholdExceeded {
            event_id: EventId::new_v7(),
            vendor_id,
            due_status,
            exceed_date,
            timestamp,
        }
    }

    pub fn vendor_id(&self) -> VendorId {
        match self {
            ReverseWithdrawalEvent::ThresholdExceeded { vendor_id, .. } => *vendor_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ReverseWithdrawalEvent::ThresholdExceeded { timestamp, .. } => *timestamp,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            ReverseWithdrawalEvent::ThresholdExceeded { .. } => "ThresholdExceeded",
        }
    }
}
