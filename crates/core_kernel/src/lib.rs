//! Core Kernel - Foundational types shared by the marketplace domains
//!
//! This crate provides the building blocks used across the workspace:
//! - Strongly typed marketplace and ledger identifiers
//! - Site-local calendar handling and the `Clock` port
//! - Port error types for adapters over host-store state

pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use temporal::{Clock, DateRangeFilter, FixedClock, SystemClock, TemporalError, Timezone};
pub use identifiers::{EntryId, EventId, IdError, VendorId};
pub use ports::{DomainPort, PortError};
pub use error::CoreError;
