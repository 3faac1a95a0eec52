//! Strongly-typed identifiers for domain entities
//!
//! Vendors are keyed by the host store's positive integer user ids, so
//! those are wrapped in a numeric newtype.
//! Records owned by this workspace (ledger entries, events) use UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a numeric identifier cannot be parsed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("{kind} id must be a positive integer, got {value:?}")]
    NotPositive { kind: &'static str, value: String },
}

macro_rules! define_numeric_id {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u64", into = "u64")]
        pub struct $name(NonZeroU64);

        impl $name {
            /// Creates the identifier, returning `None` for zero
            pub fn new(value: u64) -> Option<Self> {
                NonZeroU64::new(value).map(Self)
            }

            /// Returns the raw integer value
            pub fn get(&self) -> u64 {
                self.0.get()
            }

            /// Returns the identifier kind for messages
            pub fn kind() -> &'static str {
                $kind
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<u64> for $name {
            type Error = IdError;

            fn try_from(value: u64) -> Result<Self, Self::Error> {
                Self::new(value).ok_or_else(|| IdError::NotPositive {
                    kind: $kind,
                    value: value.to_string(),
                })
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                u64::try_from(value)
                    .ok()
                    .and_then(Self::new)
                    .ok_or_else(|| IdError::NotPositive {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.get()
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .ok()
                    .and_then(Self::new)
                    .ok_or_else(|| IdError::NotPositive {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

macro_rules! define_uuid_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

// Marketplace identifiers
define_numeric_id!(VendorId, "vendor");

// Identifiers owned by this workspace
define_uuid_id!(EntryId, "RWE");
define_uuid_id!(EventId, "EVT");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_id_rejects_zero() {
        assert!(VendorId::new(0).is_none());
        assert_eq!(VendorId::new(7).map(|v| v.get()), Some(7));
    }

    #[test]
    fn test_entry_id_display() {
        let id = EntryId::new();
        assert!(id.to_string().starts_with("RWE-"));
    }

    #[test]
    fn test_uuid_id_parsing() {
        let original = EventId::new_v7();
        let parsed: EventId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }
}
