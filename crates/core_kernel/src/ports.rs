//! Ports and Adapters Infrastructure
//!
//! Domain crates define port traits for everything they read from or write
//! to the host marketplace (ledger tables, option storage, user meta). The
//! traits extend the `DomainPort` marker and report failures through the
//! shared `PortError`, so adapters backed by a database, a remote API or an
//! in-memory map are interchangeable.
//!
//! ```text
//!            ┌──────────────────────────────┐
//!            │   Calculators / Services     │
//!            └──────────────┬───────────────┘
//!                           ▼
//!            ┌──────────────────────────────┐
//!            │  Port traits (per domain)    │
//!            └───────┬──────────────┬───────┘
//!                    ▲              ▲
//!          ┌─────────┴───┐   ┌──────┴────────┐
//!          │ Host store  │   │  In-memory    │
//!          │  adapter    │   │  adapter      │
//!          └─────────────┘   └───────────────┘
//! ```

use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// ensuring consistent error handling across adapters.
#[derive(Debug, Error)]
pub enum PortError {
    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// The backing system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },
}

impl PortError {
    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Connection error wrapping the driver's error
    pub fn connection_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error indicates a transient failure
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared behind `Arc` and may be called from any thread.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_transient() {
        let timeout = PortError::Timeout {
            operation: "get_balance".to_string(),
            duration_ms: 5000,
        };
        assert!(timeout.is_transient());
        assert!(PortError::connection("refused").is_transient());
        assert!(timeout.to_string().contains("get_balance"));
    }

    #[test]
    fn test_connection_with_source_keeps_cause() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        let error = PortError::connection_with_source("ledger read failed", io);
        assert_eq!(error.source().map(|s| s.to_string()), Some("socket closed".to_string()));
    }
}
