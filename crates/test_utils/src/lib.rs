//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! reverse withdrawal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates, vendors and settings
//! - `builders`: Ledger and calculator builders with sensible defaults
//! - `doubles`: Port implementations that fail or count calls
//! - `assertions`: Assertion helpers for due statuses
//! - `generators`: Property-based test data generators
//! - `logging`: One-time tracing subscriber for tests

pub mod fixtures;
pub mod builders;
pub mod doubles;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use doubles::*;
pub use assertions::*;
pub use generators::*;
pub use logging::*;
