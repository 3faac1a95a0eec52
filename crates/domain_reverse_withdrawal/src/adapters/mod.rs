//! In-memory adapters for the reverse withdrawal ports
//!
//! These back the ports with process-local maps guarded by std locks. They
//! are complete implementations, used by tests and by embedders that keep
//! the ledger in memory.

pub mod ledger;
pub mod stores;
pub mod events;

pub use ledger::InMemoryLedger;
pub use stores::{InMemoryFailedActionsStore, InMemoryThresholdStore, StaticIdentity};
pub use events::InMemoryEventBus;
