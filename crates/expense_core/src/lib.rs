//! Core logic for the expense tracker.
//! Owns the ledger, its persistence contract and the ambient runtime setup.

pub mod config;
pub mod db;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod store;

pub use config::StoreConfig;
pub use ledger::{
    ExpenseLedger, Hydration, LedgerError, LedgerResult, PersistOutcome, DEFAULT_LEDGER_KEY,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::expense::{ExpenseId, ExpenseRecord};
pub use store::{InMemoryStore, KeyValueStore, SqliteKvStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
