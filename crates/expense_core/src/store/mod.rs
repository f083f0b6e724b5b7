//! Key-value persistence contracts and backends.
//!
//! # Responsibility
//! - Define the get/set blob contract the ledger persists through.
//! - Provide an in-memory backend and an on-device SQLite backend.
//!
//! # Invariants
//! - `set` overwrites any prior value under the key.
//! - `get` returns `None` for keys never written.

pub mod kv_store;
pub mod sqlite_store;

pub use kv_store::{InMemoryStore, KeyValueStore, StoreError, StoreResult};
pub use sqlite_store::SqliteKvStore;
