//! Persisted expense ledger.
//!
//! # Responsibility
//! - Own the ordered record list and mirror it to a key-value store.
//! - Encode/decode full-list snapshots.
//!
//! # Invariants
//! - Every successful mutation writes one full snapshot; nothing is batched.
//! - Persistence failures never undo an in-memory mutation.

pub mod codec;
pub mod expense_ledger;

pub use codec::{decode_records, encode_records, CodecError, CodecResult};
pub use expense_ledger::{
    ExpenseLedger, Hydration, LedgerError, LedgerResult, PersistOutcome, DEFAULT_LEDGER_KEY,
};
