//! Domain model for the expense tracker.
//!
//! # Responsibility
//! - Define the record shape shared by the ledger, codec and UI projections.
//!
//! # Invariants
//! - Every record is identified by a stable `ExpenseId`.
//! - Field contents are accepted as given; no domain validation is applied.

pub mod expense;
