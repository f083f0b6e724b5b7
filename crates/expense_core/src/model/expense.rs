//! Expense record model.
//!
//! # Responsibility
//! - Define the canonical expense entry stored by the ledger.
//! - Fix the wire field names used in persisted snapshots.
//!
//! # Invariants
//! - `id` is generated once at creation and never reused or rewritten.
//! - `amount` may carry any sign or magnitude; zero and negatives are kept.
//! - `name` and `category` are free-form and may be empty.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an expense record.
pub type ExpenseId = Uuid;

/// One expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    /// Display label shown as the row headline.
    pub name: String,
    /// Serialized as `type` to stay readable by data already on device.
    #[serde(rename = "type")]
    pub category: String,
    pub amount: f64,
}

impl ExpenseRecord {
    /// Creates a record with a freshly generated id.
    pub fn new(name: impl Into<String>, category: impl Into<String>, amount: f64) -> Self {
        Self::with_id(Uuid::new_v4(), name, category, amount)
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used when identity already exists, e.g. records restored from storage.
    pub fn with_id(
        id: ExpenseId,
        name: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            amount,
        }
    }
}
