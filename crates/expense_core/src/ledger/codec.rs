//! Snapshot codec for the ledger's record list.
//!
//! Snapshots are a JSON array of `{ "id", "name", "type", "amount" }` objects.

use crate::model::expense::ExpenseRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
    /// JSON has no representation for NaN or infinities.
    NonFiniteAmount { index: usize },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "{err}"),
            Self::NonFiniteAmount { index } => {
                write!(f, "record at position {index} has a non-finite amount")
            }
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NonFiniteAmount { .. } => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Encodes the full record list.
///
/// # Errors
/// - `NonFiniteAmount` when any amount is NaN or infinite. serde_json would
///   otherwise write `null`, which can never be read back.
pub fn encode_records(records: &[ExpenseRecord]) -> CodecResult<Vec<u8>> {
    if let Some(index) = records.iter().position(|record| !record.amount.is_finite()) {
        return Err(CodecError::NonFiniteAmount { index });
    }
    Ok(serde_json::to_vec(records)?)
}

/// Decodes a snapshot produced by `encode_records`.
pub fn decode_records(bytes: &[u8]) -> CodecResult<Vec<ExpenseRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}
