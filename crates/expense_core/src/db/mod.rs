//! SQLite bootstrap for the on-device key-value table.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the expense core.
//! - Ensure the key-value table exists before a connection is handed out.
//!
//! # Invariants
//! - Table creation is idempotent (`CREATE TABLE IF NOT EXISTS`).
//! - There is no schema versioning; the table shape is fixed.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
