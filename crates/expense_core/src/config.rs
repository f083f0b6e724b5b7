//! Runtime configuration for locating the ledger's storage.
//!
//! # Responsibility
//! - Resolve where the on-device database lives and which key holds the ledger.
//!
//! # Invariants
//! - A blank `EXPENSE_DB_PATH` is treated as unset.

use crate::ledger::DEFAULT_LEDGER_KEY;
use std::path::PathBuf;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "EXPENSE_DB_PATH";
const DEFAULT_DB_FILE_NAME: &str = "expense_ledger.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub ledger_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            ledger_key: DEFAULT_LEDGER_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Builds config from the process environment.
    pub fn from_env() -> Self {
        Self::from_db_path_override(std::env::var(DB_PATH_ENV).ok())
    }

    fn from_db_path_override(raw: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = raw {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                config.db_path = PathBuf::from(trimmed);
            }
        }
        config
    }
}
