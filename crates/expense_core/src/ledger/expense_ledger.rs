//! Expense ledger with write-through persistence.
//!
//! # Responsibility
//! - Hold the authoritative, insertion-ordered record list.
//! - Write a full snapshot to the store after every successful mutation.
//! - Derive the running total on demand.
//!
//! # Invariants
//! - Hydration never fails: a missing, unreadable or undecodable snapshot
//!   yields an empty ledger and is reported through `hydration()`.
//! - A ledger whose store could not be read never writes, so a snapshot that
//!   may still be intact is not overwritten with a partial list.
//! - Persistence is attempted at most once per mutation and its failure is
//!   reported through `last_persist()`, never returned to the caller.
//! - `remove_at` validates every position before removing anything.

use super::codec::{decode_records, encode_records};
use crate::model::expense::ExpenseRecord;
use crate::store::KeyValueStore;
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Storage key the ledger snapshot lives under unless configured otherwise.
pub const DEFAULT_LEDGER_KEY: &str = "Items";

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Caller-visible ledger failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for ledger of {len} record(s)")
            }
        }
    }
}

impl Error for LedgerError {}

/// How the initial record list was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// Nothing stored under the key.
    Empty,
    Restored { count: usize },
    /// Stored snapshot could not be decoded; started empty.
    Discarded { reason: String },
    /// The store failed the read; started empty with write-through disabled.
    Unreadable { reason: String },
}

impl Hydration {
    /// Whether snapshots may be written for a ledger hydrated this way.
    pub fn allows_writes(&self) -> bool {
        !matches!(self, Self::Unreadable { .. })
    }
}

/// Result of the most recent snapshot write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Written { bytes: usize },
    Failed { reason: String },
}

/// Ordered expense records mirrored to a key-value store.
pub struct ExpenseLedger<S: KeyValueStore> {
    store: S,
    key: String,
    records: Vec<ExpenseRecord>,
    hydration: Hydration,
    last_persist: Option<PersistOutcome>,
}

impl<S: KeyValueStore> ExpenseLedger<S> {
    /// Loads the ledger stored under `DEFAULT_LEDGER_KEY`.
    pub fn initialize(store: S) -> Self {
        Self::initialize_with_key(store, DEFAULT_LEDGER_KEY)
    }

    /// Loads the ledger stored under `key`.
    ///
    /// Does not write to the store, even when the stored snapshot is discarded.
    pub fn initialize_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let (records, hydration) = hydrate(&store, &key);
        Self {
            store,
            key,
            records,
            hydration,
            last_persist: None,
        }
    }

    /// Appends a record and persists the full list.
    ///
    /// Field contents are not validated.
    pub fn add(&mut self, record: ExpenseRecord) {
        debug!(
            "event=ledger_add module=ledger status=ok id={} len={}",
            record.id,
            self.records.len() + 1
        );
        self.records.push(record);
        self.persist();
    }

    /// Removes every record at `positions` and persists the full list.
    ///
    /// Positions refer to the list as it was before this call.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when any position is `>= len()`; nothing is removed
    ///   or written in that case.
    pub fn remove_at(&mut self, positions: &BTreeSet<usize>) -> LedgerResult<()> {
        let len = self.records.len();
        if let Some(&index) = positions.iter().find(|&&index| index >= len) {
            warn!(
                "event=ledger_remove module=ledger status=error error_code=index_out_of_range index={} len={}",
                index, len
            );
            return Err(LedgerError::IndexOutOfRange { index, len });
        }

        for &index in positions.iter().rev() {
            self.records.remove(index);
        }
        debug!(
            "event=ledger_remove module=ledger status=ok removed={} len={}",
            positions.len(),
            self.records.len()
        );
        self.persist();
        Ok(())
    }

    /// Sum of all amounts, recomputed on every call.
    pub fn total(&self) -> f64 {
        self.records.iter().fold(0.0, |sum, record| sum + record.amount)
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn hydration(&self) -> &Hydration {
        &self.hydration
    }

    /// Outcome of the latest write; `None` until the first mutation.
    pub fn last_persist(&self) -> Option<&PersistOutcome> {
        self.last_persist.as_ref()
    }

    fn persist(&mut self) {
        if let Hydration::Unreadable { reason } = &self.hydration {
            warn!(
                "event=ledger_persist module=ledger status=error key={} error_code=write_blocked records={}",
                self.key,
                self.records.len()
            );
            self.last_persist = Some(PersistOutcome::Failed {
                reason: format!("write skipped, stored snapshot was never read: {reason}"),
            });
            return;
        }

        let started_at = Instant::now();
        let outcome = match encode_records(&self.records) {
            Ok(bytes) => match self.store.set(&self.key, &bytes) {
                Ok(()) => {
                    info!(
                        "event=ledger_persist module=ledger status=ok key={} records={} bytes={} duration_ms={}",
                        self.key,
                        self.records.len(),
                        bytes.len(),
                        started_at.elapsed().as_millis()
                    );
                    PersistOutcome::Written { bytes: bytes.len() }
                }
                Err(err) => {
                    warn!(
                        "event=ledger_persist module=ledger status=error key={} error_code=store_write_failed error={}",
                        self.key, err
                    );
                    PersistOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            },
            Err(err) => {
                warn!(
                    "event=ledger_persist module=ledger status=error key={} error_code=encode_failed error={}",
                    self.key, err
                );
                PersistOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };
        self.last_persist = Some(outcome);
    }
}

fn hydrate<S: KeyValueStore>(store: &S, key: &str) -> (Vec<ExpenseRecord>, Hydration) {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            info!("event=ledger_hydrate module=ledger status=ok key={key} records=0 source=empty");
            return (Vec::new(), Hydration::Empty);
        }
        Err(err) => {
            warn!(
                "event=ledger_hydrate module=ledger status=error key={} error_code=store_read_failed error={}",
                key, err
            );
            return (
                Vec::new(),
                Hydration::Unreadable {
                    reason: err.to_string(),
                },
            );
        }
    };

    match decode_records(&bytes) {
        Ok(records) => {
            info!(
                "event=ledger_hydrate module=ledger status=ok key={} records={} bytes={} source=store",
                key,
                records.len(),
                bytes.len()
            );
            let count = records.len();
            (records, Hydration::Restored { count })
        }
        Err(err) => {
            warn!(
                "event=ledger_hydrate module=ledger status=error key={} bytes={} error_code=decode_failed error={}",
                key,
                bytes.len(),
                err
            );
            (
                Vec::new(),
                Hydration::Discarded {
                    reason: err.to_string(),
                },
            )
        }
    }
}
