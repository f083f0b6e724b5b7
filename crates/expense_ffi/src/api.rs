//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the process-wide expense ledger to Dart via FRB.
//! - Serialize access from any calling thread through one mutex.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Exactly one ledger instance exists per process; it is opened lazily on
//!   first use and reused afterwards.
//! - A ledger whose store could not be read is never cached; the call fails
//!   and the next call reads again.
//! - Persistence failures do not fail add/remove; they only change `message`.

use expense_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ExpenseLedger, ExpenseRecord, KeyValueStore, PersistOutcome, SqliteKvStore, StoreConfig,
};
use log::{info, warn};
use std::collections::BTreeSet;
use std::sync::{Mutex, OnceLock, PoisonError};

type SharedLedger = ExpenseLedger<SqliteKvStore>;

static STORE_CONFIG: OnceLock<StoreConfig> = OnceLock::new();
static LEDGER: OnceLock<Mutex<Option<SharedLedger>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One expense row as rendered by the list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseItemView {
    /// Stable record ID in string form.
    pub id: String,
    pub name: String,
    pub category: String,
    pub amount: f64,
}

/// Rows and total read under a single lock, so they always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    pub items: Vec<ExpenseItemView>,
    pub total: f64,
    /// Empty on success; error text when the ledger could not be opened.
    pub message: String,
}

/// Result envelope for add/remove actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerActionResponse {
    /// Whether the in-memory ledger changed.
    pub ok: bool,
    /// ID of the created record, for `ledger_add` only.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl LedgerActionResponse {
    fn success(message: String, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Returns all rows in insertion order plus their total.
///
/// # FFI contract
/// - Sync call, may open the on-device database on first use.
/// - Never panics; on open failure returns no rows and a message.
#[flutter_rust_bridge::frb(sync)]
pub fn ledger_snapshot() -> LedgerSnapshot {
    match with_ledger(|ledger| {
        (
            ledger.records().iter().map(to_item_view).collect::<Vec<_>>(),
            ledger.total(),
        )
    }) {
        Ok((items, total)) => LedgerSnapshot {
            items,
            total,
            message: String::new(),
        },
        Err(err) => LedgerSnapshot {
            items: Vec::new(),
            total: 0.0,
            message: format!("ledger_snapshot failed: {err}"),
        },
    }
}

/// Returns the running total; `0.0` when the ledger cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn ledger_total() -> f64 {
    with_ledger(|ledger| ledger.total()).unwrap_or(0.0)
}

/// Appends an expense and writes the ledger through to storage.
///
/// # FFI contract
/// - Inputs are stored as given; no trimming or validation.
/// - Never panics.
/// - Returns the created record ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn ledger_add(name: String, category: String, amount: f64) -> LedgerActionResponse {
    let record = ExpenseRecord::new(name, category, amount);
    let id = record.id.to_string();
    match with_ledger(|ledger| {
        ledger.add(record);
        persist_message("Expense added.", ledger.last_persist())
    }) {
        Ok(message) => LedgerActionResponse::success(message, Some(id)),
        Err(err) => LedgerActionResponse::failure(format!("ledger_add failed: {err}")),
    }
}

/// Removes the rows at `indices` (positions before removal) in one step.
///
/// # FFI contract
/// - Any out-of-range index fails the whole call and removes nothing.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn ledger_remove(indices: Vec<u32>) -> LedgerActionResponse {
    let positions = indices
        .into_iter()
        .map(|index| index as usize)
        .collect::<BTreeSet<_>>();
    let removed = positions.len();
    match with_ledger(|ledger| {
        ledger
            .remove_at(&positions)
            .map(|()| persist_message(&format!("Removed {removed} expense(s)."), ledger.last_persist()))
    }) {
        Ok(Ok(message)) => LedgerActionResponse::success(message, None),
        Ok(Err(err)) => LedgerActionResponse::failure(format!("ledger_remove failed: {err}")),
        Err(err) => LedgerActionResponse::failure(format!("ledger_remove failed: {err}")),
    }
}

fn persist_message(done: &str, outcome: Option<&PersistOutcome>) -> String {
    match outcome {
        Some(PersistOutcome::Failed { reason }) => format!("{done} Not saved: {reason}"),
        _ => done.to_string(),
    }
}

fn resolve_store_config() -> &'static StoreConfig {
    STORE_CONFIG.get_or_init(StoreConfig::from_env)
}

fn with_ledger<T>(f: impl FnOnce(&mut SharedLedger) -> T) -> Result<T, String> {
    let slot = LEDGER.get_or_init(|| Mutex::new(None));
    // A panic while holding the lock leaves the ledger itself consistent.
    let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);

    if guard.is_none() {
        let config = resolve_store_config();
        let store = SqliteKvStore::open(&config.db_path)
            .map_err(|err| format!("ledger store open failed: {err}"))?;
        let ledger = writable_ledger(ExpenseLedger::initialize_with_key(
            store,
            config.ledger_key.as_str(),
        ))?;
        info!(
            "event=ledger_open module=ffi status=ok records={}",
            ledger.len()
        );
        *guard = Some(ledger);
    }

    guard
        .as_mut()
        .map(f)
        .ok_or_else(|| "ledger unavailable".to_string())
}

fn writable_ledger<S: KeyValueStore>(
    ledger: ExpenseLedger<S>,
) -> Result<ExpenseLedger<S>, String> {
    if ledger.hydration().allows_writes() {
        return Ok(ledger);
    }
    warn!(
        "event=ledger_open module=ffi status=error error_code=store_unreadable key={}",
        ledger.key()
    );
    Err(format!("ledger store unreadable: {:?}", ledger.hydration()))
}

fn to_item_view(record: &ExpenseRecord) -> ExpenseItemView {
    ExpenseItemView {
        id: record.id.to_string(),
        name: record.name.clone(),
        category: record.category.clone(),
        amount: record.amount,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ledger_add, ledger_remove, ledger_snapshot, ledger_total,
        ping, writable_ledger,
    };
    use expense_core::{
        ExpenseLedger, ExpenseRecord, InMemoryStore, KeyValueStore, StoreError, StoreResult,
    };
    use std::cell::Cell;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Store that fails the first read, then serves `inner`.
    #[derive(Default)]
    struct BusyOnceStore {
        inner: InMemoryStore,
        busy: Cell<bool>,
    }

    impl KeyValueStore for BusyOnceStore {
        fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
            if self.busy.replace(false) {
                return Err(StoreError::from(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
                    Some("database is locked".to_string()),
                )));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
            self.inner.set(key, value)
        }
    }

    #[test]
    fn unreadable_store_is_not_adopted_and_next_open_restores() {
        let store = BusyOnceStore::default();
        {
            let mut seed = ExpenseLedger::initialize(&store);
            seed.add(ExpenseRecord::new("Rent", "Housing", 20.0));
            seed.add(ExpenseRecord::new("Bus", "Transport", 10.0));
        }
        store.busy.set(true);

        let error = writable_ledger(ExpenseLedger::initialize(&store))
            .err()
            .expect("unreadable ledger must be rejected");
        assert!(error.contains("database is locked"), "{error}");

        let ledger = writable_ledger(ExpenseLedger::initialize(&store))
            .expect("second read should succeed");
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.total(), 30.0);
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn ledger_add_returns_id_and_appears_in_snapshot() {
        let name = unique_token("ffi-add");
        let response = ledger_add(name.clone(), "Food".to_string(), 4.5);
        assert!(response.ok, "{}", response.message);
        let id = response.id.expect("add should return id");
        uuid::Uuid::parse_str(&id).expect("id should be a uuid");

        let snapshot = ledger_snapshot();
        assert!(snapshot.message.is_empty(), "{}", snapshot.message);
        let item = snapshot
            .items
            .iter()
            .find(|item| item.id == id)
            .expect("added item should be listed");
        assert_eq!(item.name, name);
        assert_eq!(item.category, "Food");
        assert_eq!(item.amount, 4.5);
    }

    #[test]
    fn snapshot_total_matches_listed_items() {
        ledger_add(unique_token("ffi-total"), "Transport".to_string(), 2.25);

        let snapshot = ledger_snapshot();
        let sum = snapshot
            .items
            .iter()
            .fold(0.0, |sum, item| sum + item.amount);
        assert_eq!(snapshot.total, sum);
        assert!(ledger_total().is_finite());
    }

    #[test]
    fn ledger_remove_deletes_added_row() {
        let response = ledger_add(unique_token("ffi-remove"), "Misc".to_string(), 1.0);
        let id = response.id.expect("add should return id");
        let index = ledger_snapshot()
            .items
            .iter()
            .position(|item| item.id == id)
            .expect("added item should be listed");

        let removed = ledger_remove(vec![index as u32]);
        assert!(removed.ok, "{}", removed.message);
        assert!(ledger_snapshot().items.iter().all(|item| item.id != id));
    }

    #[test]
    fn ledger_remove_rejects_out_of_range_index() {
        let response = ledger_remove(vec![u32::MAX]);
        assert!(!response.ok);
        assert!(response.message.contains("out of range"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
