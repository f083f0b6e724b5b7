//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `expense_core` linkage outside the mobile runtime.
//! - Report the state of the configured on-device ledger.

use expense_core::{ExpenseLedger, Hydration, SqliteKvStore, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("expense_core ping={}", expense_core::ping());
    println!("expense_core version={}", expense_core::core_version());

    let config = StoreConfig::from_env();
    println!(
        "ledger db_path={} key={}",
        config.db_path.display(),
        config.ledger_key
    );

    let store = match SqliteKvStore::open(&config.db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("ledger open failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let ledger = ExpenseLedger::initialize_with_key(store, config.ledger_key.as_str());

    let source = match ledger.hydration() {
        Hydration::Empty => "empty".to_string(),
        Hydration::Restored { count } => format!("restored({count})"),
        Hydration::Discarded { reason } => format!("discarded({reason})"),
        Hydration::Unreadable { reason } => format!("unreadable({reason})"),
    };
    println!(
        "ledger source={} records={} total={:.2}",
        source,
        ledger.len(),
        ledger.total()
    );
    ExitCode::SUCCESS
}
