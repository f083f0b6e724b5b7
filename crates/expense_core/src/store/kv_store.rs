//! Key-value store contract and in-memory implementation.

use crate::db::DbError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a key-value backend.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Opaque blob storage addressed by string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// Process-local store backed by a hash map.
///
/// Single-threaded; wrap the owning ledger in a mutex to share it.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryStore, KeyValueStore};

    #[test]
    fn missing_key_reads_as_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("Items").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let store = InMemoryStore::new();
        store.set("Items", b"first").unwrap();
        store.set("Items", b"second").unwrap();

        assert_eq!(store.get("Items").unwrap().as_deref(), Some(&b"second"[..]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn borrowed_store_delegates_to_owner() {
        let store = InMemoryStore::new();
        let borrowed = &store;
        borrowed.set("Tap", b"3").unwrap();

        assert_eq!(store.get("Tap").unwrap().as_deref(), Some(&b"3"[..]));
    }
}
