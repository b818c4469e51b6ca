//! # JSON File Store
//!
//! A generic record store over a single JSON array file.
//!
//! ## Access Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       JsonFileStore<T>                                  │
//! │                                                                         │
//! │  Every operation:                                                       │
//! │    1. take the store mutex (serializes ALL file access)                 │
//! │    2. read + parse the whole file (missing file = empty list)           │
//! │    3. for writes: mutate the list, rewrite the whole file               │
//! │                                                                         │
//! │  Read-modify-write is atomic with respect to other store callers.       │
//! │  Record ORDER is preserved: appends go to the end, updates keep         │
//! │  their position - ordering is meaningful for rule priority.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Whole-file rewrites are fine at this scale: the files are small,
//! hand-editable development catalogs, not a database.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A record with an integer identity.
///
/// Identity drives duplicate detection on add and targeting on
/// update/delete.
pub trait Record {
    /// The record's unique identity within its file.
    fn record_id(&self) -> i32;
}

/// Generic store over a single JSON array file.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,

    /// Serializes every read-modify-write cycle.
    lock: Mutex<()>,

    _record: PhantomData<T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Record,
{
    /// Creates a store over the given file path.
    ///
    /// The file does not have to exist yet; a missing file reads as an
    /// empty record list and is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns every record, in file order.
    pub fn load(&self) -> StoreResult<Vec<T>> {
        let _guard = self.lock.lock().expect("file store mutex poisoned");
        self.read_unlocked()
    }

    /// Appends a record; fails if its identity already exists.
    pub fn add(&self, record: T) -> StoreResult<()> {
        let _guard = self.lock.lock().expect("file store mutex poisoned");
        let mut records = self.read_unlocked()?;

        if records.iter().any(|r| r.record_id() == record.record_id()) {
            return Err(StoreError::Duplicate {
                id: record.record_id(),
            });
        }

        records.push(record);
        self.write_unlocked(&records)
    }

    /// Replaces the record with the same identity, keeping its position.
    pub fn update(&self, record: T) -> StoreResult<()> {
        let _guard = self.lock.lock().expect("file store mutex poisoned");
        let mut records = self.read_unlocked()?;

        match records
            .iter_mut()
            .find(|r| r.record_id() == record.record_id())
        {
            Some(slot) => *slot = record,
            None => {
                return Err(StoreError::NotFound {
                    id: record.record_id(),
                })
            }
        }

        self.write_unlocked(&records)
    }

    /// Deletes the record with the given identity.
    pub fn delete(&self, id: i32) -> StoreResult<()> {
        let _guard = self.lock.lock().expect("file store mutex poisoned");
        let mut records = self.read_unlocked()?;

        let before = records.len();
        records.retain(|r| r.record_id() != id);
        if records.len() == before {
            return Err(StoreError::NotFound { id });
        }

        self.write_unlocked(&records)
    }

    /// Reads and parses the file. Caller must hold the lock.
    fn read_unlocked(&self) -> StoreResult<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Serializes and rewrites the file. Caller must hold the lock.
    fn write_unlocked(&self, records: &[T]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), count = records.len(), "record file written");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        id: i32,
        label: String,
    }

    impl Record for TestRecord {
        fn record_id(&self) -> i32 {
            self.id
        }
    }

    fn rec(id: i32, label: &str) -> TestRecord {
        TestRecord {
            id,
            label: label.to_string(),
        }
    }

    fn store() -> (tempfile::TempDir, JsonFileStore<TestRecord>) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("records.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_add_then_load_round_trips() {
        let (_dir, store) = store();
        store.add(rec(1, "one")).unwrap();
        store.add(rec(2, "two")).unwrap();

        assert_eq!(store.load().unwrap(), vec![rec(1, "one"), rec(2, "two")]);
    }

    #[test]
    fn test_add_duplicate_identity_fails() {
        let (_dir, store) = store();
        store.add(rec(1, "one")).unwrap();

        let err = store.add(rec(1, "other")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { id: 1 }));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_update_keeps_position() {
        let (_dir, store) = store();
        store.add(rec(1, "one")).unwrap();
        store.add(rec(2, "two")).unwrap();

        store.update(rec(1, "first")).unwrap();

        // Position matters: ordering is rule priority for rule records
        assert_eq!(store.load().unwrap(), vec![rec(1, "first"), rec(2, "two")]);
    }

    #[test]
    fn test_update_and_delete_absent_record_fail() {
        let (_dir, store) = store();

        assert!(matches!(
            store.update(rec(9, "x")).unwrap_err(),
            StoreError::NotFound { id: 9 }
        ));
        assert!(matches!(
            store.delete(9).unwrap_err(),
            StoreError::NotFound { id: 9 }
        ));
    }

    #[test]
    fn test_delete_removes_record() {
        let (_dir, store) = store();
        store.add(rec(1, "one")).unwrap();
        store.add(rec(2, "two")).unwrap();

        store.delete(1).unwrap();
        assert_eq!(store.load().unwrap(), vec![rec(2, "two")]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let (_dir, store) = store();
        fs::write(store.path(), "not json").unwrap();

        assert!(matches!(store.load().unwrap_err(), StoreError::Malformed(_)));
    }
}
