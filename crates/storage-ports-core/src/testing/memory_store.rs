//! In-memory store implementation for testing.
//!
//! Provides a BTreeMap-based store that doesn't persist data, with optional
//! failure injection to exercise the adapter's error paths.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// In-memory key-value store for testing.
#[derive(Default)]
pub struct MemoryStore {
    /// Raw entries (key -> stored text)
    entries: RefCell<BTreeMap<String, String>>,
    /// Error returned by every read while set
    read_failure: RefCell<Option<StoreError>>,
    /// Error returned by every write and remove while set
    write_failure: RefCell<Option<StoreError>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw text under `key`, bypassing JSON encoding.
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.entries
            .borrow_mut()
            .insert(String::from(key), String::from(raw));
    }

    /// Raw text stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Whether an entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Make every subsequent read fail with `err`.
    pub fn fail_reads(&self, err: StoreError) {
        *self.read_failure.borrow_mut() = Some(err);
    }

    /// Make every subsequent write and remove fail with `err`.
    pub fn fail_writes(&self, err: StoreError) {
        *self.write_failure.borrow_mut() = Some(err);
    }

    /// Clear injected failures.
    pub fn heal(&self) {
        self.read_failure.borrow_mut().take();
        self.write_failure.borrow_mut().take();
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        match self.write_failure.borrow().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(err) = self.read_failure.borrow().as_ref() {
            return Err(err.clone());
        }
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.insert_raw(key, raw);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
