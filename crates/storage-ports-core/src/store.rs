//! Key-value store trait.
//!
//! The store holds raw strings. Encoding values as JSON is the adapter's job.
//!
//! Implementations: browser `localStorage`/`sessionStorage`
//! (`storage-ports-web`), `MemoryStore` for tests.

use crate::error::StoreError;

/// Synchronous string key-value store.
///
/// Methods take `&self`: backends are either handles to host storage or use
/// interior mutability. Callers never hold two operations open at once.
pub trait KeyValueStore {
    /// Read the raw text stored under `key`.
    ///
    /// # Returns
    /// * `Ok(Some(raw))` - Entry exists
    /// * `Ok(None)` - No entry for `key`
    /// * `Err(StoreError)` - Backend could not be read
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `raw` under `key`, replacing any previous entry.
    fn write(&self, key: &str, raw: &str) -> Result<(), StoreError>;

    /// Remove the entry for `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        (**self).write(key, raw)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
