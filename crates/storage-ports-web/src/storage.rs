//! Browser storage backend
//!
//! Implements `KeyValueStore` over the Web Storage API (`localStorage` or
//! `sessionStorage`). All calls are synchronous; exceptions raised by the
//! browser are mapped to `StoreError`.

use storage_ports_core::{KeyValueStore, StorageArea, StoreError};
use wasm_bindgen::prelude::*;

use crate::util::{js_error_message, string_property};

/// Web Storage area used as the adapter's backing store.
pub struct BrowserStorage {
    storage: web_sys::Storage,
    area: StorageArea,
}

impl BrowserStorage {
    /// Open the storage area on the current window.
    ///
    /// # Returns
    /// * `Ok(BrowserStorage)` - Area is accessible
    /// * `Err(StoreError::Unavailable)` - No window, or storage disabled by policy
    pub fn open(area: StorageArea) -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        let storage = match area {
            StorageArea::Local => window.local_storage(),
            StorageArea::Session => window.session_storage(),
        };

        match storage {
            Ok(Some(storage)) => Ok(Self { storage, area }),
            Ok(None) => Err(StoreError::Unavailable),
            Err(e) => Err(map_js_error(&e)),
        }
    }

    /// Which area this store writes to.
    pub fn area(&self) -> StorageArea {
        self.area
    }
}

/// Map a Web Storage exception to a store error.
fn map_js_error(err: &JsValue) -> StoreError {
    match string_property(err, "name").as_deref() {
        Some("QuotaExceededError") | Some("NS_ERROR_DOM_QUOTA_REACHED") => {
            StoreError::QuotaExceeded
        }
        Some("SecurityError") => StoreError::Unavailable,
        _ => StoreError::backend(js_error_message(err)),
    }
}

impl KeyValueStore for BrowserStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(|e| map_js_error(&e))
    }

    fn write(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, raw).map_err(|e| map_js_error(&e))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(|e| map_js_error(&e))
    }
}
