//! Storage Port Adapter
//!
//! Bridges the application's ports and a `KeyValueStore`. The adapter holds
//! no state besides the store, the outbound sink and the channel names; each
//! inbound message is a complete read-through or write-through operation.
//!
//! # Guarantees
//!
//! ## getItem
//! - Exactly one `ItemReceived` is sent per request
//! - Absent key, unparseable text, stored `null` and a failing read all
//!   reply with `value = null`; the cause is logged, never returned
//!
//! ## setItem
//! - `null` removes the key (removing an absent key succeeds)
//! - Any other value is stored as compact JSON text, replacing the old entry
//! - No reply is sent; store failures are returned to the caller unchanged

use std::sync::mpsc::Receiver;

use serde_json::Value;
use storage_ports_ipc::{ChannelNames, ItemReceived, PortRequest, SetItem};

use crate::error::PortError;
use crate::sink::PortSink;
use crate::store::KeyValueStore;

/// Adapter between application ports and a synchronous key-value store.
pub struct StoragePortAdapter<S, K> {
    /// Backing store (injected, never reached through a global)
    store: S,
    /// Outbound `receiveItem` channel
    sink: K,
    /// Names used to decode messages handed to `handle_message`
    names: ChannelNames,
}

impl<S: KeyValueStore, K: PortSink> StoragePortAdapter<S, K> {
    /// Create an adapter listening on the default channel names.
    pub fn new(store: S, sink: K) -> Self {
        Self::with_channels(store, sink, ChannelNames::default())
    }

    /// Create an adapter listening on the application's channel names.
    pub fn with_channels(store: S, sink: K, names: ChannelNames) -> Self {
        Self { store, sink, names }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The outbound sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Channel names this adapter decodes.
    pub fn channel_names(&self) -> &ChannelNames {
        &self.names
    }

    /// Read and decode the value stored under `key`.
    ///
    /// Every failure collapses to `None`.
    pub fn read_value(&self, key: &str) -> Option<Value> {
        let raw = match self.store.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                self.sink.debug_write(&format!(
                    "[storage-ports] read failed for key={:?}: {} - replying null",
                    key, e
                ));
                return None;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(e) => {
                self.sink.debug_write(&format!(
                    "[storage-ports] unreadable value for key={:?} ({} bytes): {} - replying null",
                    key,
                    raw.len(),
                    e
                ));
                None
            }
        }
    }

    /// Handle `getItem(key)`: reply with the stored value on `receiveItem`.
    ///
    /// Only a failure of the outbound channel itself is returned.
    pub fn handle_get(&self, key: &str) -> Result<(), PortError> {
        let reply = ItemReceived::new(key, self.read_value(key));
        self.sink.send(&reply)
    }

    /// Handle `setItem([key, value])`: store `value`, or delete `key` when
    /// `value` is `None`.
    pub fn handle_set(&self, key: &str, value: Option<&Value>) -> Result<(), PortError> {
        let value = value.filter(|v| !v.is_null());
        let result = match value {
            None => self.store.remove(key),
            Some(value) => {
                let raw = serde_json::to_string(value)?;
                self.store.write(key, &raw)
            }
        };

        result.map_err(|e| {
            let op = if value.is_some() { "write" } else { "remove" };
            self.sink.debug_write(&format!(
                "[storage-ports] {} failed for key={:?}: {}",
                op, key, e
            ));
            PortError::from(e)
        })
    }

    /// Apply a decoded `setItem` request.
    pub fn apply(&self, item: &SetItem) -> Result<(), PortError> {
        self.handle_set(&item.key, item.value.as_ref())
    }

    /// Route a decoded request to its handler.
    pub fn dispatch(&self, request: &PortRequest) -> Result<(), PortError> {
        match request {
            PortRequest::GetItem(key) => self.handle_get(key),
            PortRequest::SetItem(item) => self.apply(item),
        }
    }

    /// Decode a JSON payload that arrived on `channel` and handle it.
    pub fn handle_message(&self, channel: &str, payload_json: &str) -> Result<(), PortError> {
        let request = PortRequest::decode_with(&self.names, channel, payload_json).map_err(|e| {
            self.sink
                .debug_write(&format!("[storage-ports] dropping message: {}", e));
            PortError::from(e)
        })?;
        self.dispatch(&request)
    }

    /// Handle every request currently queued in `inbox` (non-blocking).
    ///
    /// Requests run one at a time in arrival order. Stops at the first
    /// error; requests after it stay queued.
    ///
    /// # Returns
    /// * `Ok(count)` - Number of requests handled
    /// * `Err(PortError)` - The failing request's error
    pub fn pump(&self, inbox: &Receiver<PortRequest>) -> Result<usize, PortError> {
        let mut handled = 0;
        while let Ok(request) = inbox.try_recv() {
            self.dispatch(&request)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Handle requests from `inbox` until every sender is dropped (blocking).
    pub fn run(&self, inbox: &Receiver<PortRequest>) -> Result<usize, PortError> {
        let mut handled = 0;
        for request in inbox.iter() {
            self.dispatch(&request)?;
            handled += 1;
        }
        self.sink.debug_write(&format!(
            "[storage-ports] inbox closed after {} requests",
            handled
        ));
        Ok(handled)
    }
}
