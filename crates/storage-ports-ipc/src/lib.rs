//! Port Protocol for the Storage Ports adapter
//!
//! This crate defines:
//! - **Channel names** shared by the application and the adapter
//! - **Wire messages** carried on those channels
//!
//! It is the **single source of truth** for the port protocol, so the
//! browser bindings and the native dispatch pump agree on names and shapes.
//!
//! # Channels
//!
//! | Channel       | Direction | Payload                              |
//! |---------------|-----------|--------------------------------------|
//! | `getItem`     | inbound   | `"key"`                              |
//! | `receiveItem` | outbound  | `{"key": "key", "value": <json>}`    |
//! | `setItem`     | inbound   | `["key", <json> \| null]`            |
//!
//! A `null` value on `setItem` deletes the key. A `null` value on
//! `receiveItem` means the key is absent or its stored text is unreadable.
//!
//! # Usage
//!
//! ```rust
//! use storage_ports_ipc::{channel, PortRequest};
//!
//! let request = PortRequest::decode(channel::SET_ITEM, r#"["theme", {"mode": "dark"}]"#).unwrap();
//! assert_eq!(request.key(), "theme");
//! ```

#![no_std]

extern crate alloc;

mod error;
mod message;

pub use error::ProtocolError;
pub use message::{ChannelNames, ItemReceived, PortRequest, SetItem};

// =============================================================================
// Channel Names
// =============================================================================

/// Default port names, as declared by the application.
pub mod channel {
    /// Inbound: request the stored value for a key
    pub const GET_ITEM: &str = "getItem";

    /// Outbound: reply carrying a key and its decoded value
    pub const RECEIVE_ITEM: &str = "receiveItem";

    /// Inbound: persist a value, or delete the key when the value is null
    pub const SET_ITEM: &str = "setItem";
}
