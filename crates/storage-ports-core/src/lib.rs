//! Storage Ports Core
//!
//! Connects an application's message ports to a synchronous key-value store:
//!
//! - **Store**: `KeyValueStore` trait over raw string slots (`read`/`write`/`remove`)
//! - **Sink**: `PortSink` trait for the outbound `receiveItem` channel
//! - **Adapter**: `StoragePortAdapter` handling `getItem` and `setItem`
//! - **Config**: `PortConfig` naming the ports and the storage area
//! - **Testing**: `MemoryStore`, an in-memory store for tests
//!
//! # Data Flow
//!
//! ```text
//!   getItem("k") ──► adapter ──► store.read("k") ──► JSON parse ──► receiveItem {k, value}
//!   setItem(["k", v])   ──► adapter ──► store.write("k", JSON text of v)
//!   setItem(["k", null]) ──► adapter ──► store.remove("k")
//! ```
//!
//! Reads never fail because of stored content: an absent key, unreadable text
//! and a store that refuses the read all reply with `value = null`. Writes
//! and removals report store failures to the caller.

pub mod adapter;
pub mod config;
pub mod error;
pub mod sink;
pub mod store;
pub mod testing;

pub use adapter::StoragePortAdapter;
pub use config::{PortConfig, StorageArea};
pub use error::{PortError, StoreError};
pub use sink::{PortSink, RecordingSink};
pub use store::KeyValueStore;
pub use testing::MemoryStore;

pub use storage_ports_ipc::{channel, ChannelNames, ItemReceived, PortRequest, ProtocolError, SetItem};
