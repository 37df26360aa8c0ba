//! Browser bindings for Storage Ports
//!
//! This crate runs on the browser's main thread next to the compiled
//! application. It subscribes to the application's `getItem` and `setItem`
//! ports and answers on `receiveItem`, backed by `window.localStorage`.
//!
//! ## Module Structure
//!
//! - `storage` - `KeyValueStore` over `web_sys::Storage`
//! - `sink` - `PortSink` over the application's outbound port
//! - `ports` - Subscription wiring exported to JavaScript
//! - `util` - Console logging and JS value helpers
//!
//! ## Usage (JavaScript)
//!
//! ```text
//! import init, { subscribe } from "./pkg/storage_ports_web.js";
//!
//! await init();
//! const app = Elm.Main.init({ node: document.body });
//! const ports = subscribe(app);
//! ```
//!
//! Handlers stay attached for the life of the page unless `ports.unsubscribe()`
//! is called; letting `ports` be collected does not detach them.
//!
//! `subscribeWith(app, { area: "session" })` selects `sessionStorage` or
//! renames the ports; see `PortConfig`.

// =============================================================================
// Module declarations
// =============================================================================

pub(crate) mod ports;
pub(crate) mod sink;
pub(crate) mod storage;
pub(crate) mod util;

// =============================================================================
// Public re-exports
// =============================================================================

pub use ports::{subscribe, subscribe_with, StoragePorts};
pub use sink::PortsSink;
pub use storage::BrowserStorage;

pub use storage_ports_core::{PortConfig, StorageArea};
