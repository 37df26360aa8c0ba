//! Port subscription wiring
//!
//! Connects the application's `app.ports` object to a `StoragePortAdapter`:
//!
//! 1. `getItem` handler: decode key → read storage → `receiveItem.send({key, value})`
//! 2. `setItem` handler: decode `[key, value]` → write or remove
//!
//! Handlers run synchronously on the main thread, one message at a time.
//! Errors from a handler (malformed payload, storage write failure) are
//! thrown back into the application runtime as exceptions.

use std::rc::Rc;

use storage_ports_core::{PortConfig, StoragePortAdapter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::sink::PortsSink;
use crate::storage::BrowserStorage;
use crate::util::{js_error_message, log, to_js_error, to_json_text};

type BrowserAdapter = StoragePortAdapter<BrowserStorage, PortsSink>;
type PortHandler = Closure<dyn Fn(JsValue) -> Result<(), JsValue>>;

/// Subscribe the storage adapter to `app.ports` using the default port
/// names (`getItem`, `receiveItem`, `setItem`) and `localStorage`.
#[wasm_bindgen]
pub fn subscribe(app: &JsValue) -> Result<StoragePorts, JsValue> {
    StoragePorts::attach(app, PortConfig::default())
}

/// Subscribe with a configuration object, e.g. `{ area: "session" }`.
///
/// `null`/`undefined` selects the defaults.
#[wasm_bindgen(js_name = "subscribeWith")]
pub fn subscribe_with(app: &JsValue, config: &JsValue) -> Result<StoragePorts, JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        PortConfig::default()
    } else {
        let text = to_json_text(config)?;
        PortConfig::from_json(&text).map_err(|e| {
            JsValue::from(js_sys::Error::new(&format!(
                "invalid storage ports config: {}",
                e
            )))
        })?
    };
    StoragePorts::attach(app, config)
}

/// Live subscription of the storage adapter to an application's ports.
///
/// Owns the handler closures. Handlers stay attached until `unsubscribe()`
/// succeeds; dropping the handle (or the JS wrapper being collected) leaks
/// any handler that is still attached instead of detaching it.
#[wasm_bindgen]
pub struct StoragePorts {
    config: PortConfig,
    /// Inbound port objects the handlers are subscribed to
    get_port: JsValue,
    set_port: JsValue,
    /// Handlers, `None` once leaked on drop
    on_get: Option<PortHandler>,
    on_set: Option<PortHandler>,
    /// Per-port attachment state
    get_attached: bool,
    set_attached: bool,
}

impl StoragePorts {
    fn attach(app: &JsValue, config: PortConfig) -> Result<StoragePorts, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let ports = js_sys::Reflect::get(app, &"ports".into())?;
        if ports.is_undefined() || ports.is_null() {
            return Err(js_sys::Error::new("app.ports is not defined").into());
        }

        let get_port = inbound_port(&ports, &config.get_channel)?;
        let set_port = inbound_port(&ports, &config.set_channel)?;
        let sink = PortsSink::from_ports(&ports, &config.receive_channel)?;

        let store = BrowserStorage::open(config.area).map_err(|e| {
            log(&format!("[storage-ports] cannot open {}: {}", config.area.window_property(), e));
            JsValue::from(js_sys::Error::new(&e.to_string()))
        })?;

        let adapter: Rc<BrowserAdapter> = Rc::new(StoragePortAdapter::with_channels(
            store,
            sink,
            config.channel_names(),
        ));

        let on_get = port_handler(adapter.clone(), config.get_channel.clone());
        let on_set = port_handler(adapter, config.set_channel.clone());

        call_port_method(&get_port, "subscribe", &on_get)?;
        if let Err(e) = call_port_method(&set_port, "subscribe", &on_set) {
            if let Err(rollback) = call_port_method(&get_port, "unsubscribe", &on_get) {
                log(&format!(
                    "[storage-ports] rollback of {} failed: {} - leaking handler",
                    config.get_channel,
                    js_error_message(&rollback)
                ));
                on_get.forget();
            }
            return Err(e);
        }

        log(&format!(
            "[storage-ports] subscribed: {} -> {}, {} (backed by {})",
            config.get_channel,
            config.receive_channel,
            config.set_channel,
            config.area.window_property()
        ));

        Ok(StoragePorts {
            config,
            get_port,
            set_port,
            on_get: Some(on_get),
            on_set: Some(on_set),
            get_attached: true,
            set_attached: true,
        })
    }

    /// Unsubscribe every handler still attached.
    ///
    /// A port whose `unsubscribe` throws stays attached, so a later call
    /// retries it and drop leaks its handler.
    fn detach(&mut self) -> Result<(), JsValue> {
        let mut result = Ok(());

        if self.get_attached {
            if let Some(handler) = self.on_get.as_ref() {
                match call_port_method(&self.get_port, "unsubscribe", handler) {
                    Ok(()) => self.get_attached = false,
                    Err(e) => result = Err(e),
                }
            }
        }
        if self.set_attached {
            if let Some(handler) = self.on_set.as_ref() {
                match call_port_method(&self.set_port, "unsubscribe", handler) {
                    Ok(()) => self.set_attached = false,
                    Err(e) => result = result.and(Err(e)),
                }
            }
        }

        match &result {
            Ok(()) => log(&format!(
                "[storage-ports] unsubscribed from {} and {}",
                self.config.get_channel, self.config.set_channel
            )),
            Err(e) => log(&format!(
                "[storage-ports] unsubscribe failed: {}",
                js_error_message(e)
            )),
        }
        result
    }
}

#[wasm_bindgen]
impl StoragePorts {
    /// Detach both handlers from the application's ports.
    ///
    /// Calling it again after success is a no-op; after a failure it
    /// retries the ports that are still attached.
    #[wasm_bindgen]
    pub fn unsubscribe(&mut self) -> Result<(), JsValue> {
        self.detach()
    }

    /// Whether any handler is still attached.
    #[wasm_bindgen(getter, js_name = "isSubscribed")]
    pub fn is_subscribed(&self) -> bool {
        self.get_attached || self.set_attached
    }

    /// Name of the storage area in use (`localStorage` or `sessionStorage`).
    #[wasm_bindgen(getter)]
    pub fn area(&self) -> String {
        self.config.area.window_property().to_string()
    }
}

impl Drop for StoragePorts {
    fn drop(&mut self) {
        // Attached handlers must outlive the handle: the app keeps calling them.
        if self.get_attached {
            if let Some(handler) = self.on_get.take() {
                handler.forget();
            }
        }
        if self.set_attached {
            if let Some(handler) = self.on_set.take() {
                handler.forget();
            }
        }
    }
}

/// Look up an inbound port (one with `subscribe`).
fn inbound_port(ports: &JsValue, name: &str) -> Result<JsValue, JsValue> {
    let port = js_sys::Reflect::get(ports, &name.into())?;
    if port.is_undefined() || port.is_null() {
        return Err(js_sys::Error::new(&format!("app.ports.{} is not defined", name)).into());
    }
    Ok(port)
}

/// Call `port.<method>(handler)`.
fn call_port_method(port: &JsValue, method: &str, handler: &PortHandler) -> Result<(), JsValue> {
    let func = js_sys::Reflect::get(port, &method.into())?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| {
            JsValue::from(js_sys::Error::new(&format!(
                "port has no {} method",
                method
            )))
        })?;
    func.call1(port, handler.as_ref())?;
    Ok(())
}

/// Build the handler for one inbound port.
fn port_handler(adapter: Rc<BrowserAdapter>, channel: String) -> PortHandler {
    Closure::wrap(Box::new(move |payload: JsValue| -> Result<(), JsValue> {
        let text = to_json_text(&payload)?;
        adapter
            .handle_message(&channel, &text)
            .map_err(|e| to_js_error(&e))
    }) as Box<dyn Fn(JsValue) -> Result<(), JsValue>>)
}
