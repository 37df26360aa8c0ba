//! Outbound port sink
//!
//! Sends `ItemReceived` replies to the application by calling `send` on its
//! outbound port object (`app.ports.receiveItem.send`).

use storage_ports_core::{ItemReceived, PortError, PortSink};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::util::{js_error_message, log};

/// `PortSink` backed by an application's outbound port.
pub struct PortsSink {
    /// The port object (`this` for `send`)
    port: JsValue,
    /// The port's `send` function
    send_fn: js_sys::Function,
    /// Port name, for log lines
    name: String,
}

impl PortsSink {
    /// Bind to `ports[name]`.
    ///
    /// Fails when the application did not declare the port or the port has
    /// no `send` method (i.e. it is an inbound port).
    pub fn from_ports(ports: &JsValue, name: &str) -> Result<Self, JsValue> {
        let port = js_sys::Reflect::get(ports, &name.into())?;
        if port.is_undefined() || port.is_null() {
            return Err(js_sys::Error::new(&format!("app.ports.{} is not defined", name)).into());
        }

        let send_fn = js_sys::Reflect::get(&port, &"send".into())?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| {
                JsValue::from(js_sys::Error::new(&format!(
                    "app.ports.{} is not an outbound port (no send)",
                    name
                )))
            })?;

        Ok(Self {
            port,
            send_fn,
            name: name.to_string(),
        })
    }

    /// Port name this sink sends on.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PortSink for PortsSink {
    fn send(&self, item: &ItemReceived) -> Result<(), PortError> {
        let text = serde_json::to_string(item)?;
        let value = js_sys::JSON::parse(&text)
            .map_err(|e| PortError::Encode(js_error_message(&e)))?;

        self.send_fn
            .call1(&self.port, &value)
            .map(|_| ())
            .map_err(|e| PortError::send(format!("{}: {}", self.name, js_error_message(&e))))
    }

    fn debug_write(&self, msg: &str) {
        log(msg);
    }
}
