//! Shared utilities for the web bindings
//!
//! Console output and conversions between `JsValue` and the JSON text the
//! core crate works with.

use storage_ports_core::PortError;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Console.log binding for WASM
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

/// Read a string property, if present.
pub(crate) fn string_property(value: &JsValue, name: &str) -> Option<String> {
    js_sys::Reflect::get(value, &name.into())
        .ok()
        .and_then(|v| v.as_string())
}

/// Human-readable message for a thrown JS value.
///
/// Prefers `name: message` for `Error`/`DOMException` objects.
pub(crate) fn js_error_message(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    match (string_property(err, "name"), string_property(err, "message")) {
        (Some(name), Some(message)) => format!("{}: {}", name, message),
        (Some(name), None) => name,
        (None, Some(message)) => message,
        (None, None) => format!("{:?}", err),
    }
}

/// Serialize a JS value received on a port to JSON text.
///
/// `undefined` (a port sent with no value) is treated as `null`.
pub(crate) fn to_json_text(value: &JsValue) -> Result<String, JsValue> {
    if value.is_undefined() {
        return Ok(String::from("null"));
    }
    let text = js_sys::JSON::stringify(value)?;
    Ok(text.as_string().unwrap_or_else(|| String::from("null")))
}

/// Convert an adapter error into an exception for the host.
pub(crate) fn to_js_error(err: &PortError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
