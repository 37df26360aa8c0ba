//! Browser Tests
//!
//! Run with `wasm-pack test --headless --firefox crates/storage-ports-web`.
//! The application is faked with a plain object exposing `ports` shaped
//! like a compiled app's: inbound ports with `subscribe`/`unsubscribe`,
//! an outbound port with `send`.

use storage_ports_core::{KeyValueStore, StorageArea, StoreError};
use storage_ports_web::{subscribe, subscribe_with, BrowserStorage};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const PREFIX: &str = "storage-ports-test:";

fn key(name: &str) -> String {
    format!("{}{}", PREFIX, name)
}

fn local_storage() -> web_sys::Storage {
    web_sys::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap()
}

fn fake_app() -> JsValue {
    js_sys::Function::new_no_args(
        r#"
        const inbound = () => ({
            handlers: [],
            subscribe(f) { this.handlers.push(f); },
            unsubscribe(f) { this.handlers = this.handlers.filter(h => h !== f); },
        });
        const sent = [];
        return {
            sent,
            ports: {
                getItem: inbound(),
                setItem: inbound(),
                receiveItem: { send(v) { sent.push(v); } },
            },
        };
        "#,
    )
    .call0(&JsValue::NULL)
    .unwrap()
}

fn get(value: &JsValue, path: &[&str]) -> JsValue {
    path.iter().fold(value.clone(), |v, name| {
        js_sys::Reflect::get(&v, &(*name).into()).unwrap()
    })
}

/// Deliver `payload` to every handler subscribed on `app.ports[port]`.
fn emit(app: &JsValue, port: &str, payload: &JsValue) -> Result<(), JsValue> {
    let handlers: js_sys::Array = get(app, &["ports", port, "handlers"]).dyn_into().unwrap();
    for handler in handlers.iter() {
        let handler: js_sys::Function = handler.dyn_into().unwrap();
        handler.call1(&JsValue::NULL, payload)?;
    }
    Ok(())
}

/// Swap `app.ports[port][method]` for a function with the given body.
fn replace_method(app: &JsValue, port: &str, method: &str, body: &str) {
    js_sys::Reflect::set(
        &get(app, &["ports", port]),
        &method.into(),
        &js_sys::Function::new_no_args(body),
    )
    .unwrap();
}

fn handler_count(app: &JsValue, port: &str) -> u32 {
    get(app, &["ports", port, "handlers"])
        .dyn_into::<js_sys::Array>()
        .unwrap()
        .length()
}

fn sent_json(app: &JsValue) -> Vec<String> {
    get(app, &["sent"])
        .dyn_into::<js_sys::Array>()
        .unwrap()
        .iter()
        .map(|v| js_sys::JSON::stringify(&v).unwrap().as_string().unwrap())
        .collect()
}

fn json(text: &str) -> JsValue {
    js_sys::JSON::parse(text).unwrap()
}

#[wasm_bindgen_test]
fn browser_storage_write_read_remove() {
    let store = BrowserStorage::open(StorageArea::Local).unwrap();
    let k = key("direct");

    store.write(&k, "[1,2]").unwrap();
    assert_eq!(store.read(&k).unwrap().as_deref(), Some("[1,2]"));
    assert_eq!(local_storage().get_item(&k).unwrap().as_deref(), Some("[1,2]"));

    store.remove(&k).unwrap();
    assert_eq!(store.read(&k).unwrap(), None);
    assert_eq!(store.remove(&k), Ok::<(), StoreError>(()));
}

#[wasm_bindgen_test]
fn theme_scenario_through_ports() {
    let app = fake_app();
    let ports = subscribe(&app).unwrap();
    assert!(ports.is_subscribed());
    assert_eq!(ports.area(), "localStorage");

    let k = key("theme");
    emit(&app, "setItem", &json(&format!(r#"["{}", {{"mode": "dark"}}]"#, k))).unwrap();
    assert_eq!(
        local_storage().get_item(&k).unwrap().as_deref(),
        Some(r#"{"mode":"dark"}"#)
    );
    assert!(sent_json(&app).is_empty());

    emit(&app, "getItem", &JsValue::from_str(&k)).unwrap();
    emit(&app, "setItem", &json(&format!(r#"["{}", null]"#, k))).unwrap();
    assert_eq!(local_storage().get_item(&k).unwrap(), None);
    emit(&app, "getItem", &JsValue::from_str(&k)).unwrap();

    assert_eq!(
        sent_json(&app),
        vec![
            format!(r#"{{"key":"{}","value":{{"mode":"dark"}}}}"#, k),
            format!(r#"{{"key":"{}","value":null}}"#, k),
        ]
    );
}

#[wasm_bindgen_test]
fn corrupt_entry_reads_null() {
    let app = fake_app();
    let _ports = subscribe(&app).unwrap();
    let k = key("corrupt");
    local_storage().set_item(&k, "{oops").unwrap();

    emit(&app, "getItem", &JsValue::from_str(&k)).unwrap();
    assert_eq!(
        sent_json(&app),
        vec![format!(r#"{{"key":"{}","value":null}}"#, k)]
    );
    local_storage().remove_item(&k).unwrap();
}

#[wasm_bindgen_test]
fn malformed_set_payload_throws() {
    let app = fake_app();
    let _ports = subscribe(&app).unwrap();

    assert!(emit(&app, "setItem", &JsValue::from_str("not-a-pair")).is_err());
    assert!(emit(&app, "getItem", &JsValue::from_f64(3.0)).is_err());
}

#[wasm_bindgen_test]
fn missing_port_is_rejected() {
    let app = fake_app();
    js_sys::Reflect::delete_property(
        &get(&app, &["ports"]).dyn_into::<js_sys::Object>().unwrap(),
        &"receiveItem".into(),
    )
    .unwrap();

    assert!(subscribe(&app).is_err());
    assert_eq!(handler_count(&app, "getItem"), 0);
}

#[wasm_bindgen_test]
fn unsubscribe_detaches_handlers() {
    let app = fake_app();
    let mut ports = subscribe(&app).unwrap();
    assert_eq!(handler_count(&app, "getItem"), 1);
    assert_eq!(handler_count(&app, "setItem"), 1);

    ports.unsubscribe().unwrap();
    assert!(!ports.is_subscribed());
    assert_eq!(handler_count(&app, "getItem"), 0);
    assert_eq!(handler_count(&app, "setItem"), 0);

    ports.unsubscribe().unwrap();
}

#[wasm_bindgen_test]
fn dropped_handle_keeps_handlers() {
    let app = fake_app();
    drop(subscribe(&app).unwrap());
    assert_eq!(handler_count(&app, "getItem"), 1);
    assert_eq!(handler_count(&app, "setItem"), 1);

    let k = key("after-drop");
    emit(&app, "setItem", &json(&format!(r#"["{}", true]"#, k))).unwrap();
    emit(&app, "getItem", &JsValue::from_str(&k)).unwrap();
    assert_eq!(
        sent_json(&app),
        vec![format!(r#"{{"key":"{}","value":true}}"#, k)]
    );
    local_storage().remove_item(&k).unwrap();
}

#[wasm_bindgen_test]
fn failed_unsubscribe_stays_subscribed() {
    let app = fake_app();
    let mut ports = subscribe(&app).unwrap();
    replace_method(&app, "setItem", "unsubscribe", "throw new Error('busy')");

    assert!(ports.unsubscribe().is_err());
    assert!(ports.is_subscribed());
    assert_eq!(handler_count(&app, "getItem"), 0);
    assert_eq!(handler_count(&app, "setItem"), 1);

    // The handler the port still holds must keep working after the drop.
    drop(ports);
    let k = key("after-failed-unsubscribe");
    emit(&app, "setItem", &json(&format!(r#"["{}", 1]"#, k))).unwrap();
    assert_eq!(local_storage().get_item(&k).unwrap().as_deref(), Some("1"));
    local_storage().remove_item(&k).unwrap();
}

#[wasm_bindgen_test]
fn failed_rollback_keeps_handler_alive() {
    let app = fake_app();
    replace_method(&app, "setItem", "subscribe", "throw new Error('rejected')");
    replace_method(&app, "getItem", "unsubscribe", "throw new Error('busy')");

    assert!(subscribe(&app).is_err());
    assert_eq!(handler_count(&app, "getItem"), 1);

    let k = key("rollback");
    emit(&app, "getItem", &JsValue::from_str(&k)).unwrap();
    assert_eq!(
        sent_json(&app),
        vec![format!(r#"{{"key":"{}","value":null}}"#, k)]
    );
}

#[wasm_bindgen_test]
fn object_key_order_survives_storage() {
    let app = fake_app();
    let _ports = subscribe(&app).unwrap();
    let k = key("prefs");

    let payload = json(&format!(r#"["{}", {{"zoom": 2, "accent": "blue"}}]"#, k));
    emit(&app, "setItem", &payload).unwrap();
    assert_eq!(
        local_storage().get_item(&k).unwrap().as_deref(),
        Some(r#"{"zoom":2,"accent":"blue"}"#)
    );

    emit(&app, "getItem", &JsValue::from_str(&k)).unwrap();
    assert_eq!(
        sent_json(&app),
        vec![format!(r#"{{"key":"{}","value":{{"zoom":2,"accent":"blue"}}}}"#, k)]
    );
    local_storage().remove_item(&k).unwrap();
}

#[wasm_bindgen_test]
fn lone_surrogate_is_rejected_without_writing() {
    let app = fake_app();
    let _ports = subscribe(&app).unwrap();
    let k = key("surrogate");

    // JSON.parse yields a lone surrogate, which a Rust string cannot hold.
    let payload = json(&format!(r#"["{}", "\ud800"]"#, k));
    assert!(emit(&app, "setItem", &payload).is_err());
    assert_eq!(local_storage().get_item(&k).unwrap(), None);
}

#[wasm_bindgen_test]
fn session_area_and_renamed_ports() {
    let app = js_sys::Function::new_no_args(
        r#"
        const inbound = () => ({
            handlers: [],
            subscribe(f) { this.handlers.push(f); },
            unsubscribe(f) { this.handlers = this.handlers.filter(h => h !== f); },
        });
        const sent = [];
        return {
            sent,
            ports: {
                load: inbound(),
                save: inbound(),
                loaded: { send(v) { sent.push(v); } },
            },
        };
        "#,
    )
    .call0(&JsValue::NULL)
    .unwrap();

    let config = json(
        r#"{"getChannel": "load", "receiveChannel": "loaded", "setChannel": "save", "area": "session"}"#,
    );
    let ports = subscribe_with(&app, &config).unwrap();
    assert_eq!(ports.area(), "sessionStorage");

    let k = key("session");
    emit(&app, "save", &json(&format!(r#"["{}", 5]"#, k))).unwrap();
    emit(&app, "load", &JsValue::from_str(&k)).unwrap();

    let session = web_sys::window().unwrap().session_storage().unwrap().unwrap();
    assert_eq!(session.get_item(&k).unwrap().as_deref(), Some("5"));
    assert_eq!(local_storage().get_item(&k).unwrap(), None);
    assert_eq!(
        sent_json(&app),
        vec![format!(r#"{{"key":"{}","value":5}}"#, k)]
    );
    session.remove_item(&k).unwrap();
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let app = fake_app();
    assert!(subscribe_with(&app, &json(r#"{"area": "cookies"}"#)).is_err());
    assert!(subscribe_with(&app, &JsValue::UNDEFINED).is_ok());
}
