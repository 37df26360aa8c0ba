//! Wire messages carried on the storage ports.

use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::channel;
use crate::error::ProtocolError;

/// Drop the JSON `null` so absence has exactly one representation (`None`).
fn normalize(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

/// Outbound reply on `receiveItem`.
///
/// Serializes as `{"key": <string>, "value": <json or null>}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemReceived {
    /// Key that was requested
    pub key: String,
    /// Decoded value, `None` when absent or unreadable
    pub value: Option<Value>,
}

impl ItemReceived {
    /// Create a reply for `key`.
    pub fn new(key: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            key: key.into(),
            value: normalize(value),
        }
    }

    /// Create a reply for a key with no readable value.
    pub fn absent(key: impl Into<String>) -> Self {
        Self::new(key, None)
    }
}

/// Inbound request on `setItem`.
///
/// On the wire this is the ordered pair `[key, value]`; a `null` value
/// means "delete the key".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, Option<Value>)", into = "(String, Option<Value>)")]
pub struct SetItem {
    /// Key to write or delete
    pub key: String,
    /// Value to store, `None` to delete
    pub value: Option<Value>,
}

impl SetItem {
    /// Store `value` under `key`.
    pub fn put(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value: normalize(Some(value)),
        }
    }

    /// Delete `key`.
    pub fn delete(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Whether this request deletes the key.
    pub fn is_delete(&self) -> bool {
        self.value.is_none()
    }
}

impl From<(String, Option<Value>)> for SetItem {
    fn from((key, value): (String, Option<Value>)) -> Self {
        Self {
            key,
            value: normalize(value),
        }
    }
}

impl From<SetItem> for (String, Option<Value>) {
    fn from(item: SetItem) -> Self {
        (item.key, item.value)
    }
}

/// Names the application declared for the three ports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelNames {
    /// Inbound fetch channel
    pub get_item: String,
    /// Outbound reply channel
    pub receive_item: String,
    /// Inbound write/delete channel
    pub set_item: String,
}

impl Default for ChannelNames {
    fn default() -> Self {
        Self {
            get_item: String::from(channel::GET_ITEM),
            receive_item: String::from(channel::RECEIVE_ITEM),
            set_item: String::from(channel::SET_ITEM),
        }
    }
}

/// A decoded inbound message.
#[derive(Clone, Debug, PartialEq)]
pub enum PortRequest {
    /// Fetch the value stored under the key
    GetItem(String),
    /// Write or delete a key
    SetItem(SetItem),
}

impl PortRequest {
    /// Decode a JSON payload that arrived on one of the default channels.
    pub fn decode(channel: &str, payload_json: &str) -> Result<Self, ProtocolError> {
        Self::decode_with(&ChannelNames::default(), channel, payload_json)
    }

    /// Decode a JSON payload using the application's channel names.
    pub fn decode_with(
        names: &ChannelNames,
        channel: &str,
        payload_json: &str,
    ) -> Result<Self, ProtocolError> {
        if channel == names.get_item {
            serde_json::from_str::<String>(payload_json)
                .map(PortRequest::GetItem)
                .map_err(|e| ProtocolError::malformed(channel, e.to_string()))
        } else if channel == names.set_item {
            serde_json::from_str::<SetItem>(payload_json)
                .map(PortRequest::SetItem)
                .map_err(|e| ProtocolError::malformed(channel, e.to_string()))
        } else {
            Err(ProtocolError::UnknownChannel(String::from(channel)))
        }
    }

    /// Key the request refers to.
    pub fn key(&self) -> &str {
        match self {
            PortRequest::GetItem(key) => key,
            PortRequest::SetItem(item) => &item.key,
        }
    }
}
