//! Adapter configuration.
//!
//! Hosts pass a configuration object when the application declares its
//! ports under different names or wants per-session storage. Every field is
//! optional; missing fields take the defaults below.
//!
//! ```json
//! { "getChannel": "getItem", "receiveChannel": "receiveItem",
//!   "setChannel": "setItem", "area": "local" }
//! ```

use serde::{Deserialize, Serialize};

use storage_ports_ipc::{channel, ChannelNames};

/// Which browser storage area backs the adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    /// `window.localStorage`: survives restarts
    #[default]
    Local,
    /// `window.sessionStorage`: cleared when the tab closes
    Session,
}

impl StorageArea {
    /// Property name of the area on `window`.
    pub fn window_property(&self) -> &'static str {
        match self {
            StorageArea::Local => "localStorage",
            StorageArea::Session => "sessionStorage",
        }
    }
}

/// Port names and storage area for one adapter instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortConfig {
    /// Inbound fetch port
    pub get_channel: String,
    /// Outbound reply port
    pub receive_channel: String,
    /// Inbound write/delete port
    pub set_channel: String,
    /// Backing storage area
    pub area: StorageArea,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            get_channel: String::from(channel::GET_ITEM),
            receive_channel: String::from(channel::RECEIVE_ITEM),
            set_channel: String::from(channel::SET_ITEM),
            area: StorageArea::Local,
        }
    }
}

impl PortConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Channel names for decoding inbound payloads.
    pub fn channel_names(&self) -> ChannelNames {
        ChannelNames {
            get_item: self.get_channel.clone(),
            receive_item: self.receive_channel.clone(),
            set_item: self.set_channel.clone(),
        }
    }
}
