//! Error types for the storage port adapter.

use core::fmt;

use storage_ports_ipc::ProtocolError;

/// Failures reported by a `KeyValueStore` backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Storage is disabled or not reachable (e.g. blocked by browser policy)
    Unavailable,

    /// The backend refused the write because it is full
    QuotaExceeded,

    /// Any other backend failure
    Backend(String),
}

impl StoreError {
    /// Create a backend error with message.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "Storage unavailable"),
            StoreError::QuotaExceeded => write!(f, "Storage quota exceeded"),
            StoreError::Backend(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors surfaced by the adapter to its host.
#[derive(Clone, Debug, PartialEq)]
pub enum PortError {
    /// The store rejected a write or removal
    Store(StoreError),

    /// An inbound payload could not be decoded
    Protocol(ProtocolError),

    /// A value could not be encoded as JSON text
    Encode(String),

    /// The outbound channel refused the reply
    Send(String),
}

impl PortError {
    /// Create a send error with message.
    pub fn send(msg: impl Into<String>) -> Self {
        Self::Send(msg.into())
    }

    /// Check if this error came from the store.
    pub fn is_store(&self) -> bool {
        matches!(self, PortError::Store(_))
    }
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::Store(e) => write!(f, "{}", e),
            PortError::Protocol(e) => write!(f, "Protocol error: {}", e),
            PortError::Encode(msg) => write!(f, "Encode error: {}", msg),
            PortError::Send(msg) => write!(f, "Send error: {}", msg),
        }
    }
}

impl std::error::Error for PortError {}

impl From<StoreError> for PortError {
    fn from(e: StoreError) -> Self {
        PortError::Store(e)
    }
}

impl From<ProtocolError> for PortError {
    fn from(e: ProtocolError) -> Self {
        PortError::Protocol(e)
    }
}

impl From<serde_json::Error> for PortError {
    fn from(e: serde_json::Error) -> Self {
        PortError::Encode(e.to_string())
    }
}
