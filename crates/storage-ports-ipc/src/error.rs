//! Errors from decoding inbound port payloads.

use alloc::string::String;
use core::fmt;

/// Errors that can occur while decoding an inbound port message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    /// The message arrived on a channel the adapter does not subscribe to
    UnknownChannel(String),

    /// The payload does not have the shape the channel requires
    MalformedPayload {
        /// Channel the payload arrived on
        channel: String,
        /// Decoder message
        reason: String,
    },
}

impl ProtocolError {
    /// Create a malformed payload error.
    pub fn malformed(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            channel: channel.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownChannel(name) => write!(f, "Unknown channel: {}", name),
            ProtocolError::MalformedPayload { channel, reason } => {
                write!(f, "Malformed payload on {}: {}", channel, reason)
            }
        }
    }
}
