//! Outbound side of the adapter.
//!
//! A `PortSink` carries `ItemReceived` replies back to the application and
//! doubles as the adapter's debug output, the way a platform layer exposes a
//! `debug_write` next to its message transport.

use std::cell::RefCell;
use std::sync::mpsc::Sender;

use storage_ports_ipc::ItemReceived;

use crate::error::PortError;

/// Outbound `receiveItem` channel.
pub trait PortSink {
    /// Deliver a reply to the application.
    fn send(&self, item: &ItemReceived) -> Result<(), PortError>;

    /// Write a diagnostic line to the host's log.
    ///
    /// Default: no-op
    fn debug_write(&self, _msg: &str) {}
}

impl<K: PortSink + ?Sized> PortSink for &K {
    fn send(&self, item: &ItemReceived) -> Result<(), PortError> {
        (**self).send(item)
    }

    fn debug_write(&self, msg: &str) {
        (**self).debug_write(msg)
    }
}

/// Typed outbound queue for hosts that drain replies themselves.
impl PortSink for Sender<ItemReceived> {
    fn send(&self, item: &ItemReceived) -> Result<(), PortError> {
        Sender::send(self, item.clone())
            .map_err(|_| PortError::send("receiveItem queue disconnected"))
    }
}

/// Sink that keeps every reply and log line, for tests.
#[derive(Default)]
pub struct RecordingSink {
    sent: RefCell<Vec<ItemReceived>>,
    logs: RefCell<Vec<String>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies sent so far, oldest first.
    pub fn sent(&self) -> Vec<ItemReceived> {
        self.sent.borrow().clone()
    }

    /// Remove and return the oldest reply.
    pub fn take_next(&self) -> Option<ItemReceived> {
        let mut sent = self.sent.borrow_mut();
        if sent.is_empty() {
            None
        } else {
            Some(sent.remove(0))
        }
    }

    /// Debug lines written so far.
    pub fn logs(&self) -> Vec<String> {
        self.logs.borrow().clone()
    }
}

impl PortSink for RecordingSink {
    fn send(&self, item: &ItemReceived) -> Result<(), PortError> {
        self.sent.borrow_mut().push(item.clone());
        Ok(())
    }

    fn debug_write(&self, msg: &str) {
        self.logs.borrow_mut().push(String::from(msg));
    }
}
