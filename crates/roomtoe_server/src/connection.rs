//! Connection identities and outbound channels.

use crate::protocol::ServerMessage;
use derive_more::{Display, From};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, instrument, warn};

/// Messages queued per connection before further ones are dropped.
pub const OUTBOX_CAPACITY: usize = 256;

/// Opaque handle for one client connection.
///
/// Assigned by the transport when a socket opens and never reused within a
/// process.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, From, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(u64);

/// Outbound channels for every open connection.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    senders: HashMap<ConnectionId, Sender<ServerMessage>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the outbound channel for `id`.
    #[instrument(skip(self, sender))]
    pub fn register(&mut self, id: ConnectionId, sender: Sender<ServerMessage>) {
        self.senders.insert(id, sender);
        debug!(open = self.senders.len(), "Connection registered");
    }

    /// Drops the outbound channel for `id`, closing its writer.
    #[instrument(skip(self))]
    pub fn unregister(&mut self, id: ConnectionId) {
        if self.senders.remove(&id).is_some() {
            debug!(open = self.senders.len(), "Connection unregistered");
        }
    }

    /// Queues `message` for `id` without waiting.
    ///
    /// Returns `false` if the connection is gone or its outbox is full; a
    /// client that stops reading loses messages instead of growing the queue.
    pub fn send(&self, id: ConnectionId, message: ServerMessage) -> bool {
        let Some(sender) = self.senders.get(&id) else {
            return false;
        };
        match sender.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(connection = %id, "Outbox full; message dropped");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Number of open connections.
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Whether no connection is open.
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
