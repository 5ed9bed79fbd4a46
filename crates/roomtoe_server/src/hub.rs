//! Single-task event loop driving the coordinator.
//!
//! Every transport event goes through one channel into [`Hub::run`], so
//! inbound messages are handled strictly one at a time and the coordinator
//! needs no locks. Delivery to connections is fire-and-forget into bounded
//! per-connection outboxes.

use crate::connection::{ConnectionId, ConnectionRegistry, OUTBOX_CAPACITY};
use crate::coordinator::{Dispatch, RoomCoordinator};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::store::RoomStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::{self, Receiver, Sender, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, instrument};

/// Something the transport observed.
#[derive(Debug)]
pub enum HubEvent {
    /// A socket opened; `outbox` feeds its writer.
    Connected {
        /// The new connection.
        id: ConnectionId,
        /// Channel to the socket writer.
        outbox: Sender<ServerMessage>,
    },
    /// A parsed inbound message.
    Message {
        /// Sending connection.
        id: ConnectionId,
        /// What it sent.
        message: ClientMessage,
    },
    /// A socket closed.
    Disconnected {
        /// The closed connection.
        id: ConnectionId,
    },
}

/// Cloneable entry point the transport uses to reach the hub.
#[derive(Debug, Clone)]
pub struct HubHandle {
    events: UnboundedSender<HubEvent>,
    next_id: Arc<AtomicU64>,
}

impl HubHandle {
    /// Allocates a connection id and registers its bounded outbound channel.
    #[instrument(skip(self))]
    pub fn connect(&self) -> (ConnectionId, Receiver<ServerMessage>) {
        let id = ConnectionId::from(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (outbox, inbox) = mpsc::channel(OUTBOX_CAPACITY);
        self.post(HubEvent::Connected { id, outbox });
        (id, inbox)
    }

    /// Forwards an inbound message.
    pub fn send(&self, id: ConnectionId, message: ClientMessage) {
        self.post(HubEvent::Message { id, message });
    }

    /// Reports that a connection closed.
    pub fn disconnect(&self, id: ConnectionId) {
        self.post(HubEvent::Disconnected { id });
    }

    fn post(&self, event: HubEvent) {
        if self.events.send(event).is_err() {
            debug!("Hub stopped; event dropped");
        }
    }
}

/// Owner of the coordinator and the open connections.
#[derive(Debug)]
pub struct Hub<S> {
    coordinator: RoomCoordinator<S>,
    connections: ConnectionRegistry,
    events: UnboundedReceiver<HubEvent>,
}

impl<S: RoomStore> Hub<S> {
    /// Creates a hub around `coordinator` and the handle that feeds it.
    pub fn new(coordinator: RoomCoordinator<S>) -> (Self, HubHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = Self {
            coordinator,
            connections: ConnectionRegistry::new(),
            events: rx,
        };
        let handle = HubHandle {
            events: tx,
            next_id: Arc::new(AtomicU64::new(1)),
        };
        (hub, handle)
    }

    /// Processes events until every [`HubHandle`] is dropped.
    pub async fn run(mut self) {
        info!("Room hub running");
        while let Some(event) = self.events.recv().await {
            self.process(event);
        }
        info!(rooms = self.coordinator.store().len(), "Room hub stopped");
    }

    /// Applies one event: registry bookkeeping, coordinator call, delivery.
    pub fn process(&mut self, event: HubEvent) {
        match event {
            HubEvent::Connected { id, outbox } => {
                self.connections.register(id, outbox);
            }
            HubEvent::Message { id, message } => {
                let dispatches = self.coordinator.handle(id, message);
                self.deliver(dispatches);
            }
            HubEvent::Disconnected { id } => {
                self.connections.unregister(id);
                let dispatches = self.coordinator.disconnect(id);
                self.deliver(dispatches);
            }
        }
    }

    /// The coordinator, for inspection.
    pub fn coordinator(&self) -> &RoomCoordinator<S> {
        &self.coordinator
    }

    fn deliver(&self, dispatches: Vec<Dispatch>) {
        for Dispatch { recipients, message } in dispatches {
            for recipient in recipients {
                if !self.connections.send(recipient, message.clone()) {
                    debug!(%recipient, "Recipient gone; message dropped");
                }
            }
        }
    }
}
