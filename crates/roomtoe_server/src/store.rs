//! Room storage.

use crate::connection::ConnectionId;
use crate::room::{Room, RoomCode};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Mapping from room code to room, owned by a [`RoomCoordinator`](crate::RoomCoordinator).
///
/// The coordinator is the only writer. Implementations need no interior
/// locking because the coordinator is driven by a single task.
pub trait RoomStore {
    /// Looks up a room.
    fn get(&self, code: &RoomCode) -> Option<&Room>;

    /// Looks up a room for mutation.
    fn get_mut(&mut self, code: &RoomCode) -> Option<&mut Room>;

    /// Stores a room under its code, returning any room it replaced.
    fn insert(&mut self, room: Room) -> Option<Room>;

    /// Deletes a room.
    fn remove(&mut self, code: &RoomCode) -> Option<Room>;

    /// Code of the first room, in ascending code order, seating `connection`.
    fn find_by_connection(&self, connection: ConnectionId) -> Option<RoomCode>;

    /// Active room codes in ascending order.
    fn codes(&self) -> Vec<RoomCode>;

    /// Number of active rooms.
    fn len(&self) -> usize;

    /// Whether a room has this code.
    fn contains(&self, code: &RoomCode) -> bool {
        self.get(code).is_some()
    }

    /// Whether no room is active.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process room store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    rooms: BTreeMap<RoomCode, Room>,
}

impl MemoryRoomStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoomStore for MemoryRoomStore {
    fn get(&self, code: &RoomCode) -> Option<&Room> {
        self.rooms.get(code)
    }

    fn get_mut(&mut self, code: &RoomCode) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    #[instrument(skip(self, room), fields(room = %room.code()))]
    fn insert(&mut self, room: Room) -> Option<Room> {
        let replaced = self.rooms.insert(room.code().clone(), room);
        debug!(rooms = self.rooms.len(), "Room stored");
        replaced
    }

    #[instrument(skip(self))]
    fn remove(&mut self, code: &RoomCode) -> Option<Room> {
        let removed = self.rooms.remove(code);
        debug!(rooms = self.rooms.len(), "Room removed");
        removed
    }

    fn find_by_connection(&self, connection: ConnectionId) -> Option<RoomCode> {
        self.rooms
            .values()
            .find(|room| room.has_player(connection))
            .map(|room| room.code().clone())
    }

    fn codes(&self) -> Vec<RoomCode> {
        self.rooms.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.rooms.len()
    }
}
