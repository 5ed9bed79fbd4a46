//! Room coordinator errors.

use crate::protocol::ServerMessage;
use derive_more::{Display, Error};

/// A request the coordinator refused.
///
/// The display text is the human-readable message sent back to the caller.
/// None of these are fatal; the coordinator keeps serving other requests.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RoomError {
    /// The code already maps to an active room.
    #[display("Room already exists")]
    RoomExists,
    /// No active room has the code.
    #[display("Room does not exist")]
    RoomNotFound,
    /// The room already seats two players.
    #[display("Room is full")]
    RoomFull,
    /// The caller moved out of turn (or is not seated in the room).
    #[display("Not your turn")]
    InvalidMove,
    /// A required field was empty.
    #[display("{_0}")]
    InvalidRequest(#[error(not(source))] String),
}

impl RoomError {
    /// The outbound event reporting this error to the caller.
    pub fn into_message(self) -> ServerMessage {
        match self {
            RoomError::InvalidMove => ServerMessage::InvalidMove(self.to_string()),
            other => ServerMessage::RoomError(other.to_string()),
        }
    }
}
