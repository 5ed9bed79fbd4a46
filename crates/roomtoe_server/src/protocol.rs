//! Wire messages exchanged over the WebSocket.
//!
//! Every frame is a JSON text message of the form
//! `{"event": "<name>", "data": <payload>}`; events without a payload omit
//! `data`. Field names are camelCase.

use crate::room::{Player, RoomCode};
use roomtoe_tictactoe::{Board, Symbol};
use serde::{Deserialize, Serialize};

/// Intent sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Open a new room and take seat X.
    CreateRoom(RoomRequest),
    /// Take seat O in an existing room.
    JoinRoom(RoomRequest),
    /// Place a symbol.
    MakeMove(MoveRequest),
    /// Clear the board for another game.
    RestartGame(RoomCodeRequest),
    /// Give up the seat.
    LeaveRoom(RoomCodeRequest),
}

/// Payload of `createRoom` and `joinRoom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    /// Room code, case-insensitive.
    pub room_code: String,
    /// Display name.
    pub player_name: String,
}

/// Payload of `makeMove`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Room code, case-insensitive.
    pub room_code: String,
    /// Board index, 0-8 row-major.
    pub position: usize,
}

/// Payload of `restartGame` and `leaveRoom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCodeRequest {
    /// Room code, case-insensitive.
    pub room_code: String,
}

/// Event sent to one or more clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    /// The caller's room exists and they hold seat X.
    RoomCreated(RoomCreated),
    /// A create or join request was refused.
    RoomError(String),
    /// An opponent took the free seat.
    PlayerJoined(PlayerJoined),
    /// Both seats are filled; play may proceed.
    GameStarted(GameStarted),
    /// A move was refused.
    InvalidMove(String),
    /// A move landed and play continues.
    MoveMade(MoveMade),
    /// A move completed a line.
    GameWon(GameWon),
    /// A move filled the board with no line.
    GameDraw,
    /// The board was cleared.
    GameRestarted(GameRestarted),
    /// The opponent left or dropped.
    PlayerDisconnected,
}

/// Payload of `roomCreated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreated {
    /// Normalized room code.
    pub room_code: RoomCode,
    /// The creator's symbol.
    pub symbol: Symbol,
    /// The creator's display name.
    pub player_name: String,
}

/// Payload of `playerJoined`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerJoined {
    /// The joining player's display name.
    pub player_name: String,
    /// The joining player's symbol.
    pub player_symbol: Symbol,
}

/// Payload of `gameStarted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStarted {
    /// Seated players in seat order.
    pub players: Vec<Player>,
    /// Symbol to move.
    pub current_turn: Symbol,
    /// Current board.
    pub board: Board,
}

/// Payload of `moveMade`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveMade {
    /// Board after the move.
    pub board: Board,
    /// Symbol to move next.
    pub next_turn: Symbol,
}

/// Payload of `gameWon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameWon {
    /// The winning symbol.
    pub winner: Symbol,
    /// Board indices of the winning line.
    pub winning_pattern: [usize; 3],
}

/// Payload of `gameRestarted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRestarted {
    /// The cleared board.
    pub board: Board,
    /// Symbol to move.
    pub current_turn: Symbol,
}
