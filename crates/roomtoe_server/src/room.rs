//! Rooms, their codes and seated players.

use crate::connection::ConnectionId;
use crate::error::RoomError;
use derive_getters::Getters;
use derive_more::Display;
use derive_new::new;
use roomtoe_tictactoe::{Game, GameResult, Symbol};
use serde::Serialize;
use tracing::{debug, instrument};

/// Seats per room.
pub const MAX_PLAYERS: usize = 2;

/// Normalized room code: trimmed and uppercased.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Normalizes a caller-supplied code.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::InvalidRequest`] if nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self, RoomError> {
        let code = raw.trim().to_uppercase();
        if code.is_empty() {
            return Err(RoomError::InvalidRequest("Room code is required".to_string()));
        }
        Ok(Self(code))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize)]
pub struct Player {
    /// Connection the player sits on.
    #[serde(rename = "id")]
    connection: ConnectionId,
    /// Display name.
    name: String,
    /// Symbol for the room's lifetime.
    symbol: Symbol,
}

/// Where a room is in its lifecycle.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// Fewer than two players, or parked after an opponent left.
    Waiting,
    /// Two players, game in progress.
    Active,
    /// Two players, game won or drawn.
    Finished,
}

/// A matchmaking unit holding up to two players and one game.
#[derive(Debug, Clone)]
pub struct Room {
    code: RoomCode,
    players: Vec<Player>,
    game: Game,
    started: bool,
}

impl Room {
    /// Creates a room with its creator in the first seat.
    #[instrument(skip(creator), fields(creator = %creator.name()))]
    pub fn new(code: RoomCode, creator: Player) -> Self {
        Self {
            code,
            players: vec![creator],
            game: Game::new(),
            started: false,
        }
    }

    /// Room code.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Seated players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The room's game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub(crate) fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Whether two players are present and play may proceed.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The finished game's result, if any.
    pub fn winner(&self) -> Option<&GameResult> {
        self.game.result()
    }

    /// The player on `connection`.
    pub fn player(&self, connection: ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.connection == connection)
    }

    /// Whether `connection` holds a seat.
    pub fn has_player(&self, connection: ConnectionId) -> bool {
        self.player(connection).is_some()
    }

    /// Whether both seats are taken.
    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    /// Connections of every seated player.
    pub fn connections(&self) -> Vec<ConnectionId> {
        self.players.iter().map(|p| p.connection).collect()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RoomPhase {
        if !self.started {
            RoomPhase::Waiting
        } else if self.game.is_over() {
            RoomPhase::Finished
        } else {
            RoomPhase::Active
        }
    }

    /// Seats a joining player and starts play.
    ///
    /// The newcomer takes whichever symbol the sitting player does not hold,
    /// which is O unless X's holder left earlier. A connection holds at most
    /// one seat.
    #[instrument(skip(self), fields(room = %self.code))]
    pub(crate) fn seat(&mut self, connection: ConnectionId, name: String) -> Result<&Player, RoomError> {
        if self.has_player(connection) {
            return Err(RoomError::InvalidRequest("Already in this room".to_string()));
        }
        if self.is_full() {
            return Err(RoomError::RoomFull);
        }

        let symbol = self
            .players
            .first()
            .map_or(Symbol::X, |sitting| sitting.symbol.opponent());
        self.players.push(Player::new(connection, name, symbol));
        self.started = self.is_full();
        debug!(%symbol, started = self.started, "Seated player");

        Ok(&self.players[self.players.len() - 1])
    }

    /// Removes the player on `connection`.
    ///
    /// If someone remains the room is parked: not started, result cleared,
    /// board left as it was.
    #[instrument(skip(self), fields(room = %self.code))]
    pub(crate) fn remove_player(&mut self, connection: ConnectionId) -> Option<Player> {
        let index = self.players.iter().position(|p| p.connection == connection)?;
        let player = self.players.remove(index);

        if !self.players.is_empty() {
            self.started = false;
            self.game.clear_result();
            debug!(remaining = self.players.len(), "Room parked");
        }

        Some(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_with_creator() -> Room {
        Room::new(
            RoomCode::parse("abc").unwrap(),
            Player::new(ConnectionId::from(1), "Alice".into(), Symbol::X),
        )
    }

    #[test]
    fn test_code_is_trimmed_and_uppercased() {
        assert_eq!(RoomCode::parse("  xY9 ").unwrap().as_str(), "XY9");
    }

    #[test]
    fn test_blank_code_rejected() {
        assert!(matches!(
            RoomCode::parse("   "),
            Err(RoomError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_phases() {
        let mut room = room_with_creator();
        assert_eq!(room.phase(), RoomPhase::Waiting);

        room.seat(ConnectionId::from(2), "Bob".into()).unwrap();
        assert_eq!(room.phase(), RoomPhase::Active);

        for index in [0, 3, 1, 4, 2] {
            let pos = roomtoe_tictactoe::Position::from_index(index).unwrap();
            room.game_mut().place(pos).unwrap();
        }
        assert_eq!(room.phase(), RoomPhase::Finished);

        room.remove_player(ConnectionId::from(2));
        assert_eq!(room.phase(), RoomPhase::Waiting);
        assert!(room.winner().is_none());
        assert_eq!(room.game().board().occupied_count(), 5);
    }

    #[test]
    fn test_second_seat_is_o_and_third_is_refused() {
        let mut room = room_with_creator();
        let joined = room.seat(ConnectionId::from(2), "Bob".into()).unwrap();
        assert_eq!(*joined.symbol(), Symbol::O);
        assert!(room.is_started());

        assert_eq!(
            room.seat(ConnectionId::from(3), "Carol".into()),
            Err(RoomError::RoomFull)
        );
        assert_eq!(room.players().len(), 2);
    }

    #[test]
    fn test_newcomer_takes_free_symbol_after_x_leaves() {
        let mut room = room_with_creator();
        room.seat(ConnectionId::from(2), "Bob".into()).unwrap();
        room.remove_player(ConnectionId::from(1));

        let joined = room.seat(ConnectionId::from(3), "Carol".into()).unwrap();
        assert_eq!(*joined.symbol(), Symbol::X);
    }

    #[test]
    fn test_same_connection_cannot_take_second_seat() {
        let mut room = room_with_creator();
        assert_eq!(
            room.seat(ConnectionId::from(1), "Alice again".into()),
            Err(RoomError::InvalidRequest("Already in this room".into()))
        );
        assert_eq!(room.players().len(), 1);
        assert!(!room.is_started());
    }

    #[test]
    fn test_removing_unknown_connection_is_noop() {
        let mut room = room_with_creator();
        assert!(room.remove_player(ConnectionId::from(9)).is_none());
        assert_eq!(room.players().len(), 1);
    }
}
