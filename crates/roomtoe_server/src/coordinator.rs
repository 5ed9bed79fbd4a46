//! The room coordinator: sole owner and writer of room state.

use crate::connection::ConnectionId;
use crate::error::RoomError;
use crate::protocol::{
    ClientMessage, GameRestarted, GameStarted, GameWon, MoveMade, PlayerJoined, RoomCreated,
    ServerMessage,
};
use crate::room::{Player, Room, RoomCode};
use crate::store::{MemoryRoomStore, RoomStore};
use roomtoe_tictactoe::{PlaceError, Placement, Position, Symbol};
use tracing::{debug, info, instrument, warn};

/// An outbound message and the connections that should receive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Receiving connections.
    pub recipients: Vec<ConnectionId>,
    /// What they receive.
    pub message: ServerMessage,
}

impl Dispatch {
    /// A message for a single connection.
    pub fn to(recipient: ConnectionId, message: ServerMessage) -> Self {
        Self {
            recipients: vec![recipient],
            message,
        }
    }

    /// A message for every seated player of `room`.
    pub fn to_room(room: &Room, message: ServerMessage) -> Self {
        Self {
            recipients: room.connections(),
            message,
        }
    }
}

/// Applies player intents to rooms and reports what to broadcast.
///
/// Operations never block and never fail fatally. Refusals that the caller
/// should hear about come back as [`RoomError`]; stale or illegal moves are
/// silently ignored and yield no dispatches.
#[derive(Debug, Default)]
pub struct RoomCoordinator<S = MemoryRoomStore> {
    store: S,
}

impl<S: RoomStore> RoomCoordinator<S> {
    /// Creates a coordinator over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Looks up a room by caller-supplied code.
    pub fn room(&self, code: &str) -> Option<&Room> {
        let code = RoomCode::parse(code).ok()?;
        self.store.get(&code)
    }

    /// Routes an inbound message from `connection`.
    ///
    /// Errors are turned into a reply to the caller only.
    #[instrument(skip(self, message), fields(%connection))]
    pub fn handle(&mut self, connection: ConnectionId, message: ClientMessage) -> Vec<Dispatch> {
        let outcome = match message {
            ClientMessage::CreateRoom(req) => {
                self.create_room(&req.room_code, &req.player_name, connection)
            }
            ClientMessage::JoinRoom(req) => {
                self.join_room(&req.room_code, &req.player_name, connection)
            }
            ClientMessage::MakeMove(req) => self.make_move(&req.room_code, req.position, connection),
            ClientMessage::RestartGame(req) => Ok(self.restart_game(&req.room_code)),
            ClientMessage::LeaveRoom(req) => Ok(self.leave_room(&req.room_code, connection)),
        };

        outcome.unwrap_or_else(|err| vec![Dispatch::to(connection, err.into_message())])
    }

    /// Opens a room with the caller in seat X.
    ///
    /// # Errors
    ///
    /// [`RoomError::RoomExists`] if the code is taken, or
    /// [`RoomError::InvalidRequest`] for a blank code or name.
    #[instrument(skip(self), fields(%connection))]
    pub fn create_room(
        &mut self,
        code: &str,
        player_name: &str,
        connection: ConnectionId,
    ) -> Result<Vec<Dispatch>, RoomError> {
        let code = RoomCode::parse(code)?;
        let name = parse_player_name(player_name)?;

        if self.store.contains(&code) {
            warn!(room = %code, "Room already exists");
            return Err(RoomError::RoomExists);
        }

        let creator = Player::new(connection, name.clone(), Symbol::X);
        self.store.insert(Room::new(code.clone(), creator));
        info!(room = %code, player = %name, "Room created");

        Ok(vec![Dispatch::to(
            connection,
            ServerMessage::RoomCreated(RoomCreated {
                room_code: code,
                symbol: Symbol::X,
                player_name: name,
            }),
        )])
    }

    /// Seats the caller in an existing room and starts play.
    ///
    /// Everyone in the room gets `gameStarted`; the player already sitting
    /// also gets `playerJoined` naming the newcomer.
    ///
    /// # Errors
    ///
    /// [`RoomError::RoomNotFound`], [`RoomError::RoomFull`], or
    /// [`RoomError::InvalidRequest`] for a blank code or name or a caller
    /// already seated in the room.
    #[instrument(skip(self), fields(%connection))]
    pub fn join_room(
        &mut self,
        code: &str,
        player_name: &str,
        connection: ConnectionId,
    ) -> Result<Vec<Dispatch>, RoomError> {
        let code = RoomCode::parse(code)?;
        let name = parse_player_name(player_name)?;

        let Some(room) = self.store.get_mut(&code) else {
            warn!(room = %code, "Join to missing room");
            return Err(RoomError::RoomNotFound);
        };

        let joined = room.seat(connection, name).inspect_err(|err| {
            warn!(room = %code, error = %err, "Join refused");
        })?;
        let joined_event = PlayerJoined {
            player_name: joined.name().clone(),
            player_symbol: *joined.symbol(),
        };
        info!(room = %code, player = %joined_event.player_name, "Player joined");

        let started = ServerMessage::GameStarted(GameStarted {
            players: room.players().to_vec(),
            current_turn: room.game().current_turn(),
            board: room.game().board().clone(),
        });
        let mut dispatches = vec![Dispatch::to_room(room, started)];

        let sitting: Vec<ConnectionId> = room
            .connections()
            .into_iter()
            .filter(|c| *c != connection)
            .collect();
        if !sitting.is_empty() {
            dispatches.push(Dispatch {
                recipients: sitting,
                message: ServerMessage::PlayerJoined(joined_event),
            });
        }

        Ok(dispatches)
    }

    /// Places the caller's symbol at board index `position`.
    ///
    /// Missing rooms, rooms not started, finished games, out-of-range
    /// positions and occupied squares are ignored.
    ///
    /// # Errors
    ///
    /// [`RoomError::InvalidMove`] if the caller is not the player to move.
    #[instrument(skip(self), fields(%connection))]
    pub fn make_move(
        &mut self,
        code: &str,
        position: usize,
        connection: ConnectionId,
    ) -> Result<Vec<Dispatch>, RoomError> {
        let Ok(code) = RoomCode::parse(code) else {
            debug!("Move without room code ignored");
            return Ok(Vec::new());
        };
        let Some(room) = self.store.get_mut(&code) else {
            debug!(room = %code, "Move for missing room ignored");
            return Ok(Vec::new());
        };
        if !room.is_started() || room.game().is_over() {
            debug!(room = %code, phase = %room.phase(), "Move outside active play ignored");
            return Ok(Vec::new());
        }

        let turn = room.game().current_turn();
        let mover = room.player(connection).map(|p| *p.symbol());
        if mover != Some(turn) {
            warn!(room = %code, ?mover, %turn, "Move out of turn");
            return Err(RoomError::InvalidMove);
        }

        let Some(pos) = Position::from_index(position) else {
            debug!(room = %code, "Move off the board ignored");
            return Ok(Vec::new());
        };

        let placed = room.game_mut().place(pos);
        let message = match placed {
            Ok(Placement::Continue { next }) => ServerMessage::MoveMade(MoveMade {
                board: room.game().board().clone(),
                next_turn: next,
            }),
            Ok(Placement::Won(line)) => {
                info!(room = %code, winner = %line.symbol, pattern = ?line.pattern, "Game won");
                ServerMessage::GameWon(GameWon {
                    winner: line.symbol,
                    winning_pattern: line.pattern,
                })
            }
            Ok(Placement::Draw) => {
                info!(room = %code, "Game drawn");
                ServerMessage::GameDraw
            }
            Err(err @ (PlaceError::SquareOccupied(_) | PlaceError::GameOver)) => {
                debug!(room = %code, error = %err, "Move ignored");
                return Ok(Vec::new());
            }
        };

        Ok(vec![Dispatch::to_room(room, message)])
    }

    /// Clears the board for another game, keeping seats and symbols.
    #[instrument(skip(self))]
    pub fn restart_game(&mut self, code: &str) -> Vec<Dispatch> {
        let Ok(code) = RoomCode::parse(code) else {
            debug!("Restart without room code ignored");
            return Vec::new();
        };
        let Some(room) = self.store.get_mut(&code) else {
            debug!(room = %code, "Restart for missing room ignored");
            return Vec::new();
        };

        room.game_mut().restart();
        info!(room = %code, "Game restarted");

        let message = ServerMessage::GameRestarted(GameRestarted {
            board: room.game().board().clone(),
            current_turn: room.game().current_turn(),
        });
        vec![Dispatch::to_room(room, message)]
    }

    /// Removes the caller from the named room.
    #[instrument(skip(self), fields(%connection))]
    pub fn leave_room(&mut self, code: &str, connection: ConnectionId) -> Vec<Dispatch> {
        match RoomCode::parse(code) {
            Ok(code) => self.remove_player(&code, connection),
            Err(_) => Vec::new(),
        }
    }

    /// Removes a closed connection from the first room seating it.
    #[instrument(skip(self), fields(%connection))]
    pub fn disconnect(&mut self, connection: ConnectionId) -> Vec<Dispatch> {
        match self.store.find_by_connection(connection) {
            Some(code) => self.remove_player(&code, connection),
            None => {
                debug!("Disconnected connection held no seat");
                Vec::new()
            }
        }
    }

    fn remove_player(&mut self, code: &RoomCode, connection: ConnectionId) -> Vec<Dispatch> {
        let Some(room) = self.store.get_mut(code) else {
            return Vec::new();
        };
        let Some(player) = room.remove_player(connection) else {
            debug!(room = %code, "Connection not seated in room");
            return Vec::new();
        };
        info!(room = %code, player = %player.name(), "Player left");

        if room.players().is_empty() {
            self.store.remove(code);
            info!(room = %code, "Room deleted");
            return Vec::new();
        }

        vec![Dispatch::to_room(room, ServerMessage::PlayerDisconnected)]
    }
}

fn parse_player_name(raw: &str) -> Result<String, RoomError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(RoomError::InvalidRequest("Player name is required".to_string()));
    }
    Ok(name.to_string())
}
