//! Game engine for a single tic-tac-toe board.

use crate::error::PlaceError;
use crate::invariants::{Invariant, MonotonicBoardInvariant};
use crate::position::Position;
use crate::rules::{WinningLine, is_full, winning_line};
use crate::types::{Board, Move, Symbol};
use tracing::{debug, instrument};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Three in a row.
    Won(WinningLine),
    /// Full board, no line.
    Draw,
}

impl GameResult {
    /// The winning symbol, or `None` for a draw.
    pub fn winner(&self) -> Option<Symbol> {
        match self {
            GameResult::Won(line) => Some(line.symbol),
            GameResult::Draw => None,
        }
    }
}

/// What a successful placement did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Play continues; `next` is now to move.
    Continue {
        /// Symbol whose move is accepted next.
        next: Symbol,
    },
    /// The placement completed a line.
    Won(WinningLine),
    /// The placement filled the board without a line.
    Draw,
}

/// Tic-tac-toe game engine.
///
/// The mover is always the current turn. Once a result is set the board is
/// frozen until [`Game::restart`] or [`Game::clear_result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_turn: Symbol,
    result: Option<GameResult>,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: Symbol::X,
            result: None,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Symbol whose move is accepted. Meaningless once a result is set.
    pub fn current_turn(&self) -> Symbol {
        self.current_turn
    }

    /// The result, if the game has finished.
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Whether a result is set.
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Placements since the last restart.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Places the current turn's symbol at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::GameOver`] if a result is already set and
    /// [`PlaceError::SquareOccupied`] if the square is taken.
    #[instrument(skip(self), fields(turn = %self.current_turn))]
    pub fn place(&mut self, pos: Position) -> Result<Placement, PlaceError> {
        if self.result.is_some() {
            return Err(PlaceError::GameOver);
        }

        let symbol = self.current_turn;
        self.board.occupy(pos, symbol)?;
        self.history.push(Move::new(symbol, pos));

        let placement = if let Some(line) = winning_line(&self.board) {
            self.result = Some(GameResult::Won(line));
            Placement::Won(line)
        } else if is_full(&self.board) {
            self.result = Some(GameResult::Draw);
            Placement::Draw
        } else {
            self.current_turn = symbol.opponent();
            Placement::Continue {
                next: self.current_turn,
            }
        };

        debug_assert!(
            MonotonicBoardInvariant::holds(self),
            "{}",
            MonotonicBoardInvariant::description()
        );
        debug!(?placement, "Placed symbol");
        Ok(placement)
    }

    /// Empties the board, gives X the move and clears the result.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Drops the result but leaves board and turn untouched.
    #[instrument(skip(self))]
    pub fn clear_result(&mut self) {
        self.result = None;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
