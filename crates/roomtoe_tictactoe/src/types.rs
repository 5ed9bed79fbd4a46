//! Core domain types for tic-tac-toe.

use crate::error::PlaceError;
use crate::position::Position;
use derive_more::Display;
use serde::Serialize;

/// Mark a player places on the board.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Symbol {
    /// First seat; always moves first.
    X,
    /// Second seat.
    O,
}

impl Symbol {
    /// Returns the opposing symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// A square on the tic-tac-toe board.
///
/// Serialized as `null` when empty and as the occupying symbol otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "Option<Symbol>")]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a symbol.
    Occupied(Symbol),
}

impl Square {
    /// Returns the occupying symbol, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Square::Empty => None,
            Square::Occupied(symbol) => Some(symbol),
        }
    }
}

impl From<Square> for Option<Symbol> {
    fn from(value: Square) -> Self {
        value.symbol()
    }
}

/// 3x3 tic-tac-toe board.
///
/// Squares only ever go from empty to occupied through [`Board::occupy`];
/// clearing happens by replacing the whole board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Marks an empty square with `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::SquareOccupied`] if the square already holds a symbol.
    pub fn occupy(&mut self, pos: Position, symbol: Symbol) -> Result<(), PlaceError> {
        let square = &mut self.squares[pos.to_index()];
        if *square != Square::Empty {
            return Err(PlaceError::SquareOccupied(pos));
        }
        *square = Square::Occupied(symbol);
        Ok(())
    }
}

/// A placement recorded in a game's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Who moved.
    pub symbol: Symbol,
    /// Where.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(symbol: Symbol, position: Position) -> Self {
        Self { symbol, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupy_refuses_overwrite() {
        let mut board = Board::new();
        board.occupy(Position::Center, Symbol::X).unwrap();
        assert_eq!(
            board.occupy(Position::Center, Symbol::O),
            Err(PlaceError::SquareOccupied(Position::Center))
        );
        assert_eq!(board.get(Position::Center), Square::Occupied(Symbol::X));
    }

    #[test]
    fn test_board_serializes_as_nullable_array() {
        let mut board = Board::new();
        board.occupy(Position::TopLeft, Symbol::X).unwrap();
        board.occupy(Position::Center, Symbol::O).unwrap();

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(
            json,
            serde_json::json!(["X", null, null, null, "O", null, null, null, null])
        );
    }
}
