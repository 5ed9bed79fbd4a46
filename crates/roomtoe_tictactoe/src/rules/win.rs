//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Board, Square, Symbol};
use tracing::instrument;

/// The eight winning triples, checked in this order: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Three in a row: who made it and which board indices form it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    /// The winning symbol.
    pub symbol: Symbol,
    /// Board indices of the line, in line order.
    pub pattern: [usize; 3],
}

/// Returns the first line in [`LINES`] held entirely by one symbol.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|&[a, b, c]| {
        let sq = board.get(a);
        match sq {
            Square::Occupied(symbol) if sq == board.get(b) && sq == board.get(c) => Some(WinningLine {
                symbol,
                pattern: [a.to_index(), b.to_index(), c.to_index()],
            }),
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Symbol> {
    winning_line(board).map(|line| line.symbol)
}
