//! Monotonic board invariant: squares never change once set.

use super::Invariant;
use crate::{Board, Game};

/// Invariant: board squares are never overwritten.
///
/// Replaying the history onto an empty board must hit only empty squares and
/// reproduce the current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<Game> for MonotonicBoardInvariant {
    fn holds(game: &Game) -> bool {
        let mut reconstructed = Board::new();

        for mov in game.history() {
            if reconstructed.occupy(mov.position, mov.symbol).is_err() {
                return false;
            }
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
