//! Placement errors.

use crate::position::Position;
use derive_more::{Display, Error};

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// The game already has a winner or ended in a draw.
    #[display("Game is already over")]
    GameOver,
    /// The square already holds a symbol.
    #[display("{_0} is already occupied")]
    SquareOccupied(#[error(not(source))] Position),
}
