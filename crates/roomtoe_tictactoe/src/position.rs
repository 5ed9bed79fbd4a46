//! The nine cells, numbered 0-8 in row-major order.

use crate::types::Board;
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};
use tracing::instrument;

/// A cell of the board. The discriminant is the wire index.
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    FromRepr,
)]
#[repr(usize)]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    /// Index 0.
    TopLeft,
    /// Index 1.
    TopCenter,
    /// Index 2.
    TopRight,
    /// Index 3.
    MiddleLeft,
    /// Index 4.
    Center,
    /// Index 5.
    MiddleRight,
    /// Index 6.
    BottomLeft,
    /// Index 7.
    BottomCenter,
    /// Index 8.
    BottomRight,
}

impl Position {
    /// Board index of this cell.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// The cell at `index`, or `None` past the board.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::from_repr(index)
    }

    /// Empty cells of `board` in index order.
    #[instrument(skip(board))]
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::iter().filter(|pos| board.is_empty(*pos)).collect()
    }
}
