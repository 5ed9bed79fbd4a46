//! Pure tic-tac-toe game logic.
//!
//! - **Types**: symbols, squares, the 3x3 board, named positions
//! - **Rules**: win and draw detection over a board
//! - **Game**: a single board's engine with turn order and result
//! - **Invariants**: properties every game must satisfy, checked in tests and
//!   debug builds

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use error::PlaceError;
pub use game::{Game, GameResult, Placement};
pub use position::Position;
pub use rules::WinningLine;
pub use types::{Board, Move, Square, Symbol};
