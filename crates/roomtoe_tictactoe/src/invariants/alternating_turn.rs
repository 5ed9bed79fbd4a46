//! Alternating turn invariant: X, O, X, O, ...

use super::Invariant;
use crate::{Game, Symbol};

/// Invariant: symbols alternate starting with X.
///
/// While in progress the current turn is X after an even number of moves and
/// O after an odd number. Once finished the turn stays on the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();

        if let Some(first) = history.first()
            && first.symbol != Symbol::X
        {
            return false;
        }

        if history.windows(2).any(|w| w[0].symbol == w[1].symbol) {
            return false;
        }

        let expected = if game.is_over() {
            match history.last() {
                Some(last) => last.symbol,
                None => return false,
            }
        } else if history.len() % 2 == 0 {
            Symbol::X
        } else {
            Symbol::O
        };

        game.current_turn() == expected
    }

    fn description() -> &'static str {
        "Turns alternate X, O, X, O starting with X"
    }
}
