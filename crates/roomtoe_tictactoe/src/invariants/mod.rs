//! Properties every [`Game`](crate::Game) satisfies between placements.
//!
//! Each invariant is a zero-sized type implementing [`Invariant`]. Tuples of
//! invariants form an [`InvariantSet`] that reports every failure at once.

mod alternating_turn;
mod monotonic_board;

pub use alternating_turn::AlternatingTurnInvariant;
pub use monotonic_board::MonotonicBoardInvariant;

use derive_more::Display;

/// A named predicate over some state `S`.
pub trait Invariant<S> {
    /// Whether `state` satisfies the predicate.
    fn holds(state: &S) -> bool;

    /// One-line statement of the predicate.
    fn description() -> &'static str;
}

/// A failed invariant.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display("invariant violated: {description}")]
pub struct InvariantViolation {
    /// Statement of the invariant that failed.
    pub description: &'static str,
}

/// Invariants checked as a group.
pub trait InvariantSet<S> {
    /// Checks every member, returning all that fail.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($member:ident),+) => {
        impl<S, $($member: Invariant<S>),+> InvariantSet<S> for ($($member,)+) {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<_> = [$(($member::holds(state), $member::description())),+]
                    .into_iter()
                    .filter(|(held, _)| !held)
                    .map(|(_, description)| InvariantViolation { description })
                    .collect();
                if violations.is_empty() { Ok(()) } else { Err(violations) }
            }
        }
    };
}

impl_invariant_set!(A);
impl_invariant_set!(A, B);
impl_invariant_set!(A, B, C);

/// Everything a game must uphold while play continues normally.
pub type GameInvariants = (MonotonicBoardInvariant, AlternatingTurnInvariant);
