//! First-class invariants for snakes and ladders.
//!
//! Invariants are logical properties that must hold after every
//! transition. They are testable independently and document what the
//! state machine guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants over the same state.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns every violation, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

// Implement InvariantSet for 4-tuples
impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if !I4::holds(state) {
            violations.push(InvariantViolation::new(I4::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

// Implement InvariantSet for 2-tuples
impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod obstacles;
pub mod positions;
pub mod turn_pointer;
pub mod winner;

pub use obstacles::{DistinctEndpoints, ObstaclesWellFormed};
pub use positions::PositionsOnBoard;
pub use turn_pointer::TurnPointerInBounds;
pub use winner::WinnerConsistent;

/// All game-state invariants as a composable set.
pub type GameInvariants = (
    TurnPointerInBounds,
    PositionsOnBoard,
    WinnerConsistent,
    ObstaclesWellFormed,
);

/// Invariants a freshly generated board satisfies.
pub type GeneratedBoardInvariants = (ObstaclesWellFormed, DistinctEndpoints);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacles::ObstacleSet;
    use crate::state::GameState;

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let state = GameState::new();
        assert!(GameInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_while_playing() {
        let mut state = GameState::new();
        state.seat_players_for_test(&[12, 40, 0]);
        assert!(GameInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = GameState::new();
        state.seat_players_for_test(&[12]);
        state.force_position(0, 140);
        state.force_current_index(3);
        let violations = GameInvariants::check_all(&state).expect_err("corrupted state");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_classic_board_is_not_endpoint_distinct() {
        // The hand-authored board reuses tile 36; only generated boards
        // promise distinct endpoints.
        let board = ObstacleSet::classic();
        assert!(<ObstaclesWellFormed as Invariant<ObstacleSet>>::holds(&board));
        assert!(GeneratedBoardInvariants::check_all(&board).is_err());
    }
}
