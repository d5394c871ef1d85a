//! Winner invariant: phase, seating and winner agree.

use super::Invariant;
use crate::board::FINISH_TILE;
use crate::state::GameState;
use crate::types::GameStatus;

/// Invariant: a winner exists exactly when the game is finished, and
/// stands on the finish tile. Setup is the only phase without players.
pub struct WinnerConsistent;

impl Invariant<GameState> for WinnerConsistent {
    fn holds(state: &GameState) -> bool {
        let seated = !state.players().is_empty();
        let phase_ok = match state.game_status() {
            GameStatus::Setup => !seated && state.winner_id().is_none(),
            GameStatus::Playing => seated && state.winner_id().is_none(),
            GameStatus::Finished => seated && state.winner_id().is_some(),
        };

        let winner_ok = match state.winner_id() {
            None => true,
            Some(id) => state
                .player(id)
                .is_some_and(|p| *p.position() == FINISH_TILE),
        };

        phase_ok && winner_ok
    }

    fn description() -> &'static str {
        "Winner is declared exactly when finished and stands on tile 100"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_holds() {
        assert!(WinnerConsistent::holds(&GameState::new()));
    }

    #[test]
    fn test_finished_with_winner_holds() {
        let mut state = GameState::new();
        state.seat_players_for_test(&[100, 3]);
        state.force_winner(1);
        assert!(WinnerConsistent::holds(&state));
    }

    #[test]
    fn test_winner_off_finish_violates() {
        let mut state = GameState::new();
        state.seat_players_for_test(&[99, 3]);
        state.force_winner(1);
        assert!(!WinnerConsistent::holds(&state));
    }
}
