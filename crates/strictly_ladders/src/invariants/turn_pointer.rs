//! Turn pointer invariant: the current index names a seat and only that seat is active.

use super::Invariant;
use crate::state::GameState;

/// Invariant: `current_player_index` is in range and matches `is_active`.
///
/// With no players seated the index must be 0.
pub struct TurnPointerInBounds;

impl Invariant<GameState> for TurnPointerInBounds {
    fn holds(state: &GameState) -> bool {
        let index = *state.current_player_index();
        let players = state.players();

        if players.is_empty() {
            return index == 0;
        }

        index < players.len()
            && players
                .iter()
                .enumerate()
                .all(|(i, p)| *p.is_active() == (i == index))
    }

    fn description() -> &'static str {
        "Current player index points at the single active player"
    }
}
