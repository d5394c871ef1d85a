//! Seating invariant: players are numbered 1..=n and stand on the board.

use super::Invariant;
use crate::board::FINISH_TILE;
use crate::state::GameState;
use crate::types::MAX_PLAYERS;

/// Invariant: at most four players, ids 1..=n in seat order, positions 0..=100.
pub struct PositionsOnBoard;

impl Invariant<GameState> for PositionsOnBoard {
    fn holds(state: &GameState) -> bool {
        let players = state.players();
        players.len() <= MAX_PLAYERS
            && players.iter().enumerate().all(|(seat, p)| {
                *p.id() as usize == seat + 1 && *p.position() <= FINISH_TILE
            })
    }

    fn description() -> &'static str {
        "Players are seated 1..=n and stand on tiles 0..=100"
    }
}
