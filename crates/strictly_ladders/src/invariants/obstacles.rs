//! Obstacle invariants.

use super::Invariant;
use crate::board::FINISH_TILE;
use crate::obstacles::ObstacleSet;
use crate::state::GameState;
use std::collections::HashSet;

/// Invariant: obstacles point the right way, no tile triggers two
/// obstacles, and the finish tile triggers nothing.
pub struct ObstaclesWellFormed;

impl Invariant<ObstacleSet> for ObstaclesWellFormed {
    fn holds(board: &ObstacleSet) -> bool {
        let snakes_ok = board
            .snakes()
            .iter()
            .all(|s| s.tail() >= 1 && s.tail() < s.head() && s.head() < FINISH_TILE);
        let ladders_ok = board
            .ladders()
            .iter()
            .all(|l| l.bottom() >= 1 && l.bottom() < l.top() && l.top() <= FINISH_TILE);

        let mut seen = HashSet::new();
        let triggers_ok = board
            .triggers()
            .all(|tile| tile != FINISH_TILE && seen.insert(tile));

        snakes_ok && ladders_ok && triggers_ok
    }

    fn description() -> &'static str {
        "Snakes go down, ladders go up, and each tile triggers at most one obstacle"
    }
}

impl Invariant<GameState> for ObstaclesWellFormed {
    fn holds(state: &GameState) -> bool {
        <Self as Invariant<ObstacleSet>>::holds(state.obstacles())
    }

    fn description() -> &'static str {
        <Self as Invariant<ObstacleSet>>::description()
    }
}

/// Invariant: no two endpoints coincide across all snakes and ladders.
///
/// Guaranteed for generated boards.
pub struct DistinctEndpoints;

impl Invariant<ObstacleSet> for DistinctEndpoints {
    fn holds(board: &ObstacleSet) -> bool {
        let mut seen = HashSet::new();
        board.endpoints().all(|tile| seen.insert(tile))
    }

    fn description() -> &'static str {
        "Every obstacle endpoint is on its own tile"
    }
}
