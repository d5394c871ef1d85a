//! Movement resolution.
//!
//! A move adds the roll to the current position. Overshooting the finish
//! tile forfeits the move; otherwise the landing tile may redirect the
//! player once, snakes taking priority over ladders.

use crate::board::FINISH_TILE;
use crate::dice::DieFace;
use crate::obstacles::{Ladder, ObstacleSet, Snake};
use crate::types::SoundCue;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The obstacle that redirected a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Redirect {
    /// Slid down a snake.
    Snake(Snake),
    /// Climbed a ladder.
    Ladder(Ladder),
}

/// Result of resolving one roll for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResolution {
    /// The roll would pass the finish tile; the player stays put.
    Overshoot {
        /// Unchanged position.
        position: u8,
        /// Where the roll would have led.
        candidate: u8,
    },
    /// The player moved.
    Landed {
        /// Position before the move.
        from: u8,
        /// Tile reached by the roll alone.
        candidate: u8,
        /// Final position after any redirect.
        to: u8,
        /// Obstacle taken on `candidate`, if any.
        redirect: Option<Redirect>,
    },
}

impl MoveResolution {
    /// Position the player ends on.
    pub fn final_position(&self) -> u8 {
        match self {
            MoveResolution::Overshoot { position, .. } => *position,
            MoveResolution::Landed { to, .. } => *to,
        }
    }

    /// Returns true if the move reached the finish tile.
    pub fn is_win(&self) -> bool {
        matches!(self, MoveResolution::Landed { to, .. } if *to == FINISH_TILE)
    }

    /// Returns true if the roll was forfeited.
    pub fn is_overshoot(&self) -> bool {
        matches!(self, MoveResolution::Overshoot { .. })
    }

    /// Sound hook for this move, if one applies.
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            MoveResolution::Overshoot { .. } => None,
            MoveResolution::Landed { to, .. } if *to == FINISH_TILE => Some(SoundCue::Win),
            MoveResolution::Landed {
                redirect: Some(Redirect::Snake(_)),
                ..
            } => Some(SoundCue::Snake),
            MoveResolution::Landed {
                redirect: Some(Redirect::Ladder(_)),
                ..
            } => Some(SoundCue::Ladder),
            MoveResolution::Landed { redirect: None, .. } => Some(SoundCue::Move),
        }
    }
}

/// Resolves a roll from `position` against the active obstacles.
#[instrument(skip(obstacles))]
pub fn resolve_move(position: u8, roll: DieFace, obstacles: &ObstacleSet) -> MoveResolution {
    let candidate = position.saturating_add(roll.value());

    if candidate > FINISH_TILE {
        debug!(position, candidate, "Roll overshoots the finish");
        return MoveResolution::Overshoot { position, candidate };
    }

    let redirect = obstacles
        .snake_at(candidate)
        .map(Redirect::Snake)
        .or_else(|| obstacles.ladder_at(candidate).map(Redirect::Ladder));

    let to = match redirect {
        Some(Redirect::Snake(snake)) => snake.tail(),
        Some(Redirect::Ladder(ladder)) => ladder.top(),
        None => candidate,
    };

    debug!(from = position, candidate, to, "Move resolved");
    MoveResolution::Landed {
        from: position,
        candidate,
        to,
        redirect,
    }
}
