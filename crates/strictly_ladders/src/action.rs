//! First-class actions for the snakes and ladders state machine.
//!
//! Actions are domain events rather than side effects: they carry the
//! intent and are validated by the reducer before anything changes.

use crate::types::{Difficulty, PlayerId, Theme};
use serde::{Deserialize, Serialize};

/// Every transition the state machine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum GameAction {
    /// Seats `count` players and starts playing, or returns to setup for 0.
    InitializePlayers {
        /// Number of players (0..=4).
        count: usize,
    },
    /// Starts a roll; admitted only while playing, idle and without winner.
    RollDice,
    /// Settles a roll on the given face.
    SetDiceValue(u8),
    /// Places a player on a resolved tile.
    MovePlayer {
        /// Player to move.
        player_id: PlayerId,
        /// Tile after movement resolution.
        new_position: u8,
    },
    /// Passes the turn to the next seat.
    NextTurn,
    /// Resets positions and redraws the board for the current difficulty.
    RestartGame,
    /// Changes the visual theme.
    SetTheme(Theme),
    /// Changes difficulty and immediately redraws the board.
    SetDifficulty(Difficulty),
    /// Flips the sound flag.
    ToggleSound,
}

impl std::fmt::Display for GameAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameAction::InitializePlayers { count } => write!(f, "initialize {} players", count),
            GameAction::RollDice => write!(f, "roll dice"),
            GameAction::SetDiceValue(value) => write!(f, "set dice to {}", value),
            GameAction::MovePlayer {
                player_id,
                new_position,
            } => {
                write!(f, "move player {} to {}", player_id, new_position)
            }
            GameAction::NextTurn => write!(f, "next turn"),
            GameAction::RestartGame => write!(f, "restart"),
            GameAction::SetTheme(theme) => write!(f, "theme {}", theme),
            GameAction::SetDifficulty(difficulty) => write!(f, "difficulty {}", difficulty),
            GameAction::ToggleSound => write!(f, "toggle sound"),
        }
    }
}
