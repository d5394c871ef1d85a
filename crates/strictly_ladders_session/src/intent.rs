//! Intents a presentation layer sends to a session.

use serde::{Deserialize, Serialize};
use strictly_ladders::{Difficulty, PlayerId, Theme};

/// A request from whoever drives the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Intent {
    /// Seat `count` players and start playing (0 returns to setup).
    #[display("initialize_players({})", _0)]
    InitializePlayers(usize),
    /// Roll for the current player.
    #[display("roll_dice")]
    RollDice,
    /// Move a player by the value just rolled.
    #[display("move_player({}, {})", player_id, steps)]
    MovePlayer {
        /// Player to move.
        player_id: PlayerId,
        /// Last rolled value.
        steps: u8,
    },
    /// Restart with the same players.
    #[display("restart_game")]
    RestartGame,
    /// Drop all players and return to setup.
    #[display("new_game")]
    NewGame,
    /// Change the visual theme.
    #[display("set_theme({})", _0)]
    SetTheme(Theme),
    /// Change the difficulty and redraw the board.
    #[display("set_difficulty({})", _0)]
    SetDifficulty(Difficulty),
    /// Flip the sound flag.
    #[display("toggle_sound")]
    ToggleSound,
    /// Stop the session task.
    #[display("shutdown")]
    Shutdown,
}
