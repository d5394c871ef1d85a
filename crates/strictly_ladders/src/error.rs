//! Error types for the game core.

use crate::types::{GameStatus, PlayerId};
use derive_more::{Display, Error};
use tracing::instrument;

/// Input rejected by a transition.
///
/// A rejected action never changes the game state; the error only tells the
/// caller why nothing happened.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ValidationError {
    /// Player count outside 0..=4.
    #[display("Player count {} is outside 0..=4", _0)]
    PlayerCountOutOfRange(usize),

    /// No player with this id is seated.
    #[display("No player with id {}", _0)]
    UnknownPlayer(PlayerId),

    /// Dice values are 1..=6.
    #[display("Dice value {} is outside 1..=6", _0)]
    DiceValueOutOfRange(u8),

    /// Positions are 0..=100.
    #[display("Tile {} is not on the board", _0)]
    TileOutOfRange(u8),

    /// A snake or ladder with impossible endpoints.
    #[display("Malformed obstacle: {}", _0)]
    MalformedObstacle(String),

    /// A roll is already in flight.
    #[display("Dice are already rolling")]
    AlreadyRolling,

    /// Rolls are only admitted while playing.
    #[display("Cannot roll while the game is in {} phase", _0)]
    NotPlaying(GameStatus),

    /// The game already has a winner.
    #[display("Player {} has already won", _0)]
    AlreadyWon(PlayerId),

    /// The action needs at least one seated player.
    #[display("No players are seated")]
    NoPlayers,

    /// A transition produced a state that breaks a game invariant.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for ValidationError {}

/// Which kind of obstacle could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ObstacleKind {
    /// A snake.
    #[display("snake")]
    Snake,
    /// A ladder.
    #[display("ladder")]
    Ladder,
}

/// Obstacle generation ran out of placement attempts.
///
/// Recoverable: callers install the classic board instead.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display(
    "Could not place {} #{} after {} attempts at {}:{}",
    kind,
    index,
    attempts,
    file,
    line
)]
pub struct GenerationError {
    /// Kind of obstacle being placed.
    pub kind: ObstacleKind,
    /// Zero-based index of the obstacle within its kind.
    pub index: usize,
    /// Attempts spent before giving up.
    pub attempts: u32,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GenerationError {
    /// Creates a new generation error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ObstacleKind, index: usize, attempts: u32) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            index,
            attempts,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
