//! Core domain types for snakes and ladders.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Identifier of a player, unique within one game (1-based).
pub type PlayerId = u8;

/// Largest supported number of local players.
pub const MAX_PLAYERS: usize = 4;

/// Display color assigned to a player token.
///
/// The palette is fixed and indexed by player id: player 1 is always blue.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerColor {
    /// First player.
    Blue,
    /// Second player.
    Red,
    /// Third player.
    Green,
    /// Fourth player.
    Purple,
}

impl PlayerColor {
    /// The four palette entries in player order.
    pub const PALETTE: [PlayerColor; MAX_PLAYERS] = [
        PlayerColor::Blue,
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Purple,
    ];

    /// Returns the palette entry for a player id (1..=4).
    #[instrument]
    pub fn for_player(id: PlayerId) -> Option<Self> {
        (id as usize)
            .checked_sub(1)
            .and_then(|index| Self::PALETTE.get(index).copied())
    }

    /// Opaque token a renderer maps to an actual color.
    pub fn token(self) -> &'static str {
        match self {
            PlayerColor::Blue => "player-1",
            PlayerColor::Red => "player-2",
            PlayerColor::Green => "player-3",
            PlayerColor::Purple => "player-4",
        }
    }
}

/// A player token on the board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Player id (1-based).
    id: PlayerId,
    /// Display name ("Player N").
    name: String,
    /// Tile the player stands on; 0 means not yet on the board.
    position: u8,
    /// Token color.
    color: PlayerColor,
    /// Whether it is this player's turn.
    is_active: bool,
}

impl Player {
    /// Creates the player with the given id at the start position.
    ///
    /// Returns `None` when the id has no palette entry.
    #[instrument]
    pub fn new(id: PlayerId) -> Option<Self> {
        let color = PlayerColor::for_player(id)?;
        Some(Self {
            id,
            name: format!("Player {}", id),
            position: 0,
            color,
            is_active: id == 1,
        })
    }

    /// Returns true once the player has entered the board.
    pub fn is_on_board(&self) -> bool {
        self.position > 0
    }

    pub(crate) fn set_position(&mut self, position: u8) {
        self.position = position;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

/// Phase of the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameStatus {
    /// Choosing the number of players.
    #[default]
    Setup,
    /// Turns are being played.
    Playing,
    /// A player reached the finish tile.
    Finished,
}

/// Visual theme, carried for the presentation layer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    /// Plain board.
    #[default]
    Classic,
    /// Cartoon board.
    Cartoon,
}

/// Board difficulty, which decides how many snakes and ladders are placed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// 5 snakes, 6 ladders; restarts use the classic board.
    Easy,
    /// 7 snakes, 8 ladders.
    #[default]
    Medium,
    /// 9 snakes, 10 ladders.
    Hard,
}

impl Difficulty {
    /// Number of snakes and ladders a generated board has.
    #[instrument]
    pub fn obstacle_counts(self) -> ObstacleCounts {
        match self {
            Difficulty::Easy => ObstacleCounts::new(5, 6),
            Difficulty::Medium => ObstacleCounts::new(7, 8),
            Difficulty::Hard => ObstacleCounts::new(9, 10),
        }
    }
}

/// How many snakes and ladders to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObstacleCounts {
    /// Number of snakes.
    pub snakes: usize,
    /// Number of ladders.
    pub ladders: usize,
}

impl ObstacleCounts {
    /// Creates a new count pair.
    pub const fn new(snakes: usize, ladders: usize) -> Self {
        Self { snakes, ladders }
    }
}

/// Named audio hook points.
///
/// The core only names the moments a sound would play; producing audio is
/// left to whoever renders the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SoundCue {
    /// Dice start rolling.
    DiceRoll,
    /// A token moved to a plain tile.
    Move,
    /// A token slid down a snake.
    Snake,
    /// A token climbed a ladder.
    Ladder,
    /// A player won.
    Win,
    /// Looping background track.
    BackgroundMusic,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_palette_is_indexed_by_id() {
        assert_eq!(PlayerColor::for_player(1), Some(PlayerColor::Blue));
        assert_eq!(PlayerColor::for_player(4), Some(PlayerColor::Purple));
        assert_eq!(PlayerColor::for_player(0), None);
        assert_eq!(PlayerColor::for_player(5), None);
    }

    #[test]
    fn test_new_player_starts_off_board() {
        let player = Player::new(2).expect("palette has a second color");
        assert_eq!(player.name(), "Player 2");
        assert_eq!(*player.position(), 0);
        assert!(!player.is_on_board());
        assert!(!*player.is_active());
    }

    #[test]
    fn test_difficulty_counts() {
        assert_eq!(Difficulty::Easy.obstacle_counts(), ObstacleCounts::new(5, 6));
        assert_eq!(Difficulty::Medium.obstacle_counts(), ObstacleCounts::new(7, 8));
        assert_eq!(Difficulty::Hard.obstacle_counts(), ObstacleCounts::new(9, 10));
    }

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!(Difficulty::from_str("HARD").ok(), Some(Difficulty::Hard));
        assert_eq!(Theme::from_str("cartoon").ok(), Some(Theme::Cartoon));
        assert!(Difficulty::from_str("nightmare").is_err());
    }
}
