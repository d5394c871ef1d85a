//! Snakes, ladders and the classic board.

use crate::board::FINISH_TILE;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A snake: landing on `head` sends the player down to `tail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snake {
    head: u8,
    tail: u8,
}

impl Snake {
    /// Creates a snake, checking `1 <= tail < head <= 99`.
    #[instrument]
    pub fn new(head: u8, tail: u8) -> Result<Self, ValidationError> {
        if tail == 0 || tail >= head || head >= FINISH_TILE {
            return Err(ValidationError::MalformedObstacle(format!(
                "snake {} -> {}",
                head, tail
            )));
        }
        Ok(Self { head, tail })
    }

    pub(crate) const fn new_unchecked(head: u8, tail: u8) -> Self {
        Self { head, tail }
    }

    /// Tile that triggers the snake.
    pub fn head(self) -> u8 {
        self.head
    }

    /// Tile the snake drops the player on.
    pub fn tail(self) -> u8 {
        self.tail
    }
}

/// A ladder: landing on `bottom` lifts the player to `top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ladder {
    bottom: u8,
    top: u8,
}

impl Ladder {
    /// Creates a ladder, checking `1 <= bottom < top <= 100`.
    #[instrument]
    pub fn new(bottom: u8, top: u8) -> Result<Self, ValidationError> {
        if bottom == 0 || bottom >= top || top > FINISH_TILE {
            return Err(ValidationError::MalformedObstacle(format!(
                "ladder {} -> {}",
                bottom, top
            )));
        }
        Ok(Self { bottom, top })
    }

    pub(crate) const fn new_unchecked(bottom: u8, top: u8) -> Self {
        Self { bottom, top }
    }

    /// Tile that triggers the ladder.
    pub fn bottom(self) -> u8 {
        self.bottom
    }

    /// Tile the ladder lifts the player to.
    pub fn top(self) -> u8 {
        self.top
    }
}

const CLASSIC_SNAKES: [Snake; 7] = [
    Snake::new_unchecked(99, 54),
    Snake::new_unchecked(95, 72),
    Snake::new_unchecked(88, 36),
    Snake::new_unchecked(62, 18),
    Snake::new_unchecked(48, 26),
    Snake::new_unchecked(36, 6),
    Snake::new_unchecked(32, 10),
];

const CLASSIC_LADDERS: [Ladder; 8] = [
    Ladder::new_unchecked(4, 14),
    Ladder::new_unchecked(9, 31),
    Ladder::new_unchecked(20, 38),
    Ladder::new_unchecked(28, 84),
    Ladder::new_unchecked(40, 59),
    Ladder::new_unchecked(51, 67),
    Ladder::new_unchecked(63, 81),
    Ladder::new_unchecked(71, 91),
];

/// What a single tile triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecialTile {
    /// Snake whose head sits on the tile.
    pub snake: Option<Snake>,
    /// Ladder whose bottom sits on the tile.
    pub ladder: Option<Ladder>,
}

impl SpecialTile {
    /// Returns true if the tile has a snake head.
    pub fn has_snake(&self) -> bool {
        self.snake.is_some()
    }

    /// Returns true if the tile has a ladder bottom.
    pub fn has_ladder(&self) -> bool {
        self.ladder.is_some()
    }
}

/// The active snakes and ladders of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSet {
    snakes: Vec<Snake>,
    ladders: Vec<Ladder>,
}

impl ObstacleSet {
    /// Creates a set from already validated obstacles.
    pub fn new(snakes: Vec<Snake>, ladders: Vec<Ladder>) -> Self {
        Self { snakes, ladders }
    }

    /// The hand-authored board: 7 snakes and 8 ladders.
    #[instrument]
    pub fn classic() -> Self {
        Self::new(CLASSIC_SNAKES.to_vec(), CLASSIC_LADDERS.to_vec())
    }

    /// Returns the snakes.
    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    /// Returns the ladders.
    pub fn ladders(&self) -> &[Ladder] {
        &self.ladders
    }

    /// Snake whose head is on `tile`, if any.
    pub fn snake_at(&self, tile: u8) -> Option<Snake> {
        self.snakes.iter().copied().find(|s| s.head == tile)
    }

    /// Ladder whose bottom is on `tile`, if any.
    pub fn ladder_at(&self, tile: u8) -> Option<Ladder> {
        self.ladders.iter().copied().find(|l| l.bottom == tile)
    }

    /// Looks up both obstacle kinds for a tile.
    pub fn special_tile(&self, tile: u8) -> SpecialTile {
        SpecialTile {
            snake: self.snake_at(tile),
            ladder: self.ladder_at(tile),
        }
    }

    /// Every endpoint of every obstacle, snakes first.
    pub fn endpoints(&self) -> impl Iterator<Item = u8> + '_ {
        self.snakes
            .iter()
            .flat_map(|s| [s.head, s.tail])
            .chain(self.ladders.iter().flat_map(|l| [l.bottom, l.top]))
    }

    /// Tiles that redirect a player (snake heads and ladder bottoms).
    pub fn triggers(&self) -> impl Iterator<Item = u8> + '_ {
        self.snakes
            .iter()
            .map(|s| s.head)
            .chain(self.ladders.iter().map(|l| l.bottom))
    }
}

impl Default for ObstacleSet {
    fn default() -> Self {
        Self::classic()
    }
}
