//! Procedural snake and ladder placement.
//!
//! Obstacles are placed by rejection sampling. Every endpoint drawn so far
//! is reserved, so no tile is shared between two obstacles. Each placement
//! has a bounded number of attempts; running out is reported as a
//! [`GenerationError`] instead of looping forever.

use crate::board::FINISH_TILE;
use crate::error::{GenerationError, ObstacleKind};
use crate::obstacles::{Ladder, ObstacleSet, Snake};
use crate::types::{Difficulty, ObstacleCounts};
use rand::Rng;
use tracing::{debug, instrument, warn};

/// Attempts allowed per obstacle before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1_000;

/// Minimum vertical span of any generated obstacle.
const MIN_SPAN: u8 = 10;

const SNAKE_HEAD_MIN: u8 = 20;
const SNAKE_HEAD_MAX: u8 = 99;
const LADDER_BOTTOM_MAX: u8 = 80;
const LADDER_TOP_MAX: u8 = 98;

/// Configurable obstacle generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleGenerator {
    counts: ObstacleCounts,
    max_attempts: u32,
}

impl ObstacleGenerator {
    /// Creates a generator for the given counts.
    #[instrument]
    pub fn new(counts: ObstacleCounts) -> Self {
        Self {
            counts,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates a generator sized for a difficulty.
    #[instrument]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::new(difficulty.obstacle_counts())
    }

    /// Overrides the per-obstacle attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Places all snakes, then all ladders.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when an obstacle cannot be placed on
    /// free tiles within the attempt budget.
    #[instrument(
        skip(self, rng),
        fields(snakes = self.counts.snakes, ladders = self.counts.ladders)
    )]
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ObstacleSet, GenerationError> {
        let mut used = [false; FINISH_TILE as usize + 1];
        let mut snakes = Vec::with_capacity(self.counts.snakes);
        let mut ladders = Vec::with_capacity(self.counts.ladders);

        for index in 0..self.counts.snakes {
            let snake = self.place(ObstacleKind::Snake, index, &mut used, || {
                let head = rng.random_range(SNAKE_HEAD_MIN..=SNAKE_HEAD_MAX);
                let tail = rng.random_range(1..=head - MIN_SPAN);
                (head, tail)
            })?;
            snakes.push(Snake::new_unchecked(snake.0, snake.1));
        }

        for index in 0..self.counts.ladders {
            let ladder = self.place(ObstacleKind::Ladder, index, &mut used, || {
                let bottom = rng.random_range(1..=LADDER_BOTTOM_MAX);
                let top = rng.random_range(bottom + MIN_SPAN..=LADDER_TOP_MAX);
                (bottom, top)
            })?;
            ladders.push(Ladder::new_unchecked(ladder.0, ladder.1));
        }

        debug!(snakes = snakes.len(), ladders = ladders.len(), "Generated obstacles");
        Ok(ObstacleSet::new(snakes, ladders))
    }

    /// Draws endpoint pairs until both are free, then reserves them.
    fn place(
        &self,
        kind: ObstacleKind,
        index: usize,
        used: &mut [bool],
        mut draw: impl FnMut() -> (u8, u8),
    ) -> Result<(u8, u8), GenerationError> {
        for _ in 0..self.max_attempts {
            let (a, b) = draw();
            if a == FINISH_TILE || b == FINISH_TILE || used[a as usize] || used[b as usize] {
                continue;
            }
            used[a as usize] = true;
            used[b as usize] = true;
            return Ok((a, b));
        }
        warn!(%kind, index, attempts = self.max_attempts, "Obstacle placement exhausted");
        Err(GenerationError::new(kind, index, self.max_attempts))
    }
}

/// Generates a board for `difficulty` with the default attempt budget.
#[instrument(skip(rng))]
pub fn generate<R: Rng + ?Sized>(
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<ObstacleSet, GenerationError> {
    ObstacleGenerator::for_difficulty(difficulty).generate(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::{DistinctEndpoints, Invariant};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_counts_follow_difficulty() {
        let mut rng = StdRng::seed_from_u64(1);
        for (difficulty, snakes, ladders) in [
            (Difficulty::Easy, 5, 6),
            (Difficulty::Medium, 7, 8),
            (Difficulty::Hard, 9, 10),
        ] {
            let board = generate(difficulty, &mut rng).expect("placement succeeds");
            assert_eq!(board.snakes().len(), snakes);
            assert_eq!(board.ladders().len(), ladders);
        }
    }

    #[test]
    fn test_generated_ranges() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let board = generate(Difficulty::Hard, &mut rng).expect("placement succeeds");
            assert!(DistinctEndpoints::holds(&board));
            for snake in board.snakes() {
                assert!((20..=99).contains(&snake.head()));
                assert!(snake.tail() >= 1 && snake.tail() + 10 <= snake.head());
            }
            for ladder in board.ladders() {
                assert!((1..=80).contains(&ladder.bottom()));
                assert!(ladder.top() >= ladder.bottom() + 10 && ladder.top() <= 98);
            }
        }
    }

    #[test]
    fn test_exhaustion_is_reported() {
        // 60 snakes need 120 distinct tiles; the board only has 99.
        let mut rng = StdRng::seed_from_u64(3);
        let err = ObstacleGenerator::new(ObstacleCounts::new(60, 0))
            .with_max_attempts(200)
            .generate(&mut rng)
            .expect_err("board cannot hold that many snakes");
        assert_eq!(err.kind, ObstacleKind::Snake);
        assert_eq!(err.attempts, 200);
        assert!(err.index < 60);
    }

    #[test]
    fn test_zero_attempts_fails_first_placement() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = ObstacleGenerator::new(ObstacleCounts::new(0, 1))
            .with_max_attempts(0)
            .generate(&mut rng)
            .expect_err("no attempts allowed");
        assert_eq!(err.kind, ObstacleKind::Ladder);
        assert_eq!(err.index, 0);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = generate(Difficulty::Medium, &mut StdRng::seed_from_u64(9));
        let b = generate(Difficulty::Medium, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
