//! A single six-sided die.

use crate::error::ValidationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A face of a six-sided die (1..=6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    /// Lowest face.
    pub const MIN: u8 = 1;
    /// Highest face.
    pub const MAX: u8 = 6;

    /// Validates a raw dice value.
    #[instrument]
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::DiceValueOutOfRange(value))
        }
    }

    /// Draws a face uniformly at random.
    #[instrument(skip(rng))]
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(Self::MIN..=Self::MAX))
    }

    /// Returns the pip count.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DieFace {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> Self {
        face.0
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
