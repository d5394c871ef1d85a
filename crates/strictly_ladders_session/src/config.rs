//! Session configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_ladders::{Difficulty, MAX_PLAYERS, Theme};
use tracing::{debug, info, instrument};

/// Presentation delays between the steps of a turn.
///
/// These only give a renderer time to animate; zero delays produce the
/// same outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Dice spin before the face is drawn.
    #[serde(default = "default_roll_delay_ms")]
    roll_delay_ms: u64,
    /// Pause between the settled face and the move.
    #[serde(default = "default_move_delay_ms")]
    move_delay_ms: u64,
    /// Pause after a move before the turn passes.
    #[serde(default = "default_turn_delay_ms")]
    turn_delay_ms: u64,
}

fn default_roll_delay_ms() -> u64 {
    500
}

fn default_move_delay_ms() -> u64 {
    300
}

fn default_turn_delay_ms() -> u64 {
    1_000
}

impl TimingConfig {
    /// Creates timing from explicit millisecond delays.
    #[instrument]
    pub fn new(roll_delay_ms: u64, move_delay_ms: u64, turn_delay_ms: u64) -> Self {
        Self {
            roll_delay_ms,
            move_delay_ms,
            turn_delay_ms,
        }
    }

    /// No delays at all, for headless runs and tests.
    pub fn instant() -> Self {
        Self::new(0, 0, 0)
    }

    /// Roll delay as a [`Duration`].
    pub fn roll_delay(&self) -> Duration {
        Duration::from_millis(self.roll_delay_ms)
    }

    /// Move delay as a [`Duration`].
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    /// Turn delay as a [`Duration`].
    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new(
            default_roll_delay_ms(),
            default_move_delay_ms(),
            default_turn_delay_ms(),
        )
    }
}

/// Configuration for one session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of players to seat (1..=4).
    #[serde(default = "default_players")]
    players: usize,

    /// Board difficulty.
    #[serde(default)]
    difficulty: Difficulty,

    /// Visual theme.
    #[serde(default)]
    theme: Theme,

    /// Whether sound cues are emitted.
    #[serde(default = "default_sound")]
    sound: bool,

    /// RNG seed; absent means seeded from the OS.
    #[serde(default)]
    seed: Option<u64>,

    /// Turn limit for unattended play.
    #[serde(default = "default_max_turns")]
    max_turns: u32,

    /// Presentation delays.
    #[serde(default)]
    timing: TimingConfig,
}

fn default_players() -> usize {
    2
}

fn default_sound() -> bool {
    true
}

fn default_max_turns() -> u32 {
    10_000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            difficulty: Difficulty::default(),
            theme: Theme::default(),
            sound: default_sound(),
            seed: None,
            max_turns: default_max_turns(),
            timing: TimingConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(players = config.players, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()
    }

    /// Checks ranges that serde cannot express.
    #[instrument(skip(self))]
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.players == 0 || self.players > MAX_PLAYERS {
            return Err(ConfigError::new(format!(
                "players must be 1..={}, got {}",
                MAX_PLAYERS, self.players
            )));
        }
        if self.max_turns == 0 {
            return Err(ConfigError::new("max_turns must be positive".to_string()));
        }
        Ok(self)
    }

    /// Overrides the player count.
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    /// Overrides the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Overrides the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the sound flag.
    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    /// Overrides the turn limit.
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Overrides the timing.
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
