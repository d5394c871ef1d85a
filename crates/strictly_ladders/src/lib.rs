//! Strictly Ladders - pure snakes and ladders game logic.
//!
//! This crate contains everything with testable behavior: the board
//! layout, snake and ladder placement, dice, movement resolution and the
//! turn state machine. Rendering and timing live outside of it.
//!
//! # Architecture
//!
//! - **Board**: tile numbering and boustrophedon grid coordinates
//! - **Obstacles**: snakes, ladders and the classic hand-authored board
//! - **Generator**: collision-free procedural boards per difficulty
//! - **Movement**: exact-finish rule and single-hop redirects
//! - **State**: the [`GameState`] aggregate and its action reducer
//! - **Game**: an engine that owns the RNG and exposes player intents
//!
//! # Example
//!
//! ```
//! use strictly_ladders::{Game, GameStatus};
//!
//! # fn example() -> Result<(), strictly_ladders::ValidationError> {
//! let mut game = Game::seeded(7);
//! game.initialize_players(2)?;
//! assert_eq!(*game.state().game_status(), GameStatus::Playing);
//!
//! let report = game.play_turn()?;
//! assert_eq!(report.player_id, 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod dice;
mod error;
mod game;
mod generator;
mod invariants;
mod movement;
mod obstacles;
mod state;
mod types;

// Crate-level exports - Board layout
pub use board::{BOARD_SIDE, BoardTile, FINISH_TILE, FIRST_TILE, GridCoord, layout, tile_coordinate};

// Crate-level exports - Obstacles
pub use generator::{DEFAULT_MAX_ATTEMPTS, ObstacleGenerator, generate};
pub use obstacles::{Ladder, ObstacleSet, Snake, SpecialTile};

// Crate-level exports - Dice and movement
pub use dice::DieFace;
pub use movement::{MoveResolution, Redirect, resolve_move};

// Crate-level exports - State machine
pub use action::GameAction;
pub use game::{Game, TurnReport};
pub use state::{Applied, GameState};
pub use types::{
    Difficulty, GameStatus, MAX_PLAYERS, ObstacleCounts, Player, PlayerColor, PlayerId, SoundCue,
    Theme,
};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    Contract, MoveContract, PlayerCountInRange, PlayerExists, RollAdmitted, RollContract,
    TileOnBoard, assert_invariants,
};
pub use invariants::{
    DistinctEndpoints, GameInvariants, GeneratedBoardInvariants, Invariant, InvariantSet,
    InvariantViolation, ObstaclesWellFormed, PositionsOnBoard, TurnPointerInBounds,
    WinnerConsistent,
};

// Crate-level exports - Errors
pub use error::{GenerationError, ObstacleKind, ValidationError};
