//! Contract-based validation for snakes and ladders.
//!
//! Contracts define correctness through preconditions and postconditions,
//! Hoare style: {P} action {Q}. Preconditions are always checked; the
//! reducer checks postconditions in debug builds only.

use crate::board::FINISH_TILE;
use crate::error::ValidationError;
use crate::invariants::{GameInvariants, InvariantSet};
use crate::state::GameState;
use crate::types::{GameStatus, MAX_PLAYERS, PlayerId};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ValidationError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), ValidationError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: a new roll may start.
///
/// Rolls are admitted only while playing, with no roll in flight and no
/// winner declared. This gate keeps turns strictly ordered.
pub struct RollAdmitted;

impl RollAdmitted {
    /// Checks roll admission.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), ValidationError> {
        if *state.is_rolling() {
            return Err(ValidationError::AlreadyRolling);
        }
        if let Some(winner) = state.winner_id() {
            return Err(ValidationError::AlreadyWon(winner));
        }
        if *state.game_status() != GameStatus::Playing {
            return Err(ValidationError::NotPlaying(*state.game_status()));
        }
        Ok(())
    }
}

/// Precondition: the player is seated.
pub struct PlayerExists;

impl PlayerExists {
    /// Checks that `player_id` names a seated player.
    #[instrument(skip(state))]
    pub fn check(player_id: PlayerId, state: &GameState) -> Result<(), ValidationError> {
        if state.player(player_id).is_some() {
            Ok(())
        } else {
            Err(ValidationError::UnknownPlayer(player_id))
        }
    }
}

/// Precondition: the tile is 0..=100.
pub struct TileOnBoard;

impl TileOnBoard {
    /// Checks the tile range.
    #[instrument]
    pub fn check(tile: u8) -> Result<(), ValidationError> {
        if tile <= FINISH_TILE {
            Ok(())
        } else {
            Err(ValidationError::TileOutOfRange(tile))
        }
    }
}

/// Precondition: the player count is 0..=4.
pub struct PlayerCountInRange;

impl PlayerCountInRange {
    /// Checks the player count.
    #[instrument]
    pub fn check(count: usize) -> Result<(), ValidationError> {
        if count <= MAX_PLAYERS {
            Ok(())
        } else {
            Err(ValidationError::PlayerCountOutOfRange(count))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Composite Contracts
// ─────────────────────────────────────────────────────────────

pub(crate) fn invariants_hold(after: &GameState) -> Result<(), ValidationError> {
    GameInvariants::check_all(after).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Postcondition failed");
        ValidationError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

/// Contract for starting a roll.
///
/// Preconditions:
/// - Roll is admitted
///
/// Postconditions:
/// - A roll is in flight
/// - Game invariants hold
pub struct RollContract;

impl Contract<GameState, ()> for RollContract {
    fn pre(state: &GameState, _action: &()) -> Result<(), ValidationError> {
        RollAdmitted::check(state)
    }

    fn post(_before: &GameState, after: &GameState) -> Result<(), ValidationError> {
        if !*after.is_rolling() {
            return Err(ValidationError::InvariantViolation(
                "Roll admitted but dice are not rolling".to_string(),
            ));
        }
        invariants_hold(after)
    }
}

/// Contract for placing a player on a resolved tile.
///
/// The action is `(player_id, new_position)`.
///
/// Preconditions:
/// - Player is seated
/// - Target tile is on the board
///
/// Postconditions:
/// - Nobody else moved
/// - Game invariants hold
pub struct MoveContract;

impl Contract<GameState, (PlayerId, u8)> for MoveContract {
    fn pre(state: &GameState, action: &(PlayerId, u8)) -> Result<(), ValidationError> {
        let (player_id, new_position) = *action;
        PlayerExists::check(player_id, state)?;
        TileOnBoard::check(new_position)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), ValidationError> {
        let moved = before
            .players()
            .iter()
            .zip(after.players())
            .filter(|(b, a)| b.position() != a.position())
            .count();
        if moved > 1 {
            return Err(ValidationError::InvariantViolation(format!(
                "{} players moved in a single move",
                moved
            )));
        }
        invariants_hold(after)
    }
}

/// Asserts that all game invariants hold (panics on violation in debug builds).
#[instrument(skip(state))]
pub fn assert_invariants(state: &GameState) {
    debug_assert!(
        GameInvariants::check_all(state).is_ok(),
        "Game invariants violated"
    );
}
