//! Game engine: the state plus the randomness that drives it.
//!
//! [`Game`] exposes the player intents. Each intent validates its input,
//! resolves whatever needs resolving (dice, movement) and dispatches the
//! matching [`GameAction`]. Timing is not its concern; a scheduler decides
//! when to call [`Game::settle_roll`], [`Game::move_player`] and
//! [`Game::next_turn`].

use crate::action::GameAction;
use crate::dice::DieFace;
use crate::error::{GenerationError, ValidationError};
use crate::movement::{MoveResolution, resolve_move};
use crate::state::{Applied, GameState};
use crate::types::{Difficulty, PlayerId, Theme};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// Outcome of one complete headless turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    /// Player who took the turn.
    pub player_id: PlayerId,
    /// Face rolled.
    pub roll: DieFace,
    /// How the roll resolved.
    pub resolution: MoveResolution,
}

/// A game of snakes and ladders with its random source.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    state: GameState,
    rng: R,
}

impl Game<StdRng> {
    /// Creates a game seeded from the operating system.
    #[instrument]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a reproducible game.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    /// Creates a game driven by the given RNG.
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: GameState::new(),
            rng,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns a copy of the current state for rendering.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Applies a raw action.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, action: GameAction) -> Result<Applied, ValidationError> {
        self.state.apply(action, &mut self.rng)
    }

    /// Seats `count` players (0 returns to setup).
    #[instrument(skip(self))]
    pub fn initialize_players(&mut self, count: usize) -> Result<(), ValidationError> {
        self.dispatch(GameAction::InitializePlayers { count })?;
        Ok(())
    }

    /// Abandons the current game and returns to setup.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> Result<(), ValidationError> {
        self.initialize_players(0)
    }

    /// Starts a roll. The face is drawn later by [`Game::settle_roll`].
    #[instrument(skip(self))]
    pub fn begin_roll(&mut self) -> Result<(), ValidationError> {
        self.dispatch(GameAction::RollDice)?;
        Ok(())
    }

    /// Draws a face and settles the dice on it.
    #[instrument(skip(self))]
    pub fn settle_roll(&mut self) -> Result<DieFace, ValidationError> {
        let face = DieFace::roll(&mut self.rng);
        self.dispatch(GameAction::SetDiceValue(face.value()))?;
        debug!(face = face.value(), "Dice settled");
        Ok(face)
    }

    /// Starts and settles a roll in one step.
    #[instrument(skip(self))]
    pub fn roll_dice(&mut self) -> Result<DieFace, ValidationError> {
        self.begin_roll()?;
        self.settle_roll()
    }

    /// Moves a player by `steps` (the last rolled value).
    ///
    /// An overshooting roll mutates nothing. Whatever the resolution, the
    /// caller advances the turn unless [`MoveResolution::is_win`] holds.
    /// Once the game has a winner every move is refused.
    #[instrument(skip(self))]
    pub fn move_player(
        &mut self,
        player_id: PlayerId,
        steps: u8,
    ) -> Result<MoveResolution, ValidationError> {
        if let Some(winner) = self.state.winner_id() {
            return Err(ValidationError::AlreadyWon(winner));
        }
        let roll = DieFace::new(steps)?;
        let position = self
            .state
            .player(player_id)
            .map(|p| *p.position())
            .ok_or(ValidationError::UnknownPlayer(player_id))?;

        let resolution = resolve_move(position, roll, self.state.obstacles());
        if let MoveResolution::Landed { to, .. } = resolution {
            self.dispatch(GameAction::MovePlayer {
                player_id,
                new_position: to,
            })?;
        }
        Ok(resolution)
    }

    /// Passes the turn to the next player.
    #[instrument(skip(self))]
    pub fn next_turn(&mut self) -> Result<(), ValidationError> {
        self.dispatch(GameAction::NextTurn)?;
        Ok(())
    }

    /// Restarts with the same players.
    ///
    /// Returns the generation error if the classic board had to stand in.
    #[instrument(skip(self))]
    pub fn restart_game(&mut self) -> Result<Option<GenerationError>, ValidationError> {
        Ok(fell_back(self.dispatch(GameAction::RestartGame)?))
    }

    /// Changes the theme.
    #[instrument(skip(self))]
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), ValidationError> {
        self.dispatch(GameAction::SetTheme(theme))?;
        Ok(())
    }

    /// Changes the difficulty and redraws the board.
    ///
    /// Returns the generation error if the classic board had to stand in.
    #[instrument(skip(self))]
    pub fn set_difficulty(
        &mut self,
        difficulty: Difficulty,
    ) -> Result<Option<GenerationError>, ValidationError> {
        Ok(fell_back(self.dispatch(GameAction::SetDifficulty(difficulty))?))
    }

    /// Flips the sound flag.
    #[instrument(skip(self))]
    pub fn toggle_sound(&mut self) -> Result<(), ValidationError> {
        self.dispatch(GameAction::ToggleSound)?;
        Ok(())
    }

    /// Plays one full turn for the current player without delays.
    ///
    /// Rolls, moves, and passes the turn unless the move won the game.
    #[instrument(skip(self))]
    pub fn play_turn(&mut self) -> Result<TurnReport, ValidationError> {
        let player_id = self
            .state
            .current_player()
            .map(|p| *p.id())
            .ok_or(ValidationError::NoPlayers)?;

        let roll = self.roll_dice()?;
        let resolution = self.move_player(player_id, roll.value())?;

        if resolution.is_win() {
            info!(player_id, "Game won");
        } else {
            self.next_turn()?;
        }

        Ok(TurnReport {
            player_id,
            roll,
            resolution,
        })
    }
}

fn fell_back(applied: Applied) -> Option<GenerationError> {
    match applied {
        Applied::Changed => None,
        Applied::FellBackToClassic(e) => Some(e),
    }
}
