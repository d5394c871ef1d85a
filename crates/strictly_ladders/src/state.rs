//! The game state aggregate and its reducer.
//!
//! [`GameState`] is the single authoritative record of a game. It changes
//! only through [`GameState::apply`], which validates an action, applies it
//! to a copy, checks postconditions in debug builds and then commits. A
//! rejected action therefore never leaves a partial change behind.

use crate::action::GameAction;
use crate::board::FINISH_TILE;
use crate::contracts::{Contract, MoveContract, PlayerCountInRange, RollContract};
#[cfg(debug_assertions)]
use crate::contracts::invariants_hold;
use crate::dice::DieFace;
use crate::error::{GenerationError, ValidationError};
use crate::generator::generate;
use crate::obstacles::ObstacleSet;
use crate::types::{Difficulty, GameStatus, Player, PlayerId, Theme};
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// How an accepted action was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The action took effect as requested.
    Changed,
    /// Board generation ran out of attempts; the classic board was
    /// installed instead and everything else took effect.
    FellBackToClassic(GenerationError),
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameState {
    /// Seated players in turn order.
    players: Vec<Player>,
    /// Seat whose turn it is.
    current_player_index: usize,
    /// Last settled dice value; 0 before the first roll.
    dice_value: u8,
    /// A roll is in flight.
    is_rolling: bool,
    /// Current phase.
    game_status: GameStatus,
    /// Id of the winning player.
    #[getter(skip)]
    winner: Option<PlayerId>,
    /// Active snakes and ladders.
    obstacles: ObstacleSet,
    /// Visual theme.
    theme: Theme,
    /// Board difficulty.
    difficulty: Difficulty,
    /// Whether sound hooks should fire.
    sound_enabled: bool,
}

impl GameState {
    /// Creates the initial state: setup phase on the classic board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            current_player_index: 0,
            dice_value: 0,
            is_rolling: false,
            game_status: GameStatus::Setup,
            winner: None,
            obstacles: ObstacleSet::classic(),
            theme: Theme::Classic,
            difficulty: Difficulty::Medium,
            sound_enabled: true,
        }
    }

    /// Returns the winner's id, if the game is won.
    pub fn winner_id(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Returns the winning player.
    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.player(id))
    }

    /// Looks up a seated player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| *p.id() == id)
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Returns true if a roll would be admitted right now.
    pub fn can_roll(&self) -> bool {
        RollContract::pre(self, &()).is_ok()
    }

    /// Applies an action.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the action is not valid in the current
    /// state. The state is left unchanged in that case.
    #[instrument(skip(self, action, rng), fields(action = %action, status = %self.game_status))]
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        action: GameAction,
        rng: &mut R,
    ) -> Result<Applied, ValidationError> {
        let mut next = self.clone();

        let applied = next.reduce(action, rng).inspect_err(|e| {
            debug!(error = %e, "Action rejected");
        })?;

        // Postcondition: verify contract in debug builds
        #[cfg(debug_assertions)]
        Self::verify(self, &next, action)?;

        *self = next;
        Ok(applied)
    }

    #[cfg(debug_assertions)]
    fn verify(before: &Self, after: &Self, action: GameAction) -> Result<(), ValidationError> {
        match action {
            GameAction::RollDice => RollContract::post(before, after),
            GameAction::MovePlayer { .. } => MoveContract::post(before, after),
            _ => invariants_hold(after),
        }
    }

    fn reduce<R: Rng + ?Sized>(
        &mut self,
        action: GameAction,
        rng: &mut R,
    ) -> Result<Applied, ValidationError> {
        match action {
            GameAction::InitializePlayers { count } => {
                PlayerCountInRange::check(count)?;
                self.players = (1..=count)
                    .filter_map(|id| PlayerId::try_from(id).ok().and_then(Player::new))
                    .collect();
                self.current_player_index = 0;
                self.dice_value = 0;
                self.is_rolling = false;
                self.winner = None;
                self.game_status = if self.players.is_empty() {
                    GameStatus::Setup
                } else {
                    GameStatus::Playing
                };
                info!(count, status = %self.game_status, "Players initialized");
                Ok(Applied::Changed)
            }

            GameAction::RollDice => {
                RollContract::pre(self, &())?;
                self.is_rolling = true;
                Ok(Applied::Changed)
            }

            GameAction::SetDiceValue(value) => {
                let face = DieFace::new(value)?;
                self.dice_value = face.value();
                self.is_rolling = false;
                Ok(Applied::Changed)
            }

            GameAction::MovePlayer {
                player_id,
                new_position,
            } => {
                MoveContract::pre(self, &(player_id, new_position))?;
                if let Some(winner) = self.winner {
                    return Err(ValidationError::AlreadyWon(winner));
                }
                if let Some(player) = self.players.iter_mut().find(|p| *p.id() == player_id) {
                    player.set_position(new_position);
                }
                if new_position == FINISH_TILE {
                    info!(player_id, "Player reached the finish");
                    self.winner = Some(player_id);
                    self.game_status = GameStatus::Finished;
                }
                Ok(Applied::Changed)
            }

            GameAction::NextTurn => {
                if self.players.is_empty() {
                    return Err(ValidationError::NoPlayers);
                }
                self.current_player_index = (self.current_player_index + 1) % self.players.len();
                self.sync_active();
                Ok(Applied::Changed)
            }

            GameAction::RestartGame => {
                if self.players.is_empty() {
                    return Err(ValidationError::NoPlayers);
                }
                for player in &mut self.players {
                    player.set_position(0);
                }
                self.current_player_index = 0;
                self.sync_active();
                self.dice_value = 1;
                self.is_rolling = false;
                self.game_status = GameStatus::Playing;
                self.winner = None;
                let applied = match self.difficulty {
                    Difficulty::Easy => {
                        self.obstacles = ObstacleSet::classic();
                        Applied::Changed
                    }
                    difficulty => self.regenerate(difficulty, rng),
                };
                info!(difficulty = %self.difficulty, "Game restarted");
                Ok(applied)
            }

            GameAction::SetTheme(theme) => {
                self.theme = theme;
                Ok(Applied::Changed)
            }

            GameAction::SetDifficulty(difficulty) => {
                self.difficulty = difficulty;
                Ok(self.regenerate(difficulty, rng))
            }

            GameAction::ToggleSound => {
                self.sound_enabled = !self.sound_enabled;
                Ok(Applied::Changed)
            }
        }
    }

    /// Draws a fresh board, falling back to the classic one on exhaustion.
    fn regenerate<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R) -> Applied {
        match generate(difficulty, rng) {
            Ok(obstacles) => {
                self.obstacles = obstacles;
                Applied::Changed
            }
            Err(e) => {
                warn!(error = %e, "Falling back to the classic board");
                self.obstacles = ObstacleSet::classic();
                Applied::FellBackToClassic(e)
            }
        }
    }

    fn sync_active(&mut self) {
        let current = self.current_player_index;
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.set_active(seat == current);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl GameState {
    /// Seats one player per entry at the given positions and starts playing.
    pub(crate) fn seat_players_for_test(&mut self, positions: &[u8]) {
        self.players = positions
            .iter()
            .enumerate()
            .filter_map(|(seat, position)| {
                let mut player = Player::new(seat as u8 + 1)?;
                player.set_position(*position);
                Some(player)
            })
            .collect();
        self.current_player_index = 0;
        self.sync_active();
        self.game_status = GameStatus::Playing;
    }

    pub(crate) fn force_position(&mut self, seat: usize, position: u8) {
        self.players[seat].set_position(position);
    }

    pub(crate) fn force_current_index(&mut self, index: usize) {
        self.current_player_index = index;
    }

    pub(crate) fn force_winner(&mut self, id: PlayerId) {
        self.winner = Some(id);
        self.game_status = GameStatus::Finished;
    }

    pub(crate) fn force_obstacles(&mut self, obstacles: ObstacleSet) {
        self.obstacles = obstacles;
    }

    pub(crate) fn force_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }
}
