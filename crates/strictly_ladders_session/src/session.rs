//! Session orchestration.
//!
//! A [`Session`] owns one [`Game`] on a tokio task. Intents arrive over a
//! channel; the delayed steps of a turn (dice settle, move, turn advance)
//! are scheduled as timers that report back into the same task. Every
//! timer carries the generation it was scheduled in. Initializing,
//! restarting or abandoning a game bumps the generation, so timers left
//! over from the previous game are dropped instead of mutating the new one.

use crate::config::{SessionConfig, TimingConfig};
use crate::error::SessionError;
use crate::event::GameEvent;
use crate::intent::Intent;
use rand::rngs::StdRng;
use std::time::Duration;
use strictly_ladders::{
    Difficulty, Game, GameState, GameStatus, GenerationError, MoveResolution, PlayerId, SoundCue,
    ValidationError,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// A delayed step of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    /// Draw the face of a roll in flight.
    SettleRoll,
    /// Move the roller by the settled face.
    ApplyMove,
    /// Hand the turn to the next player.
    PassTurn,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    generation: u64,
    effect: Effect,
}

/// A roll that has settled but not been moved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingMove {
    player_id: PlayerId,
    steps: u8,
}

/// Handle to a running session.
#[derive(Debug)]
pub struct SessionHandle {
    intents: mpsc::UnboundedSender<Intent>,
    events: mpsc::UnboundedReceiver<GameEvent>,
    task: JoinHandle<GameState>,
}

impl SessionHandle {
    /// Sends an intent to the session.
    pub fn send(&self, intent: Intent) -> Result<(), SessionError> {
        self.intents.send(intent).map_err(|_| SessionError::Closed)
    }

    /// Receiver of session events.
    pub fn events(&mut self) -> &mut mpsc::UnboundedReceiver<GameEvent> {
        &mut self.events
    }

    /// Waits for the next event. Returns `None` once the session stopped.
    pub async fn next_event(&mut self) -> Option<GameEvent> {
        self.events.recv().await
    }

    /// Stops the session and returns its final state.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<GameState, SessionError> {
        // The task may already be gone; joining reports the final state either way.
        let _ = self.intents.send(Intent::Shutdown);
        self.task
            .await
            .map_err(|e| SessionError::Join(e.to_string()))
    }
}

/// Drives one game with presentation delays.
pub struct Session {
    game: Game<StdRng>,
    timing: TimingConfig,
    generation: u64,
    /// Player whose turn runs from roll request until the turn passes.
    turn: Option<PlayerId>,
    pending_move: Option<PendingMove>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    effect_tx: mpsc::UnboundedSender<Scheduled>,
}

impl Session {
    /// Spawns a session task on the current tokio runtime.
    #[instrument(
        skip(config),
        fields(players = *config.players(), difficulty = %config.difficulty())
    )]
    pub fn spawn(config: &SessionConfig) -> SessionHandle {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (effect_tx, effect_rx) = mpsc::unbounded_channel();

        let game = match config.seed() {
            Some(seed) => Game::seeded(*seed),
            None => Game::new(),
        };
        let mut session = Session {
            game,
            timing: *config.timing(),
            generation: 0,
            turn: None,
            pending_move: None,
            event_tx,
            effect_tx,
        };
        if let Err(e) = session.apply_settings(config) {
            warn!(error = %e, "Configured settings were refused");
            session.emit(GameEvent::Rejected(e.to_string()));
        }

        let task = tokio::spawn(session.run(intent_rx, effect_rx));
        info!("Session spawned");

        SessionHandle {
            intents: intent_tx,
            events: event_rx,
            task,
        }
    }

    /// Applies theme, difficulty and sound from the configuration.
    ///
    /// A non-default difficulty redraws the board the same way choosing it
    /// on the setup screen would.
    fn apply_settings(&mut self, config: &SessionConfig) -> Result<(), ValidationError> {
        self.game.set_theme(*config.theme())?;
        if *config.difficulty() != Difficulty::default() {
            let fallback = self.game.set_difficulty(*config.difficulty())?;
            self.report_fallback(fallback);
        }
        if *config.sound() != *self.game.state().sound_enabled() {
            self.game.toggle_sound()?;
        }
        Ok(())
    }

    /// Runs the session loop until shutdown or until every handle is dropped.
    async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<Intent>,
        mut effects: mpsc::UnboundedReceiver<Scheduled>,
    ) -> GameState {
        info!("Starting session loop");
        self.emit(GameEvent::StateChanged(self.game.snapshot()));

        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(Intent::Shutdown) | None => break,
                    Some(intent) => self.handle_intent(intent),
                },
                Some(scheduled) = effects.recv() => self.handle_effect(scheduled),
            }
        }

        info!(generation = self.generation, "Session stopped");
        self.game.snapshot()
    }

    #[instrument(skip(self), fields(generation = self.generation))]
    fn handle_intent(&mut self, intent: Intent) {
        debug!(%intent, "Handling intent");
        let outcome = match intent {
            Intent::InitializePlayers(count) => self.game.initialize_players(count).map(|()| {
                self.start_generation();
                if count > 0 {
                    self.cue(SoundCue::BackgroundMusic);
                }
            }),
            Intent::RollDice => {
                if let Some(roller) = self.turn {
                    debug!(roller, "Roll requested mid-turn");
                    self.emit(GameEvent::Rejected(format!(
                        "{}: player {}'s turn is still in progress",
                        intent, roller
                    )));
                    return;
                }
                let roller = self.game.state().current_player().map(|p| *p.id());
                self.game.begin_roll().map(|()| {
                    self.turn = roller;
                    self.cue(SoundCue::DiceRoll);
                    self.schedule(Effect::SettleRoll, self.timing.roll_delay());
                })
            }
            Intent::MovePlayer { player_id, steps } => {
                self.move_requested(player_id, steps);
                return;
            }
            Intent::RestartGame => self.game.restart_game().map(|fallback| {
                self.start_generation();
                self.report_fallback(fallback);
            }),
            Intent::NewGame => self.game.new_game().map(|()| self.start_generation()),
            Intent::SetTheme(theme) => self.game.set_theme(theme),
            Intent::SetDifficulty(difficulty) => self
                .game
                .set_difficulty(difficulty)
                .map(|fallback| self.report_fallback(fallback)),
            Intent::ToggleSound => self.game.toggle_sound(),
            Intent::Shutdown => return,
        };

        match outcome {
            Ok(()) => self.emit(GameEvent::StateChanged(self.game.snapshot())),
            Err(e) => self.reject(intent, e),
        }
    }

    #[instrument(skip(self))]
    fn handle_effect(&mut self, scheduled: Scheduled) {
        if scheduled.generation != self.generation {
            debug!(
                effect = ?scheduled.effect,
                scheduled_in = scheduled.generation,
                current = self.generation,
                "Dropping stale effect"
            );
            return;
        }

        match scheduled.effect {
            Effect::SettleRoll => self.settle_roll(),
            Effect::ApplyMove => {
                if let Some(pending) = self.pending_move.take() {
                    self.apply_move(pending.player_id, pending.steps);
                }
            }
            Effect::PassTurn => self.pass_turn(),
        }
    }

    fn settle_roll(&mut self) {
        let Some(player_id) = self.turn else {
            warn!("Roll settled outside a turn");
            return;
        };
        match self.game.settle_roll() {
            Ok(face) => {
                self.pending_move = Some(PendingMove {
                    player_id,
                    steps: face.value(),
                });
                self.emit(GameEvent::DiceRolled { player_id, face });
                self.emit(GameEvent::StateChanged(self.game.snapshot()));
                self.schedule(Effect::ApplyMove, self.timing.move_delay());
            }
            Err(e) => {
                warn!(error = %e, "Dice failed to settle");
                self.turn = None;
                self.emit(GameEvent::Rejected(e.to_string()));
            }
        }
    }

    /// Honors a move request only for the roll the session is holding.
    fn move_requested(&mut self, player_id: PlayerId, steps: u8) {
        let requested = PendingMove { player_id, steps };
        if self.pending_move != Some(requested) {
            debug!(player_id, steps, pending = ?self.pending_move, "Move without a matching roll");
            self.emit(GameEvent::Rejected(format!(
                "{}: no settled roll of {} for player {}",
                Intent::MovePlayer { player_id, steps },
                steps,
                player_id
            )));
            return;
        }
        self.pending_move = None;
        self.apply_move(player_id, steps);
    }

    fn apply_move(&mut self, player_id: PlayerId, steps: u8) {
        match self.game.move_player(player_id, steps) {
            Ok(resolution) => {
                self.emit(GameEvent::PlayerMoved {
                    player_id,
                    resolution,
                });
                if let Some(cue) = resolution.sound_cue() {
                    self.cue(cue);
                }
                self.emit(GameEvent::StateChanged(self.game.snapshot()));
                self.after_move(player_id, resolution);
            }
            Err(e) => {
                self.turn = None;
                self.reject(Intent::MovePlayer { player_id, steps }, e);
            }
        }
    }

    fn after_move(&mut self, player_id: PlayerId, resolution: MoveResolution) {
        if resolution.is_win() && *self.game.state().game_status() == GameStatus::Finished {
            info!(player_id, "Game over");
            self.turn = None;
            self.emit(GameEvent::GameOver { winner: player_id });
        } else {
            self.schedule(Effect::PassTurn, self.timing.turn_delay());
        }
    }

    fn pass_turn(&mut self) {
        self.turn = None;
        match self.game.next_turn() {
            Ok(()) => {
                if let Some(player_id) = self.game.state().current_player().map(|p| *p.id()) {
                    self.emit(GameEvent::TurnPassed { player_id });
                }
                self.emit(GameEvent::StateChanged(self.game.snapshot()));
            }
            Err(e) => {
                warn!(error = %e, "Turn failed to pass");
                self.emit(GameEvent::Rejected(e.to_string()));
            }
        }
    }

    /// Invalidates every timer scheduled so far.
    fn start_generation(&mut self) {
        self.generation += 1;
        self.turn = None;
        self.pending_move = None;
        debug!(generation = self.generation, "New session generation");
    }

    fn schedule(&self, effect: Effect, delay: Duration) {
        let scheduled = Scheduled {
            generation: self.generation,
            effect,
        };
        let tx = self.effect_tx.clone();
        if delay.is_zero() {
            // The receiver lives in the running loop, which owns `self`.
            let _ = tx.send(scheduled);
            return;
        }
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(scheduled).is_err() {
                debug!(effect = ?scheduled.effect, "Session closed before effect fired");
            }
        });
    }

    fn cue(&self, cue: SoundCue) {
        if *self.game.state().sound_enabled() {
            self.emit(GameEvent::Sound(cue));
        }
    }

    fn report_fallback(&self, fallback: Option<GenerationError>) {
        if let Some(e) = fallback {
            warn!(error = %e, "Board generation fell back to the classic board");
            self.emit(GameEvent::ObstaclesFellBack(e.to_string()));
        }
    }

    fn reject(&self, intent: Intent, error: ValidationError) {
        debug!(%intent, %error, "Intent rejected");
        self.emit(GameEvent::Rejected(format!("{}: {}", intent, error)));
    }

    fn emit(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("No listener for session events");
        }
    }
}
