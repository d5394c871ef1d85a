//! Events a session broadcasts to its presentation layer.

use serde::Serialize;
use std::fmt;
use strictly_ladders::{DieFace, GameState, MoveResolution, PlayerId, Redirect, SoundCue};

/// Messages sent from the session to whoever renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum GameEvent {
    /// Game state updated.
    StateChanged(GameState),
    /// Dice settled on a face.
    DiceRolled {
        /// Player who rolled.
        player_id: PlayerId,
        /// Face shown.
        face: DieFace,
    },
    /// A roll was resolved for a player.
    PlayerMoved {
        /// Player who moved.
        player_id: PlayerId,
        /// How the roll resolved.
        resolution: MoveResolution,
    },
    /// The turn passed to another player.
    TurnPassed {
        /// Player now on turn.
        player_id: PlayerId,
    },
    /// A sound should play.
    Sound(SoundCue),
    /// Game ended.
    GameOver {
        /// Winning player.
        winner: PlayerId,
    },
    /// An intent was refused; the state is unchanged.
    Rejected(String),
    /// Board generation gave up and the classic board was installed.
    ObstaclesFellBack(String),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::StateChanged(state) => {
                let positions = state
                    .players()
                    .iter()
                    .map(|p| format!("{}@{}", p.name(), p.position()))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{}] {}", state.game_status(), positions)
            }
            GameEvent::DiceRolled { player_id, face } => {
                write!(f, "Player {} rolled {}", player_id, face)
            }
            GameEvent::PlayerMoved {
                player_id,
                resolution,
            } => match resolution {
                MoveResolution::Overshoot {
                    position,
                    candidate,
                } => write!(
                    f,
                    "Player {} stays on {} ({} is past the finish)",
                    player_id, position, candidate
                ),
                MoveResolution::Landed {
                    from,
                    to,
                    redirect: Some(Redirect::Snake(snake)),
                    ..
                } => write!(
                    f,
                    "Player {} moved {} -> {} and slid down a snake to {}",
                    player_id,
                    from,
                    snake.head(),
                    to
                ),
                MoveResolution::Landed {
                    from,
                    to,
                    redirect: Some(Redirect::Ladder(ladder)),
                    ..
                } => write!(
                    f,
                    "Player {} moved {} -> {} and climbed a ladder to {}",
                    player_id,
                    from,
                    ladder.bottom(),
                    to
                ),
                MoveResolution::Landed {
                    from,
                    to,
                    redirect: None,
                    ..
                } => write!(f, "Player {} moved {} -> {}", player_id, from, to),
            },
            GameEvent::TurnPassed { player_id } => write!(f, "Player {}'s turn", player_id),
            GameEvent::Sound(cue) => write!(f, "(sound: {})", cue),
            GameEvent::GameOver { winner } => write!(f, "Player {} wins!", winner),
            GameEvent::Rejected(reason) => write!(f, "Rejected: {}", reason),
            GameEvent::ObstaclesFellBack(reason) => {
                write!(f, "Using the classic board: {}", reason)
            }
        }
    }
}
