//! Unattended play through a scheduled session.

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::event::GameEvent;
use crate::intent::Intent;
use crate::session::Session;
use strictly_ladders::GameState;
use tracing::{info, instrument, warn};

/// Plays one game through a [`Session`], rolling whenever a turn starts.
///
/// Every event is handed to `observer` as it arrives. Returns the final
/// state once someone wins.
#[instrument(skip(config, observer), fields(players = *config.players()))]
pub async fn play_to_completion<F>(
    config: &SessionConfig,
    mut observer: F,
) -> Result<GameState, SessionError>
where
    F: FnMut(&GameEvent),
{
    let mut handle = Session::spawn(config);
    handle.send(Intent::InitializePlayers(*config.players()))?;
    handle.send(Intent::RollDice)?;

    let mut turns = 1u32;
    let mut outcome = Err(SessionError::Closed);
    while let Some(event) = handle.next_event().await {
        observer(&event);
        match event {
            GameEvent::TurnPassed { .. } => {
                if turns >= *config.max_turns() {
                    warn!(turns, "Turn limit reached");
                    outcome = Err(SessionError::TurnLimit(turns));
                    break;
                }
                turns += 1;
                handle.send(Intent::RollDice)?;
            }
            GameEvent::GameOver { winner } => {
                info!(winner, turns, "Unattended game finished");
                outcome = Ok(winner);
                break;
            }
            GameEvent::Rejected(reason) => {
                outcome = Err(SessionError::Stalled(reason));
                break;
            }
            _ => {}
        }
    }

    let state = handle.shutdown().await?;
    let winner = outcome?;
    if state.winner_id() != Some(winner) {
        return Err(SessionError::WinnerMismatch(winner));
    }
    Ok(state)
}
