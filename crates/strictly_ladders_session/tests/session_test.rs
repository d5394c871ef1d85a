//! Tests for the scheduled session.

use std::time::Duration;
use strictly_ladders::{Difficulty, GameStatus, SoundCue, Theme};
use strictly_ladders_session::{
    GameEvent, Intent, Session, SessionConfig, SessionError, SessionHandle, TimingConfig,
    play_to_completion,
};

fn instant_config(seed: u64) -> SessionConfig {
    SessionConfig::default()
        .with_seed(seed)
        .with_timing(TimingConfig::instant())
}

/// Collects events until `stop` matches one, or the session goes quiet.
async fn collect_until<F>(handle: &mut SessionHandle, stop: F) -> Vec<GameEvent>
where
    F: Fn(&GameEvent) -> bool,
{
    let mut events = Vec::new();
    while let Ok(Some(event)) =
        tokio::time::timeout(Duration::from_millis(500), handle.next_event()).await
    {
        let done = stop(&event);
        events.push(event);
        if done {
            break;
        }
    }
    events
}

#[tokio::test]
async fn test_unattended_game_finishes_with_winner() {
    let config = instant_config(21).with_players(3);
    let mut moves = 0;
    let state = play_to_completion(&config, |event| {
        if matches!(event, GameEvent::PlayerMoved { .. }) {
            moves += 1;
        }
    })
    .await
    .expect("game finishes");

    assert_eq!(*state.game_status(), GameStatus::Finished);
    let winner = state.winner().expect("winner recorded");
    assert_eq!(*winner.position(), 100);
    assert!(moves > 0);
}

#[tokio::test]
async fn test_turn_limit_stops_unattended_play() {
    let config = instant_config(4).with_max_turns(2);
    let result = play_to_completion(&config, |_| {}).await;
    assert_eq!(result, Err(SessionError::TurnLimit(2)));
}

#[tokio::test]
async fn test_roll_runs_through_the_whole_turn() {
    let mut handle = Session::spawn(&instant_config(8));
    handle.send(Intent::InitializePlayers(2)).expect("session running");
    handle.send(Intent::RollDice).expect("session running");

    let events = collect_until(&mut handle, |e| matches!(e, GameEvent::TurnPassed { .. })).await;

    let rolled = events
        .iter()
        .position(|e| matches!(e, GameEvent::DiceRolled { player_id: 1, .. }))
        .expect("dice settled");
    let moved = events
        .iter()
        .position(|e| matches!(e, GameEvent::PlayerMoved { player_id: 1, .. }))
        .expect("player moved");
    assert!(rolled < moved);
    assert!(matches!(
        events.last(),
        Some(GameEvent::TurnPassed { player_id: 2 })
    ));
    assert!(events.contains(&GameEvent::Sound(SoundCue::DiceRoll)));

    let state = handle.shutdown().await.expect("clean shutdown");
    assert_eq!(*state.current_player_index(), 1);
    assert!(!*state.is_rolling());
}

#[tokio::test]
async fn test_roll_before_turn_passes_is_rejected() {
    let config = SessionConfig::default()
        .with_seed(8)
        .with_timing(TimingConfig::new(0, 0, 200));
    let mut handle = Session::spawn(&config);
    handle.send(Intent::InitializePlayers(2)).expect("session running");
    handle.send(Intent::RollDice).expect("session running");

    let mut events = collect_until(&mut handle, |e| {
        matches!(e, GameEvent::PlayerMoved { player_id: 1, .. })
    })
    .await;
    handle.send(Intent::RollDice).expect("session running");
    events.extend(collect_until(&mut handle, |_| false).await);

    let rejected = events
        .iter()
        .position(|e| matches!(e, GameEvent::Rejected(_)))
        .expect("second roll refused");
    let passed: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, GameEvent::TurnPassed { .. }))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(passed.len(), 1);
    assert!(rejected < passed[0]);
    assert_eq!(events[passed[0]], GameEvent::TurnPassed { player_id: 2 });
    let rolls = events
        .iter()
        .filter(|e| matches!(e, GameEvent::DiceRolled { .. }))
        .count();
    assert_eq!(rolls, 1);

    let state = handle.shutdown().await.expect("clean shutdown");
    assert_eq!(*state.current_player_index(), 1);
    assert_eq!(*state.players()[1].position(), 0);
}

#[tokio::test]
async fn test_restart_drops_pending_timers() {
    let config = SessionConfig::default()
        .with_seed(2)
        .with_timing(TimingConfig::new(100, 0, 0));
    let mut handle = Session::spawn(&config);
    handle.send(Intent::InitializePlayers(2)).expect("session running");
    handle.send(Intent::RollDice).expect("session running");
    handle.send(Intent::RestartGame).expect("session running");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let state = handle.shutdown().await.expect("clean shutdown");

    // The settle timer belonged to the game before the restart.
    assert!(!*state.is_rolling());
    assert_eq!(*state.dice_value(), 1);
    assert!(state.players().iter().all(|p| *p.position() == 0));
    assert_eq!(*state.current_player_index(), 0);
}

#[tokio::test]
async fn test_stale_timer_emits_nothing() {
    let config = SessionConfig::default()
        .with_seed(2)
        .with_timing(TimingConfig::new(100, 0, 0));
    let mut handle = Session::spawn(&config);
    handle.send(Intent::InitializePlayers(2)).expect("session running");
    handle.send(Intent::RollDice).expect("session running");
    handle.send(Intent::NewGame).expect("session running");

    tokio::time::sleep(Duration::from_millis(300)).await;
    handle.send(Intent::Shutdown).expect("session running");

    let mut events = Vec::new();
    while let Some(event) = handle.next_event().await {
        events.push(event);
    }
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, GameEvent::DiceRolled { .. } | GameEvent::PlayerMoved { .. }))
    );
}

#[tokio::test]
async fn test_roll_in_setup_is_rejected() {
    let mut handle = Session::spawn(&instant_config(1));
    handle.send(Intent::RollDice).expect("session running");

    let events = collect_until(&mut handle, |e| matches!(e, GameEvent::Rejected(_))).await;
    match events.last() {
        Some(GameEvent::Rejected(reason)) => assert!(reason.starts_with("roll_dice")),
        other => panic!("expected a rejection, got {:?}", other),
    }

    let state = handle.shutdown().await.expect("clean shutdown");
    assert_eq!(*state.game_status(), GameStatus::Setup);
}

#[tokio::test]
async fn test_move_without_roll_is_rejected() {
    let mut handle = Session::spawn(&instant_config(1));
    handle.send(Intent::InitializePlayers(1)).expect("session running");
    handle
        .send(Intent::MovePlayer {
            player_id: 1,
            steps: 6,
        })
        .expect("session running");

    let events = collect_until(&mut handle, |e| matches!(e, GameEvent::Rejected(_))).await;
    assert!(matches!(events.last(), Some(GameEvent::Rejected(_))));

    let state = handle.shutdown().await.expect("clean shutdown");
    assert_eq!(*state.players()[0].position(), 0);
}

#[tokio::test]
async fn test_muted_session_emits_no_sound() {
    let config = instant_config(5).with_sound(false);
    let mut sounds = 0;
    play_to_completion(&config, |event| {
        if matches!(event, GameEvent::Sound(_)) {
            sounds += 1;
        }
    })
    .await
    .expect("game finishes");
    assert_eq!(sounds, 0);
}

#[tokio::test]
async fn test_settings_intents_update_state() {
    let mut handle = Session::spawn(&instant_config(9));
    handle.send(Intent::SetTheme(Theme::Cartoon)).expect("session running");
    handle
        .send(Intent::SetDifficulty(Difficulty::Hard))
        .expect("session running");
    handle.send(Intent::ToggleSound).expect("session running");

    let state = handle.shutdown().await.expect("clean shutdown");
    assert_eq!(*state.theme(), Theme::Cartoon);
    assert_eq!(*state.difficulty(), Difficulty::Hard);
    assert!(!*state.sound_enabled());
    assert_eq!(state.obstacles().snakes().len(), 9);
    assert_eq!(state.obstacles().ladders().len(), 10);
}

#[tokio::test]
async fn test_configured_difficulty_applies_at_spawn() {
    let config = instant_config(13).with_difficulty(Difficulty::Easy);
    let handle = Session::spawn(&config);
    let state = handle.shutdown().await.expect("clean shutdown");
    assert_eq!(*state.difficulty(), Difficulty::Easy);
    assert_eq!(state.obstacles().snakes().len(), 5);
    assert_eq!(state.obstacles().ladders().len(), 6);
}
