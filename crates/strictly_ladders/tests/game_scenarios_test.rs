//! End-to-end scenarios against the public engine API.

use strictly_ladders::{
    Applied, Difficulty, Game, GameAction, GameStatus, MoveResolution, ObstacleSet, Redirect,
    SoundCue, ValidationError, layout,
};

fn place(game: &mut Game, player_id: u8, tile: u8) {
    game.dispatch(GameAction::MovePlayer {
        player_id,
        new_position: tile,
    })
    .expect("player is seated");
}

#[test]
fn test_two_player_opening_turn() {
    let mut game = Game::seeded(3);
    game.initialize_players(2).expect("two players");

    let ids: Vec<_> = game.state().players().iter().map(|p| (*p.id(), *p.position())).collect();
    assert_eq!(ids, vec![(1, 0), (2, 0)]);
    assert_eq!(*game.state().game_status(), GameStatus::Playing);

    // Roll, then settle on a fixed face instead of a random one.
    game.begin_roll().expect("roll admitted");
    assert!(*game.state().is_rolling());
    game.dispatch(GameAction::SetDiceValue(5)).expect("five is a face");

    let resolution = game.move_player(1, *game.state().dice_value()).expect("player 1 moves");
    assert_eq!(resolution.final_position(), 5);
    assert_eq!(resolution.sound_cue(), Some(SoundCue::Move));

    game.next_turn().expect("players seated");
    assert_eq!(*game.state().current_player_index(), 1);
    assert_eq!(game.state().current_player().map(|p| *p.id()), Some(2));
}

#[test]
fn test_snake_at_99_from_95() {
    let mut game = Game::seeded(3);
    game.initialize_players(2).expect("two players");
    place(&mut game, 1, 95);

    let resolution = game.move_player(1, 4).expect("player 1 moves");
    match resolution {
        MoveResolution::Landed { candidate, to, redirect: Some(Redirect::Snake(snake)), .. } => {
            assert_eq!(candidate, 99);
            assert_eq!(to, 54);
            assert_eq!(snake.head(), 99);
        }
        other => panic!("expected the 99 snake, got {:?}", other),
    }
    assert_eq!(*game.state().game_status(), GameStatus::Playing);
    game.next_turn().expect("turn advances");
    assert_eq!(*game.state().current_player_index(), 1);
}

#[test]
fn test_overshoot_from_97_still_passes_turn() {
    let mut game = Game::seeded(3);
    game.initialize_players(2).expect("two players");
    place(&mut game, 1, 97);
    let before = game.snapshot();

    let resolution = game.move_player(1, 5).expect("move is evaluated");
    assert!(resolution.is_overshoot());
    assert_eq!(game.snapshot(), before);

    game.next_turn().expect("turn advances");
    assert_eq!(*game.state().current_player_index(), 1);
    assert_eq!(game.state().player(1).map(|p| *p.position()), Some(97));
}

#[test]
fn test_exact_landing_wins_and_blocks_rolls() {
    let mut game = Game::seeded(3);
    game.initialize_players(3).expect("three players");
    place(&mut game, 1, 94);

    let resolution = game.move_player(1, 6).expect("player 1 moves");
    assert!(resolution.is_win());
    assert_eq!(*game.state().game_status(), GameStatus::Finished);
    assert_eq!(game.state().winner().map(|p| p.name().as_str()), Some("Player 1"));
    assert_eq!(game.begin_roll(), Err(ValidationError::AlreadyWon(1)));
    assert_eq!(game.move_player(2, 3), Err(ValidationError::AlreadyWon(1)));
}

#[test]
fn test_restart_after_win() {
    let mut game = Game::seeded(3);
    game.initialize_players(2).expect("two players");
    game.set_difficulty(Difficulty::Easy).expect("settings always apply");
    place(&mut game, 2, 100);

    assert_eq!(game.restart_game(), Ok(None));
    let state = game.state();
    assert_eq!(*state.game_status(), GameStatus::Playing);
    assert_eq!(state.winner_id(), None);
    assert_eq!(*state.dice_value(), 1);
    assert!(state.players().iter().all(|p| *p.position() == 0));
    assert_eq!(state.obstacles(), &ObstacleSet::classic());
}

#[test]
fn test_restart_on_medium_draws_fresh_board() {
    let mut game = Game::seeded(8);
    game.initialize_players(1).expect("one player");
    assert_eq!(game.restart_game(), Ok(None));
    assert_eq!(game.state().obstacles().snakes().len(), 7);
    assert_eq!(game.state().obstacles().ladders().len(), 8);
}

#[test]
fn test_new_game_keeps_settings() {
    let mut game = Game::seeded(3);
    game.initialize_players(4).expect("four players");
    game.toggle_sound().expect("settings always apply");
    game.set_theme(strictly_ladders::Theme::Cartoon).expect("settings always apply");
    game.new_game().expect("back to setup");

    let state = game.state();
    assert_eq!(*state.game_status(), GameStatus::Setup);
    assert!(state.players().is_empty());
    assert!(!*state.sound_enabled());
    assert_eq!(*state.theme(), strictly_ladders::Theme::Cartoon);
}

#[test]
fn test_invalid_inputs_are_no_ops() {
    let mut game = Game::seeded(3);
    game.initialize_players(2).expect("two players");
    let before = game.snapshot();

    assert_eq!(
        game.dispatch(GameAction::InitializePlayers { count: 9 }),
        Err(ValidationError::PlayerCountOutOfRange(9))
    );
    assert_eq!(
        game.dispatch(GameAction::SetDiceValue(0)),
        Err(ValidationError::DiceValueOutOfRange(0))
    );
    assert_eq!(
        game.dispatch(GameAction::MovePlayer {
            player_id: 4,
            new_position: 10,
        }),
        Err(ValidationError::UnknownPlayer(4))
    );
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_full_game_terminates_with_winner() {
    let mut game = Game::seeded(2024);
    game.initialize_players(4).expect("four players");
    let mut turns = 0;
    while *game.state().game_status() == GameStatus::Playing {
        game.play_turn().expect("turn admitted");
        turns += 1;
        assert!(turns < 10_000, "game did not finish");
    }
    let winner = game.state().winner().expect("finished game has a winner");
    assert_eq!(*winner.position(), 100);
}

#[test]
fn test_layout_tracks_players() {
    let mut game = Game::seeded(3);
    game.initialize_players(2).expect("two players");
    place(&mut game, 1, 9);
    let tiles = layout(game.state());
    assert_eq!(tiles[8].players, vec![1]);
    assert!(tiles[8].special.has_ladder());
}

#[test]
fn test_dispatch_reports_changed() {
    let mut game = Game::seeded(3);
    assert_eq!(game.dispatch(GameAction::ToggleSound), Ok(Applied::Changed));
}
