//! Tests for loading session configuration from disk.

use std::io::Write;
use strictly_ladders::{Difficulty, Theme};
use strictly_ladders_session::{SessionConfig, TimingConfig};

#[test]
fn test_loads_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
players = 3
difficulty = "easy"
theme = "cartoon"
seed = 42

[timing]
roll_delay_ms = 0
move_delay_ms = 0
turn_delay_ms = 0
"#
    )
    .expect("write config");

    let config = SessionConfig::from_file(file.path()).expect("config loads");
    assert_eq!(*config.players(), 3);
    assert_eq!(*config.difficulty(), Difficulty::Easy);
    assert_eq!(*config.theme(), Theme::Cartoon);
    assert_eq!(*config.seed(), Some(42));
    assert!(*config.sound());
    assert_eq!(*config.timing(), TimingConfig::instant());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = SessionConfig::from_file(dir.path().join("absent.toml")).expect_err("no file");
    assert!(err.message.starts_with("Failed to read config file"));
    assert!(err.file.ends_with("config.rs"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "players = \"many\"").expect("write config");
    let err = SessionConfig::from_file(file.path()).expect_err("bad type");
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_zero_players_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "players = 0").expect("write config");
    assert!(SessionConfig::from_file(file.path()).is_err());
}
