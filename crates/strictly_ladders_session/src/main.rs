//! Strictly Ladders CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, SettingsArgs};
use std::path::Path;
use strictly_ladders_session::{
    GameEvent, SessionConfig, TimingConfig, play_to_completion, simulate,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            settings,
            instant,
            json,
        } => {
            let config = load_config(cli.config.as_deref(), &settings)?;
            let config = if instant {
                config.with_timing(TimingConfig::instant())
            } else {
                config
            };
            run_play(config, json)
        }
        Command::Simulate {
            games,
            settings,
            json,
        } => {
            let config = load_config(cli.config.as_deref(), &settings)?;
            run_simulate(config, games, json)
        }
    }
}

/// Loads the config file (or defaults) and applies flag overrides.
#[instrument(skip(settings))]
fn load_config(path: Option<&Path>, settings: &SettingsArgs) -> Result<SessionConfig> {
    let mut config = match path {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };
    if let Some(players) = settings.players {
        config = config.with_players(players);
    }
    if let Some(difficulty) = settings.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(theme) = settings.theme {
        config = config.with_theme(theme);
    }
    if let Some(seed) = settings.seed {
        config = config.with_seed(seed);
    }
    if let Some(max_turns) = settings.max_turns {
        config = config.with_max_turns(max_turns);
    }
    if settings.mute {
        config = config.with_sound(false);
    }
    Ok(config.validate()?)
}

/// Plays one scheduled game, printing events as they arrive.
fn run_play(config: SessionConfig, json: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let state = runtime.block_on(play_to_completion(&config, |event| {
        if json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!(error = %e, "Event not serializable"),
            }
        } else if !matches!(event, GameEvent::StateChanged(_)) {
            println!("{}", event);
        }
    }))?;

    if let Some(winner) = state.winner() {
        info!(winner = %winner.name(), "Game finished");
    }
    Ok(())
}

/// Runs a headless batch and prints the report.
fn run_simulate(config: SessionConfig, games: u32, json: bool) -> Result<()> {
    info!(games, "Starting simulation");
    let report = simulate(&config, games)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} games, {} players, {} board",
        report.games,
        config.players(),
        config.difficulty()
    );
    for (seat, wins) in report.wins.iter().enumerate() {
        let share = if report.games == 0 {
            0.0
        } else {
            f64::from(*wins) * 100.0 / f64::from(report.games)
        };
        println!("  Player {}: {} wins ({:.1}%)", seat + 1, wins, share);
    }
    if report.unfinished > 0 {
        println!("  Unfinished: {}", report.unfinished);
    }
    if let Some(mean) = report.mean_turns() {
        println!("Mean turns per game: {:.1}", mean);
    }
    Ok(())
}
