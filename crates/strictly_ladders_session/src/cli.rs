//! Command-line interface for the `ladders` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_ladders::{Difficulty, Theme};

/// Strictly Ladders - snakes and ladders with checked state transitions
#[derive(Parser, Debug)]
#[command(name = "ladders")]
#[command(about = "Play or simulate snakes and ladders", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML session config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game through the scheduled session, printing each event
    Play {
        /// Game settings
        #[command(flatten)]
        settings: SettingsArgs,

        /// Skip presentation delays
        #[arg(long)]
        instant: bool,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Run many headless games and report the win distribution
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "1000")]
        games: u32,

        /// Game settings
        #[command(flatten)]
        settings: SettingsArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Flags that override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Number of players (1-4)
    #[arg(short, long)]
    pub players: Option<usize>,

    /// Board difficulty (easy, medium, hard)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Visual theme (classic, cartoon)
    #[arg(long)]
    pub theme: Option<Theme>,

    /// RNG seed for reproducible games
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Give up after this many turns
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Disable sound cues
    #[arg(long)]
    pub mute: bool,
}
