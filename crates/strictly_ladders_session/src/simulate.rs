//! Headless batch simulation.
//!
//! Runs whole games through the synchronous engine, without a session or
//! delays, and aggregates who won and how long games took.

use crate::config::SessionConfig;
use serde::Serialize;
use strictly_ladders::{Difficulty, Game, GameStatus, MAX_PLAYERS, ValidationError};
use tracing::{debug, info, instrument, warn};

/// Aggregated results of a batch of games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    /// Games played.
    pub games: u32,
    /// Wins per seat, index 0 being player 1.
    pub wins: Vec<u32>,
    /// Games that hit the turn limit.
    pub unfinished: u32,
    /// Turns summed over finished games.
    pub total_turns: u64,
    /// Longest finished game, in turns.
    pub longest_game: u32,
    /// Shortest finished game, in turns.
    pub shortest_game: Option<u32>,
}

impl SimulationReport {
    fn new(players: usize) -> Self {
        Self {
            games: 0,
            wins: vec![0; players],
            unfinished: 0,
            total_turns: 0,
            longest_game: 0,
            shortest_game: None,
        }
    }

    /// Mean turns per finished game.
    pub fn mean_turns(&self) -> Option<f64> {
        let finished = self.games - self.unfinished;
        (finished > 0).then(|| self.total_turns as f64 / finished as f64)
    }

    fn record_win(&mut self, seat: usize, turns: u32) {
        self.wins[seat] += 1;
        self.total_turns += u64::from(turns);
        self.longest_game = self.longest_game.max(turns);
        self.shortest_game = Some(self.shortest_game.map_or(turns, |s| s.min(turns)));
    }
}

/// Simulates `games` games with the configured players, difficulty and seed.
///
/// Game `i` is seeded with `seed + i` when a seed is configured.
#[instrument(skip(config), fields(players = *config.players(), difficulty = %config.difficulty()))]
pub fn simulate(config: &SessionConfig, games: u32) -> Result<SimulationReport, ValidationError> {
    let players = (*config.players()).min(MAX_PLAYERS);
    let mut report = SimulationReport::new(players);

    for index in 0..games {
        let mut game = match config.seed() {
            Some(seed) => Game::seeded(seed.wrapping_add(u64::from(index))),
            None => Game::new(),
        };
        if *config.difficulty() != Difficulty::default() {
            // A fallback still leaves a playable classic board.
            if let Some(e) = game.set_difficulty(*config.difficulty())? {
                warn!(game = index, error = %e, "Using the classic board");
            }
        }
        game.initialize_players(players)?;

        let mut turns = 0u32;
        while *game.state().game_status() == GameStatus::Playing && turns < *config.max_turns() {
            game.play_turn()?;
            turns += 1;
        }

        report.games += 1;
        match game.state().winner_id() {
            Some(winner) => {
                debug!(game = index, winner, turns, "Game finished");
                report.record_win(usize::from(winner) - 1, turns);
            }
            None => report.unfinished += 1,
        }
    }

    info!(games = report.games, unfinished = report.unfinished, "Simulation complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_game_is_counted() {
        let config = SessionConfig::default().with_players(3).with_seed(11);
        let report = simulate(&config, 20).expect("simulation runs");
        assert_eq!(report.games, 20);
        assert_eq!(report.wins.len(), 3);
        assert_eq!(report.wins.iter().sum::<u32>() + report.unfinished, 20);
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let config = SessionConfig::default()
            .with_difficulty(Difficulty::Hard)
            .with_seed(3);
        assert_eq!(simulate(&config, 10), simulate(&config, 10));
    }

    #[test]
    fn test_turn_limit_marks_games_unfinished() {
        let config = SessionConfig::default().with_seed(1).with_max_turns(1);
        let report = simulate(&config, 5).expect("simulation runs");
        // Nobody reaches 100 from the start in one roll.
        assert_eq!(report.unfinished, 5);
        assert_eq!(report.mean_turns(), None);
    }

    #[test]
    fn test_mean_turns() {
        let mut report = SimulationReport::new(2);
        report.games = 2;
        report.record_win(0, 10);
        report.record_win(1, 30);
        assert_eq!(report.mean_turns(), Some(20.0));
        assert_eq!(report.shortest_game, Some(10));
        assert_eq!(report.longest_game, 30);
    }
}
