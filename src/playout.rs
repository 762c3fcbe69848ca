//! Random playouts.
//!
//! Plays whole games with uniformly random legal moves, either one at a time
//! or concurrently on a rayon pool, and records every move for later
//! inspection. Used to soak the engine's invariants over many positions;
//! there is no move selection strategy here.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;

use crate::board::{Player, Score};
use crate::config::{ConfigError, GameConfig};
use crate::engine::Engine;
use crate::error::MoveError;
use crate::rules::Winner;

/// Errors that abort a playout run.
#[derive(Debug, Error)]
pub enum PlayoutError {
    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("game {game_id}: engine rejected a generated move: {source}")]
    Move {
        game_id: usize,
        #[source]
        source: MoveError,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("playout worker thread panicked")]
    WorkerPanicked,
}

/// Configuration for a playout run.
#[derive(Debug, Clone)]
pub struct PlayoutConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Board geometry for every game.
    pub game: GameConfig,
    /// Moves after which an unfinished game is abandoned.
    pub max_moves: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        PlayoutConfig {
            num_games: 10,
            game: GameConfig::default(),
            max_moves: 2000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// One move of a recorded game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub player: Player,
    pub pit: usize,
    pub captured: u32,
    pub passes: u32,
    pub halted: bool,
}

/// A complete playout record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    pub pits_per_side: usize,
    pub seeds_per_pit: u32,
    /// All moves in order.
    pub moves: Vec<MoveRecord>,
    pub final_score: Score,
    /// `None` if the game was abandoned at the move limit.
    pub winner: Option<Winner>,
    /// Moves whose relay was cut off by the pass budget.
    pub halted_relays: usize,
    pub truncated: bool,
}

fn rng_for(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays one game to completion (or to the move limit) with random moves.
pub fn play_game(config: &PlayoutConfig, game_id: usize, rng: &mut SmallRng) -> Result<GameRecord, PlayoutError> {
    let mut engine = Engine::new(config.game)?;
    let mut moves = Vec::new();
    let mut halted_relays = 0;

    while !engine.is_game_over() && moves.len() < config.max_moves {
        let player = engine.current_player();
        let legal = engine.legal_moves();
        let pit = match legal.choose(rng) {
            Some(&pit) => pit,
            None => break,
        };
        let report = engine
            .attempt_move(player, pit)
            .map_err(|source| PlayoutError::Move { game_id, source })?;
        if report.relay_halted {
            halted_relays += 1;
        }
        moves.push(MoveRecord {
            player,
            pit,
            captured: report.captured_this_turn,
            passes: report.relay_passes,
            halted: report.relay_halted,
        });
    }

    let winner = engine.outcome().map(|o| o.winner);
    debug!(
        "game {}: {} moves, score {}-{}",
        game_id,
        moves.len(),
        engine.score().player1,
        engine.score().player2
    );

    Ok(GameRecord {
        game_id,
        pits_per_side: config.game.pits_per_side,
        seeds_per_pit: config.game.seeds_per_pit,
        moves,
        final_score: engine.score(),
        winner,
        halted_relays,
        truncated: winner.is_none(),
    })
}

fn describe(game: &GameRecord) -> String {
    match game.winner {
        Some(Winner::Player(p)) => format!("player {} wins", p),
        Some(Winner::Tie) => "tie".to_string(),
        None => "abandoned".to_string(),
    }
}

/// Runs a playout batch, producing every game record.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_playouts(config: &PlayoutConfig) -> Result<Vec<GameRecord>, PlayoutError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_playouts_with_callback(config, |game| {
        games.push(game);
    })?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs a playout batch, calling `on_game` with each completed game record.
///
/// In parallel mode games arrive in completion order, not ID order.
pub fn run_playouts_with_callback<F>(config: &PlayoutConfig, on_game: F) -> Result<(), PlayoutError>
where
    F: FnMut(GameRecord) + Send,
{
    config.game.validate()?;
    if config.threads > 1 {
        run_parallel(config, on_game)
    } else {
        run_sequential(config, on_game)
    }
}

fn run_sequential<F>(config: &PlayoutConfig, mut on_game: F) -> Result<(), PlayoutError>
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = rng_for(config.seed, i);
        let game_start = Instant::now();
        let game = play_game(config, i, &mut rng)?;
        if !config.quiet {
            info!(
                "Game {}/{}: {} after {} moves ({:.1}ms)",
                i + 1,
                config.num_games,
                describe(&game),
                game.moves.len(),
                game_start.elapsed().as_secs_f64() * 1000.0,
            );
        }
        on_game(game);
    }
    Ok(())
}

/// Plays games on a rayon pool and delivers them over a channel so the
/// callback runs on the calling thread.
fn run_parallel<F>(config: &PlayoutConfig, mut on_game: F) -> Result<(), PlayoutError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<Result<GameRecord, PlayoutError>>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = rng_for(config_clone.seed, i);
                    let game_start = Instant::now();
                    let result = play_game(&config_clone, i, &mut rng);
                    if let (false, Ok(game)) = (config_clone.quiet, &result) {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        info!(
                            "Game {}/{}: {} after {} moves ({:.1}ms)",
                            n,
                            config_clone.num_games,
                            describe(game),
                            game.moves.len(),
                            game_start.elapsed().as_secs_f64() * 1000.0,
                        );
                    }
                    let _ = tx.send(result);
                });
        });
    });

    // Keep draining after an error so the workers never block on a full channel.
    let mut first_error = None;
    for result in rx {
        match result {
            Ok(game) => on_game(game),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    handle.join().map_err(|_| PlayoutError::WorkerPanicked)?;
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
    }
    out.flush()
}

/// Writes a single game record as one line of JSON.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    writeln!(out)
}

/// Aggregate figures over a batch of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub wins: [usize; 2],
    pub ties: usize,
    pub truncated: usize,
    pub total_moves: usize,
    pub halted_relays: usize,
    pub max_passes: u32,
}

impl Summary {
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut summary = Summary {
            games: games.len(),
            ..Default::default()
        };
        for game in games {
            match game.winner {
                Some(Winner::Player(p)) => summary.wins[p.index()] += 1,
                Some(Winner::Tie) => summary.ties += 1,
                None => summary.truncated += 1,
            }
            summary.total_moves += game.moves.len();
            summary.halted_relays += game.halted_relays;
            if let Some(m) = game.moves.iter().map(|m| m.passes).max() {
                summary.max_passes = summary.max_passes.max(m);
            }
        }
        summary
    }

    pub fn avg_moves(&self) -> f64 {
        self.total_moves as f64 / self.games.max(1) as f64
    }
}

/// Logs a summary of playout results.
pub fn print_summary(games: &[GameRecord]) {
    let s = Summary::from_games(games);
    info!("=== Playout Summary ===");
    info!("Games: {}", s.games);
    info!("Avg moves/game: {:.1}", s.avg_moves());
    for (i, &wins) in s.wins.iter().enumerate() {
        let pct = 100.0 * wins as f64 / s.games.max(1) as f64;
        info!("  player {}: {} ({:.1}%)", i + 1, wins, pct);
    }
    info!("Ties: {}", s.ties);
    info!("Abandoned at move limit: {}", s.truncated);
    info!("Halted relays: {}", s.halted_relays);
    info!("Longest relay: {} passes", s.max_passes);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(num_games: usize, threads: usize, seed: u64) -> PlayoutConfig {
        PlayoutConfig {
            num_games,
            threads,
            seed,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn play_single_game_completes() {
        let config = small_config(1, 1, 42);
        let mut rng = SmallRng::seed_from_u64(42);
        let game = play_game(&config, 0, &mut rng).unwrap();

        assert!(!game.moves.is_empty());
        assert!(game.moves.len() <= config.max_moves);
        assert_eq!(game.moves[0].player, Player::One);
        if !game.truncated {
            assert_eq!(game.final_score.total(), Ok(56));
        }
    }

    #[test]
    fn same_seed_same_game() {
        let config = small_config(1, 1, 7);
        let a = play_game(&config, 3, &mut rng_for(7, 3)).unwrap();
        let b = play_game(&config, 3, &mut rng_for(7, 3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn passes_stay_within_budget() {
        let config = PlayoutConfig {
            game: GameConfig::new(3, 2),
            ..small_config(20, 1, 11)
        };
        let games = run_playouts(&config).unwrap();
        for game in &games {
            for m in &game.moves {
                assert!(m.passes >= 1);
                assert!(m.passes <= 12, "{} passes on a 12-seed board", m.passes);
            }
        }
    }

    #[test]
    fn sequential_run_produces_correct_count() {
        let games = run_playouts(&small_config(3, 1, 99)).unwrap();
        assert_eq!(games.len(), 3);
    }

    #[test]
    fn parallel_run_produces_correct_count() {
        let games = run_playouts(&small_config(4, 2, 77)).unwrap();
        assert_eq!(games.len(), 4);
        let ids: Vec<usize> = games.iter().map(|g| g.game_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn parallel_matches_sequential_with_seed() {
        let seq = run_playouts(&small_config(4, 1, 5)).unwrap();
        let par = run_playouts(&small_config(4, 3, 5)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let config = PlayoutConfig {
            game: GameConfig::new(0, 4),
            ..small_config(1, 1, 1)
        };
        assert!(matches!(run_playouts(&config), Err(PlayoutError::Config(_))));
    }

    #[test]
    fn jsonl_output_is_valid() {
        let games = run_playouts(&small_config(2, 1, 55)).unwrap();
        let mut buf = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert_eq!(output.lines().count(), 2);
        for line in output.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["game_id"].is_u64());
            assert!(value["moves"].is_array());
            assert!(value["final_score"]["player1"].is_u64());
            assert_eq!(value["pits_per_side"], 7);
        }
    }

    #[test]
    fn summary_counts_outcomes() {
        let games = run_playouts(&small_config(5, 1, 21)).unwrap();
        let s = Summary::from_games(&games);
        assert_eq!(s.games, 5);
        assert_eq!(s.wins[0] + s.wins[1] + s.ties + s.truncated, 5);
        assert!(s.avg_moves() > 0.0);
    }
}
