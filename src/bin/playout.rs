//! Random playout CLI.
//!
//! Plays games with uniformly random legal moves and writes one JSON record
//! per game. Progress and the summary go to stderr through the logger
//! (`RUST_LOG` overrides the default `info` level).
//!
//! Usage:
//!   cargo run --release --bin playout -- --games 1000 --threads 8 --seed 1

use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info};

use relaykalah::config::{GameConfig, DEFAULT_PITS_PER_SIDE, DEFAULT_SEEDS_PER_PIT};
use relaykalah::playout::{self, PlayoutConfig};

#[derive(Parser, Debug)]
#[command(name = "playout", about = "Soak the engine with random-move games")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Pits per side
    #[arg(long, default_value_t = DEFAULT_PITS_PER_SIDE)]
    pits: usize,

    /// Seeds per pit at the start
    #[arg(long, default_value_t = DEFAULT_SEEDS_PER_PIT)]
    seeds: u32,

    /// Abandon a game after this many moves
    #[arg(long, default_value_t = 2000)]
    max_moves: usize,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<String>,

    /// Suppress progress and summary output
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = PlayoutConfig {
        num_games: args.games,
        game: GameConfig::new(args.pits, args.seeds),
        max_moves: args.max_moves,
        threads: args.threads,
        seed: args.seed,
        quiet: args.quiet,
    };

    if !args.quiet {
        info!(
            "Playout: {} games, {}x{} board, {} threads",
            config.num_games, config.game.pits_per_side, config.game.seeds_per_pit, config.threads
        );
    }

    let start = Instant::now();
    let games = match playout::run_playouts(&config) {
        Ok(games) => games,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    if !args.quiet {
        info!(
            "Completed {} games in {:.2}s ({:.0} games/s)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
        );
        playout::print_summary(&games);
    }

    let written = match &args.output {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            playout::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            playout::write_jsonl(&games, &mut writer)
        }
    };

    match written {
        Ok(()) => {
            if let (false, Some(path)) = (args.quiet, &args.output) {
                info!("Wrote {} games to {}", games.len(), path);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}
