use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use relaykalah::board::Player;
use relaykalah::config::GameConfig;
use relaykalah::engine::Engine;
use relaykalah::playout::{play_game, run_playouts, PlayoutConfig};
use relaykalah::protocol::{encode_position, parse_position};

const OPENING: &str = "4,4,4,4,4,4,4/4,4,4,4,4,4,4/0,0/1";

/// Player 1's pit 2 relays 58 times here before coming to rest.
const LONG_RELAY: &str = "6,7,5,2,7,4,3/4,6,2,4,3,7,1/0,0/1";

fn bench_opening_move(c: &mut Criterion) {
    let engine = Engine::default();
    c.bench_function("attempt_move_opening_pit_3", |b| {
        b.iter(|| {
            let mut e = engine.clone();
            e.attempt_move(black_box(Player::One), black_box(3))
        })
    });
}

fn bench_long_relay(c: &mut Criterion) {
    let position = parse_position(LONG_RELAY).unwrap();
    let engine = Engine::from_position(GameConfig::default(), position).unwrap();
    c.bench_function("attempt_move_long_relay", |b| {
        b.iter(|| {
            let mut e = engine.clone();
            e.attempt_move(black_box(Player::One), black_box(2))
        })
    });

    let moves = engine.legal_moves();
    c.bench_function("attempt_move_all_pits", |b| {
        b.iter(|| {
            for &pit in &moves {
                let mut e = engine.clone();
                let _ = black_box(e.attempt_move(Player::One, pit));
            }
        })
    });
}

fn bench_notation(c: &mut Criterion) {
    let position = parse_position(OPENING).unwrap();
    c.bench_function("parse_position_opening", |b| {
        b.iter(|| parse_position(black_box(OPENING)))
    });
    c.bench_function("encode_position_opening", |b| {
        b.iter(|| encode_position(black_box(&position)))
    });
}

fn bench_single_playout(c: &mut Criterion) {
    let config = PlayoutConfig {
        num_games: 1,
        threads: 1,
        seed: 42,
        quiet: true,
        ..Default::default()
    };
    c.bench_function("play_game_7x4", |b| {
        b.iter(|| {
            let mut rng = SmallRng::seed_from_u64(42);
            play_game(black_box(&config), 0, &mut rng)
        })
    });
}

fn bench_parallel_playouts(c: &mut Criterion) {
    let config = PlayoutConfig {
        num_games: 64,
        threads: 4,
        seed: 7,
        quiet: true,
        ..Default::default()
    };
    let mut group = c.benchmark_group("playouts");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("run_playouts_64_games_4_threads", |b| {
        b.iter(|| run_playouts(black_box(&config)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_opening_move,
    bench_long_relay,
    bench_notation,
    bench_single_playout,
    bench_parallel_playouts,
);
criterion_main!(benches);
