//! Benchmarks for the hoop sort solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hoop_sort::solver::{Progress, SearchLimits, SolverConfig};
use hoop_sort::{parse_puzzle, solve_with, GameState};

const THREE_COLORS: &str = include_str!("../puzzles/three_colors.txt");
const FOUR_COLORS: &str = include_str!("../puzzles/four_colors.txt");

fn load(text: &str) -> GameState {
    parse_puzzle(text).expect("sample puzzle should load")
}

/// Progress reporting off, so only the search itself is measured.
fn quiet_config() -> SolverConfig {
    SolverConfig {
        progress_interval: usize::MAX,
        limits: SearchLimits {
            max_examined: Some(1_000_000),
            time_limit: None,
        },
    }
}

/// Benchmark solving the small three-color puzzle.
fn bench_solve_three_colors(c: &mut Criterion) {
    let game = load(THREE_COLORS);
    let config = quiet_config();

    c.bench_function("solve_three_colors", |b| {
        b.iter(|| solve_with(black_box(&game), &config, |_: &Progress| {}))
    });
}

/// Benchmark solving the four-color puzzle.
fn bench_solve_four_colors(c: &mut Criterion) {
    let game = load(FOUR_COLORS);
    let config = quiet_config();

    let mut group = c.benchmark_group("four_colors");
    group.sample_size(10);
    group.bench_function("solve", |b| {
        b.iter(|| solve_with(black_box(&game), &config, |_: &Progress| {}))
    });
    group.finish();
}

/// Benchmark generating every move from the initial state.
fn bench_list_available_moves(c: &mut Criterion) {
    let game = load(FOUR_COLORS);

    c.bench_function("list_available_moves", |b| {
        b.iter(|| black_box(&game).list_available_moves())
    });
}

/// Benchmark computing the deduplication key of a state.
fn bench_canonical_key(c: &mut Criterion) {
    let game = load(FOUR_COLORS);

    c.bench_function("canonical_key", |b| {
        b.iter(|| black_box(&game).canonical_key())
    });
}

/// Benchmark scoring a state.
fn bench_score(c: &mut Criterion) {
    let game = load(FOUR_COLORS);

    c.bench_function("score", |b| b.iter(|| black_box(&game).score()));
}

criterion_group!(
    benches,
    bench_solve_three_colors,
    bench_solve_four_colors,
    bench_list_available_moves,
    bench_canonical_key,
    bench_score
);
criterion_main!(benches);
