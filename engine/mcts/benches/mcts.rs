//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full MCTS search with varying iteration counts
//! - Search from different game phases (opening, midgame, near-terminal)
//! - Random playouts on their own
//! - Tree operations (selection, backpropagation, best action)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::{Outcome, Player};
use games_connect4::{Action, Connect4};
use mcts::{random_playout, MctsConfig, MctsSearch, MctsTree};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

// =============================================================================
// Full MCTS Search Benchmarks
// =============================================================================

fn bench_mcts_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_iterations");

    for iterations in [50, 100, 200, 400, 800, 1600] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(
            BenchmarkId::new("opening", iterations),
            &iterations,
            |b, &iterations| {
                let state = Connect4::new();
                let config = MctsConfig::with_iterations(iterations);

                b.iter(|| {
                    let mut rng = ChaCha20Rng::seed_from_u64(42);
                    let mut search = MctsSearch::new(&state, &config).unwrap();
                    black_box(search.run(&mut rng).unwrap())
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Game Phase Benchmarks
// =============================================================================

fn bench_mcts_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_game_phases");
    let config = MctsConfig::with_iterations(400);

    let phases: [(&str, &[usize]); 3] = [
        ("opening", &[]),
        ("midgame", &[3, 3, 2, 4, 4, 2, 5, 1]),
        ("near_terminal", &[0, 1, 0, 1, 0, 1]),
    ];

    for (name, moves) in phases {
        let state = Connect4::from_moves(moves).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&state, &config).unwrap();
                black_box(search.run(&mut rng).unwrap())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Playout Benchmarks
// =============================================================================

fn bench_random_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_playout");

    group.bench_function("connect4_empty_board", |b| {
        let state = Connect4::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| black_box(random_playout(&state, &mut rng)));
    });

    group.bench_function("connect4_8x9_connect5", |b| {
        let state = Connect4::with_dimensions(8, 9, 5).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| black_box(random_playout(&state, &mut rng)));
    });

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_operations");

    // Benchmark UCB1 child selection
    group.bench_function("select_child_7_children", |b| {
        let mut tree = MctsTree::new(Player::Yellow);

        for col in 0..7 {
            let child_id = tree.add_child(tree.root(), Action::Drop(col));
            // Simulate some visits
            let child = tree.get_mut(child_id);
            child.visits = (col as u32 + 1) * 10;
            child.reward = (col as f64 - 3.0) * 0.1 * child.visits as f64;
        }

        // Update root visit count
        tree.get_mut(tree.root()).visits = 280;

        b.iter(|| black_box(tree.select_child(tree.root())));
    });

    // Benchmark backpropagation
    group.bench_function("backpropagate_depth_10", |b| {
        b.iter_batched(
            || {
                let mut tree = MctsTree::new(Player::Yellow);
                let mut parent = tree.root();

                for i in 0..10 {
                    parent = tree.add_child(parent, Action::Drop(i % 7));
                }

                (tree, parent)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(leaf, Outcome::Win(Player::Red));
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    // Benchmark final move extraction
    group.bench_function("best_action", |b| {
        let mut tree = MctsTree::new(Player::Yellow);

        for col in 0..7 {
            let child_id = tree.add_child(tree.root(), Action::Drop(col));
            tree.get_mut(child_id).visits = (col as u32 + 1) * 50;
        }

        b.iter(|| black_box(tree.best_action()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mcts_search_iterations,
    bench_mcts_game_phases,
    bench_random_playout,
    bench_tree_operations,
);

criterion_main!(benches);
