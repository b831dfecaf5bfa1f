//! Position engine benchmarks.
//!
//! Run with: `cargo bench -p uttt-board`
//!
//! These cover the operations a search calls on every rollout step.
//! Full playouts are benchmarked in `uttt-mcts`.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uttt_board::Position;

/// Position after a fixed number of seeded random moves.
fn midgame(seed: u64, plies: usize) -> Position {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pos = Position::initial();
    for _ in 0..plies {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            break;
        }
        pos.play(moves[rng.gen_range(0..moves.len())]).unwrap();
    }
    pos
}

fn bench_legal_moves(c: &mut Criterion) {
    let opening = Position::initial();
    let middle = midgame(7, 20);

    let mut group = c.benchmark_group("legal_moves");
    group.bench_function("opening", |b| b.iter(|| black_box(&opening).legal_moves()));
    group.bench_function("midgame", |b| b.iter(|| black_box(&middle).legal_moves()));
    group.finish();
}

fn bench_overall_result(c: &mut Criterion) {
    let middle = midgame(7, 20);
    c.bench_function("overall_result", |b| {
        b.iter(|| black_box(&middle).overall_result())
    });
}

fn bench_play(c: &mut Criterion) {
    let middle = midgame(7, 20);
    let mv = middle.legal_moves()[0];
    c.bench_function("with_move", |b| {
        b.iter(|| black_box(&middle).with_move(black_box(mv)))
    });
}

criterion_group!(benches, bench_legal_moves, bench_overall_result, bench_play);
criterion_main!(benches);
