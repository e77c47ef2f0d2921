use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_fifteen::core::{is_solvable, Board, Shuffler};
use tui_fifteen::engine::apply;
use tui_fifteen::types::Pos;

fn bench_solvable(c: &mut Criterion) {
    let mut shuffler = Shuffler::new(12345);
    let board = shuffler.generate();

    c.bench_function("solvability_check", |b| {
        b.iter(|| is_solvable(black_box(&board)))
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let mut shuffler = Shuffler::new(12345);

    c.bench_function("shuffle_100_steps", |b| {
        b.iter(|| shuffler.generate())
    });
}

fn bench_apply_single(c: &mut Criterion) {
    // Hole at (3,3); (3,2) is an adjacent tile.
    let board = Board::solved();

    c.bench_function("apply_single", |b| {
        b.iter(|| apply(black_box(&board), Pos::new(3, 2)))
    });
}

fn bench_apply_line_slide(c: &mut Criterion) {
    // (3,0) is three tiles away along the bottom row.
    let board = Board::solved();

    c.bench_function("apply_line_slide", |b| {
        b.iter(|| apply(black_box(&board), Pos::new(3, 0)))
    });
}

criterion_group!(
    benches,
    bench_solvable,
    bench_shuffle,
    bench_apply_single,
    bench_apply_line_slide
);
criterion_main!(benches);
