use chessmatch::board::Board;
use chessmatch::move_generator::count_positions;

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("count all possible positions to depth 4", |b| {
        b.iter(|| count_positions(4, &mut Board::default()).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
