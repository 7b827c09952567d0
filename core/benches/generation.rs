use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use wordpath_core::{DailyRng, PuzzleGenerator, RandomPathGenerator, SeededPathGenerator};

const WORD: &str = "ALGORITMOS";

fn bench_random_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_walk");
    for size in [4u8, 5, 6] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                let puzzle = RandomPathGenerator::new(seed).generate(WORD, size);
                black_box(puzzle.is_ok())
            })
        });
    }
    group.finish();
}

fn bench_seeded_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("seeded_walk");
    for size in [4u8, 5, 6] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut seed = 20250101i64;
            b.iter(|| {
                seed += 1;
                let puzzle = SeededPathGenerator::new(seed).generate(WORD, size);
                black_box(puzzle.is_ok())
            })
        });
    }
    group.finish();
}

fn bench_daily_rng(c: &mut Criterion) {
    c.bench_function("daily_rng_bounded", |b| {
        let mut rng = DailyRng::new(20251110);
        b.iter(|| black_box(rng.next_bounded(black_box(70))))
    });
}

criterion_group!(benches, bench_random_walk, bench_seeded_walk, bench_daily_rng);
criterion_main!(benches);
