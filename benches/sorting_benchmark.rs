use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use ipscsort::prelude::*;
use rand::Rng;
use std::hint::black_box;

fn bench_integers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Integer Sort");
    group.sample_size(10);

    // Dataset generation
    let mut rng = rand::rng();
    let count = 2_000;

    let random_ints: Vec<u64> = (0..count).map(|_| rng.random()).collect();

    group.bench_function("ipscsort (in-place)", |b| {
        b.iter_batched(
            || random_ints.clone(),
            |mut data| ipscsort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    // Std Sort (Stable)
    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || random_ints.clone(),
            |mut data| data.sort(),
            BatchSize::SmallInput,
        )
    });

    // Std Sort Unstable
    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || random_ints.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_few_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("Few Distinct Keys");
    group.sample_size(10);

    // Dataset with heavy duplication
    let mut rng = rand::rng();
    let count = 2_000;

    let input: Vec<(u8, u32)> = (0..count)
        .map(|i| (rng.random_range(0..4), i))
        .collect();

    group.bench_function("ipscsort (in-place)", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| ipscsort_by_key(black_box(&mut data), |x| x.0),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| data.sort_by_key(|x| x.0),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_integers, bench_few_keys);
criterion_main!(benches);
