use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ipscsort::prelude::*;
use rand::Rng;
use std::hint::black_box;
use std::time::Duration;

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scaling");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20)); // quadratic comparisons at the top sizes

    let mut rng = rand::rng();

    for count in [256usize, 1_024, 4_096, 16_384] {
        let input: Vec<u32> = (0..count).map(|_| rng.random()).collect();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("ipscsort", count), &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |mut data| ipscsort(black_box(&mut data)),
                BatchSize::LargeInput,
            )
        });

        group.bench_with_input(
            BenchmarkId::new("slice::sort (stable)", count),
            &input,
            |b, input| {
                b.iter_batched(
                    || input.clone(),
                    |mut data| data.sort(),
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_scaling);
criterion_main!(benches);
