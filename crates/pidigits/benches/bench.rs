use core::hint::black_box;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pidigits::{Chudnovsky, DigitProvider};

// Precisions (fractional digits) covered per benchmark run.
const PRECISIONS: [u32; 5] = [10, 100, 1_000, 10_000, 100_000];

/// Benchmarks a full provider call, including formatting, at each precision.
fn bench_chudnovsky(c: &mut Criterion) {
    let mut group = c.benchmark_group("chudnovsky");
    group.sample_size(10);

    for digits in PRECISIONS {
        group.throughput(Throughput::Elements(u64::from(digits)));
        group.bench_with_input(BenchmarkId::new("digits", digits), &digits, |b, &digits| {
            b.iter(|| {
                let pi = Chudnovsky
                    .pi_digits(black_box(digits))
                    .expect("precision within range");
                black_box(pi);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chudnovsky);
criterion_main!(benches);
