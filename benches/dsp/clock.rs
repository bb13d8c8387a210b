//! Benchmarks for a single voice clock.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use randclock::{dsp::clock::VoiceClock, RenderCtx};

use crate::BLOCK_SIZES;

pub fn bench_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/clock");
    let ctx = RenderCtx::new(48_000.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sparse: almost every step is just a phase increment
        let mut sparse = VoiceClock::new(1);
        sparse.set_density(0.5);
        group.bench_with_input(BenchmarkId::new("sparse", size), &size, |b, _| {
            b.iter(|| {
                sparse.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Dense stochastic: frequent exponential and gate length draws
        let mut dense = VoiceClock::new(2);
        dense.set_density(2_000.0);
        dense.set_gate_len(1.0);
        group.bench_with_input(BenchmarkId::new("dense_stochastic", size), &size, |b, _| {
            b.iter(|| {
                dense.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Slewed edges
        let mut slewed = VoiceClock::new(3).with_slew(0.002);
        slewed.set_density(20.0);
        group.bench_with_input(BenchmarkId::new("slewed", size), &size, |b, _| {
            b.iter(|| {
                slewed.render(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
