//! Benchmarks for knob curves and gate length draws.

use std::hint::black_box;

use criterion::Criterion;
use randclock::dsp::{
    density::{map_master_density, voice_density},
    gate_length::GateLengthPolicy,
    rng::ClockRng,
};

pub fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/density");

    // One call per sample per module; both segments
    group.bench_function("master_low", |b| {
        b.iter(|| map_master_density(black_box(0.2)))
    });
    group.bench_function("master_high", |b| {
        b.iter(|| map_master_density(black_box(0.8)))
    });
    group.bench_function("voice", |b| {
        b.iter(|| voice_density(black_box(0.6), black_box(0.3)))
    });

    group.finish();
}

pub fn bench_gate_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/gate_length");
    let mut rng = ClockRng::new_with_seed(1);

    let deterministic = GateLengthPolicy::from_control(0.25);
    group.bench_function("deterministic", |b| {
        b.iter(|| black_box(deterministic).fraction(&mut rng))
    });

    let stochastic = GateLengthPolicy::from_control(1.0);
    group.bench_function("stochastic", |b| {
        b.iter(|| black_box(stochastic).fraction(&mut rng))
    });

    group.finish();
}
