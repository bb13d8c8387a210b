//! Benchmarks for the eight-voice module.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use randclock::{
    module::{RandomClock, RandomClockOutputs, RandomClockParams, VoiceParams},
    RenderCtx, NUM_VOICES,
};

use crate::BLOCK_SIZES;

pub fn bench_module(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/module");
    let ctx = RenderCtx::new(48_000.0);
    let all = [true; NUM_VOICES];

    for &size in BLOCK_SIZES {
        let mut frames = vec![RandomClockOutputs::default(); size];

        // === DEFAULT PANEL ===
        // Slow master, unity multipliers, 50% gates
        let mut idle = RandomClock::with_seed(1);
        group.bench_with_input(BenchmarkId::new("default_panel", size), &size, |b, _| {
            b.iter(|| {
                idle.render_block(black_box(&mut frames), &all, black_box(&ctx));
            })
        });

        // === DENSE MIXED ===
        // High master, spread multipliers, half the voices stochastic
        let mut params = RandomClockParams::new().master_density(0.9);
        for (i, voice) in params.voices.iter_mut().enumerate() {
            *voice = VoiceParams::default()
                .multiplier(i as f32 / (NUM_VOICES - 1) as f32)
                .gate_len(if i % 2 == 0 { 0.2 } else { 0.9 });
        }
        let mut dense = RandomClock::with_seed(2);
        dense.set_params(params);
        group.bench_with_input(BenchmarkId::new("dense_mixed", size), &size, |b, _| {
            b.iter(|| {
                dense.render_block(black_box(&mut frames), &all, black_box(&ctx));
            })
        });

        // === HALF PATCHED ===
        // Unconnected voices should cost nothing
        let mut half = RandomClock::with_seed(3);
        half.set_params(params);
        let mut connected = [false; NUM_VOICES];
        connected[..NUM_VOICES / 2].fill(true);
        group.bench_with_input(BenchmarkId::new("half_patched", size), &size, |b, _| {
            b.iter(|| {
                half.render_block(black_box(&mut frames), &connected, black_box(&ctx));
            })
        });
    }

    group.finish();
}
