//! Benchmarks for low-level clock primitives.

mod clock;
mod density;

pub use clock::bench_clock;
pub use density::{bench_density, bench_gate_length};
