//! Real-world scenario benchmarks.
//!
//! These model the module as a host drives it: all eight voices, knobs at
//! typical panel positions.

mod module;

pub use module::bench_module;
