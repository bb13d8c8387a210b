//! Low-level clock primitives used by the host module.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside per-voice slots. They stay focused on the timing and
//! random math so the host layer can deal with knobs, outputs and messages.

/// Poisson voice clock with committed gate lengths.
pub mod clock;
/// Knob-to-rate curves for the master density and voice multipliers.
pub mod density;
/// Deterministic and stochastic gate length policies.
pub mod gate_length;
/// Seeded per-voice random source.
pub mod rng;

pub use clock::{ClockState, VoiceClock};
pub use gate_length::GateLengthPolicy;
