//! Host layer: the eight-voice random clock module.
//!
//! Sits above the voice clocks and owns everything the clocks themselves do
//! not care about: knob positions, output voltages, connection state and
//! cross-thread control messages.

/// Cross-thread knob changes.
pub mod message;
/// Knob positions, presets and construction settings.
pub mod params;
/// The module itself.
pub mod random_clock;

pub use message::{ClockMessage, MessageReceiver};
pub use params::{ClockConfig, RandomClockParams, VoiceParams};
pub use random_clock::{RandomClock, RandomClockOutputs};
