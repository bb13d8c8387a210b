//! Shared state types for UI communication
//!
//! Everything crossing the audio thread boundary is Copy and allocation-free.

use randclock::{dsp::clock::VoiceClock, NUM_VOICES};

/// Patch changes sent from UI thread to audio thread
#[derive(Clone, Copy, Debug)]
pub enum PatchMessage {
    /// Plug or unplug a voice output
    SetConnected { voice: usize, connected: bool },
}

/// Dynamic state update sent from audio thread
#[derive(Clone, Copy, Debug, Default)]
pub struct UiStateUpdate {
    /// Master density in Hz
    pub master_hz: f32,
    /// Stream time in seconds
    pub time: f64,
    pub voices: [VoiceSnapshot; NUM_VOICES],
}

/// Dynamic state for a single voice
#[derive(Clone, Copy, Debug, Default)]
pub struct VoiceSnapshot {
    pub connected: bool,
    pub gate_open: bool,
    /// Effective density in Hz
    pub density_hz: f32,
    /// Committed gate length fraction of the current pulse
    pub gate_len: f32,
    pub stochastic: bool,
    pub pulses: u64,
}

impl VoiceSnapshot {
    pub fn capture(clock: &VoiceClock, connected: bool) -> Self {
        Self {
            connected,
            gate_open: clock.is_gate_open(),
            density_hz: clock.density(),
            gate_len: clock.current_gate_len(),
            stochastic: clock.current_policy().is_stochastic(),
            pulses: clock.pulse_count(),
        }
    }
}
