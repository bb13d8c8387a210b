#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::density::multiplier_control_for, ClockError, NUM_VOICES};

/// Master density knob position at load.
pub const DEFAULT_MASTER_DENSITY: f32 = 0.1;
/// Gate length knob position at load (deterministic, 50%).
pub const DEFAULT_GATE_LEN: f32 = 0.25;
/// Volts per unit gate level on the voice outputs.
pub const DEFAULT_GATE_VOLTS: f32 = 10.0;
/// Volts per unit gate length fraction on the monitoring output.
pub const DEFAULT_GATE_LEN_VOLTS: f32 = 5.0;

/// Knob positions for one voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParams {
    /// Rate multiplier knob, 0..1 maps to x0.1..x10.
    pub multiplier: f32,
    /// Gate length knob: 0..0.5 fixed 1%..99%, above 0.5 random.
    pub gate_len: f32,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            multiplier: multiplier_control_for(1.0),
            gate_len: DEFAULT_GATE_LEN,
        }
    }
}

impl VoiceParams {
    pub fn multiplier(mut self, multiplier: f32) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn gate_len(mut self, gate_len: f32) -> Self {
        self.gate_len = gate_len;
        self
    }
}

/// All knob positions of the module.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomClockParams {
    /// Master density knob, shared by every voice.
    pub master_density: f32,
    pub voices: [VoiceParams; NUM_VOICES],
}

impl Default for RandomClockParams {
    fn default() -> Self {
        Self {
            master_density: DEFAULT_MASTER_DENSITY,
            voices: [VoiceParams::default(); NUM_VOICES],
        }
    }
}

impl RandomClockParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the master density knob
    pub fn master_density(mut self, control: f32) -> Self {
        self.master_density = control;
        self
    }

    /// Replace one voice's knobs. Out-of-range indices are ignored.
    pub fn voice(mut self, index: usize, voice: VoiceParams) -> Self {
        if let Some(slot) = self.voices.get_mut(index) {
            *slot = voice;
        }
        self
    }

    pub fn voice_mut(&mut self, index: usize) -> Result<&mut VoiceParams, ClockError> {
        self.voices
            .get_mut(index)
            .ok_or(ClockError::VoiceOutOfRange {
                index,
                count: NUM_VOICES,
            })
    }

    /// Load knob positions from a JSON preset. Missing fields keep their
    /// defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ClockError> {
        let params = serde_json::from_str(json)?;
        tracing::debug!(?params, "loaded clock preset");
        Ok(params)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, ClockError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Construction-time settings that are not knobs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockConfig {
    /// Fixed seed for reproducible streams; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Edge ramp in seconds, 0 for hard edges.
    pub slew_time: f32,
    pub gate_volts: f32,
    pub gate_len_volts: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            seed: None,
            slew_time: 0.0,
            gate_volts: DEFAULT_GATE_VOLTS,
            gate_len_volts: DEFAULT_GATE_LEN_VOLTS,
        }
    }
}

impl ClockConfig {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn slew_time(mut self, seconds: f32) -> Self {
        self.slew_time = seconds;
        self
    }
}
