//! Audible clicks for rising gate edges
//!
//! Each voice gets a short decaying sine blip at its own pitch so the eight
//! streams can be told apart by ear.

use std::f32::consts::TAU;

use randclock::{module::RandomClockOutputs, NUM_VOICES};

/// Click decay time constant in seconds.
const CLICK_DECAY: f32 = 0.012;
/// Output gain per click; eight simultaneous clicks stay below full scale.
const CLICK_GAIN: f32 = 0.2;
/// Minor pentatonic from A4, one pitch per voice.
const VOICE_PITCHES: [f32; NUM_VOICES] = [
    440.0, 523.25, 587.33, 659.25, 783.99, 880.0, 1046.5, 1174.66,
];

#[derive(Clone, Copy, Default)]
struct Click {
    phase: f32,
    level: f32,
    increment: f32,
}

impl Click {
    fn next(&mut self, decay: f32) -> f32 {
        if self.level < 1.0e-4 {
            return 0.0;
        }
        let out = (self.phase * TAU).sin() * self.level;
        self.phase = (self.phase + self.increment).fract();
        self.level *= decay;
        out
    }
}

pub struct ClickBank {
    clicks: [Click; NUM_VOICES],
    last_gates: [f32; NUM_VOICES],
    decay: f32,
}

impl ClickBank {
    pub fn new(sample_rate: f32) -> Self {
        let sample_rate = sample_rate.max(1.0);
        let clicks = std::array::from_fn(|i| Click {
            increment: VOICE_PITCHES[i] / sample_rate,
            ..Click::default()
        });

        Self {
            clicks,
            last_gates: [0.0; NUM_VOICES],
            decay: (-1.0 / (CLICK_DECAY * sample_rate)).exp(),
        }
    }

    /// Render one mono sample, starting a click on every rising edge.
    pub fn next(&mut self, frame: &RandomClockOutputs) -> f32 {
        let mut out = 0.0;
        for (i, click) in self.clicks.iter_mut().enumerate() {
            let gate = frame.gates[i];
            if gate > 0.0 && self.last_gates[i] <= 0.0 {
                click.phase = 0.0;
                click.level = 1.0;
            }
            self.last_gates[i] = gate;
            out += click.next(self.decay);
        }
        out * CLICK_GAIN
    }
}
