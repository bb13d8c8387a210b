use super::{gate_length::GateLengthPolicy, rng::ClockRng};
use crate::{render::RenderCtx, ClockError, MIN_TIME};

/*
Random Voice Clock
==================

A voice clock fires pulses at random moments whose average rate is the
density, and holds each pulse high for a gate length chosen by the gate
length policy (see `gate_length.rs`).

Vocabulary
----------

  density       Target mean pulse rate in Hz. Mean interval = 1 / density.

  phase         "Expected events so far": the integral of density over
                time since the last pulse. Dimensionless.

  threshold     How much phase the next pulse needs. Drawn fresh from an
                exponential distribution with mean 1 after every pulse.

  gate length   Fraction of the mean interval the gate stays high,
                committed when a pulse starts and held until the next one.


Arrival Process
---------------

Pulses form a Poisson process. Rather than drawing a waiting time in
seconds (which goes stale as soon as the density knob moves), we draw the
waiting time in units of "expected events":

    each sample:   phase += density * sample_time
    fire when:     phase >= threshold,  threshold ~ Exp(1)

For a constant density this is exactly an exponential waiting time with
mean 1 / density. When the density changes mid-wait, the remaining wait
stretches or shrinks with it, and density = 0 simply stops the phase from
moving. No division by the density happens on the arrival path.

The first threshold is drawn at construction, so voices start after a
random delay instead of all clicking together at t = 0. Draws are capped
(see `ClockRng::exponential`) so that delay is bounded.


The State Machine
-----------------

    ┌─────────┐   phase >= threshold   ┌───────────┐
    │ Waiting │ ─────────────────────→ │ Gate open │
    └─────────┘                        └───────────┘
         ↑      elapsed >= duration      │   ↑   │ phase >= threshold
         └───────────────────────────────┘   │   ↓ (retrigger)
                                          ┌───────────┐
                                          │ Rearming  │ one sample low
                                          └───────────┘

The arrival clock keeps running while the gate is open, otherwise the mean
interval would grow by the gate length. An arrival while the output was high
on the previous sample retriggers: a new gate length is committed, the gate
timer restarts, and the output drops for one sample (Rearming) so that
every pulse shows up downstream as its own rising edge. Arrivals are held
back during the sample that ends Rearming; the phase keeps counting and
the held arrival fires on the following sample.

A pulse is always high for at least one sample, so even a 0% gate produces
a one-sample trigger.


Precision
---------

Phase and gate time are f64 accumulators. At 48 kHz and the lowest knob
settings one step adds about 1e-7 to the phase, which an f32 sum around 2
would round away entirely.


Skipped Steps
-------------

`process` handles at most one arrival per call. If the host skips a voice
and then passes a long accumulated `sample_time`, one pulse fires and the
rest of the backlog is dropped; missed pulses are never replayed.
*/

/// Highest density the clock will run at, in Hz. Larger values (and +Inf)
/// are clamped here.
pub const MAX_CLOCK_DENSITY_HZ: f32 = 100_000.0;

/// Densities below this are treated as zero (no pulses).
pub const MIN_ACTIVE_DENSITY_HZ: f32 = 1.0e-6;

/// Current stage of the clock state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Waiting,  // Gate low, waiting for the next arrival
    GateOpen, // Gate high until the committed duration has elapsed
    Rearming, // One low sample before a retriggered pulse goes high
}

/// One independent random clock voice.
#[derive(Debug, Clone)]
pub struct VoiceClock {
    // Inputs, latched by the setters
    density: f32,      // Hz, sanitized
    gate_control: f32, // gate length knob, applied at the next pulse start
    slew_time: f32,    // seconds for a full 0 → 1 edge, 0 = hard edges

    // Arrival process
    phase: f64,
    threshold: f64,

    // Gate bookkeeping
    state: ClockState,
    gate_elapsed: f64,       // seconds since the current pulse started
    gate_duration: f64,      // seconds, committed at pulse start
    current_gate_len: f32,   // fraction of the mean interval, committed at pulse start
    policy: GateLengthPolicy, // policy of the current pulse

    level: f32,
    pulse_count: u64,
    rng: ClockRng,
}

impl VoiceClock {
    /// Create a clock with a fixed seed. Same seed and inputs, same pulses.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(ClockRng::new_with_seed(seed))
    }

    /// Create a clock seeded from OS entropy.
    pub fn from_entropy() -> Result<Self, ClockError> {
        Ok(Self::with_rng(ClockRng::from_entropy()?))
    }

    fn with_rng(mut rng: ClockRng) -> Self {
        let threshold = rng.exponential() as f64;

        Self {
            density: 0.0,
            gate_control: 0.25,
            slew_time: 0.0,

            phase: 0.0,
            threshold,

            state: ClockState::Waiting,
            gate_elapsed: 0.0,
            gate_duration: 0.0,
            current_gate_len: 0.0,
            policy: GateLengthPolicy::default(),

            level: 0.0,
            pulse_count: 0,
            rng,
        }
    }

    /// Soften gate edges with a linear ramp of `seconds` per full edge.
    ///
    /// 0 (the default) gives clean on/off output.
    pub fn with_slew(mut self, seconds: f32) -> Self {
        self.set_slew(seconds);
        self
    }

    pub fn set_slew(&mut self, seconds: f32) {
        // Ramps shorter than a sample at 48 kHz are indistinguishable from hard edges
        self.slew_time = if seconds.is_finite() && seconds >= MIN_TIME {
            seconds
        } else {
            0.0
        };
    }

    /// Set the target mean pulse rate in Hz.
    ///
    /// Negative and NaN densities count as 0; +Inf and anything above
    /// [`MAX_CLOCK_DENSITY_HZ`] is clamped to it.
    #[inline]
    pub fn set_density(&mut self, hz: f32) {
        self.density = if hz.is_nan() || hz < MIN_ACTIVE_DENSITY_HZ {
            0.0
        } else {
            hz.min(MAX_CLOCK_DENSITY_HZ)
        };
    }

    /// Set the gate length knob (0..1) used when the next pulse starts.
    #[inline]
    pub fn set_gate_len(&mut self, control: f32) {
        self.gate_control = control;
    }

    /// Advance by `sample_time` seconds and return the gate level in `[0, 1]`.
    #[inline]
    pub fn process(&mut self, sample_time: f32) -> f32 {
        let dt = if sample_time.is_finite() {
            sample_time.max(0.0) as f64
        } else {
            0.0
        };

        let was_high = self.state == ClockState::GateOpen;
        let mut hold = false;

        match self.state {
            ClockState::GateOpen => {
                self.gate_elapsed += dt;
                if self.gate_elapsed >= self.gate_duration {
                    self.state = ClockState::Waiting;
                }
            }
            ClockState::Rearming => {
                // The low sample went out; this one shows the pending pulse
                self.state = ClockState::GateOpen;
                hold = true;
            }
            ClockState::Waiting => {}
        }

        if self.density > 0.0 {
            let density = self.density as f64;
            self.phase += density * dt;

            if !hold && self.phase >= self.threshold {
                let excess = self.phase - self.threshold;
                self.threshold = self.rng.exponential() as f64;
                // Carry the overshoot into the next wait unless it alone would
                // fire again; a backlog never turns into a burst.
                self.phase = if excess < self.threshold { excess } else { 0.0 };

                // Time since the arrival actually happened inside this step
                let since_arrival = (excess / density).min(dt);
                self.start_pulse(since_arrival, was_high);
            }
        }

        let target = match self.state {
            ClockState::GateOpen => 1.0,
            ClockState::Waiting | ClockState::Rearming => 0.0,
        };

        if self.slew_time > 0.0 {
            let step = dt as f32 / self.slew_time;
            if self.level < target {
                self.level = (self.level + step).min(target);
            } else {
                self.level = (self.level - step).max(target);
            }
        } else {
            self.level = target;
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    fn start_pulse(&mut self, since_arrival: f64, retrigger: bool) {
        self.policy = GateLengthPolicy::from_control(self.gate_control);
        self.current_gate_len = self.policy.fraction(&mut self.rng);
        self.gate_duration = self.current_gate_len as f64 / self.density as f64;
        self.gate_elapsed = since_arrival;
        self.state = if retrigger {
            ClockState::Rearming
        } else {
            ClockState::GateOpen
        };
        self.pulse_count = self.pulse_count.wrapping_add(1);
    }

    /// Render a block of gate levels into the buffer.
    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        let dt = ctx.sample_time();
        for sample in buffer.iter_mut() {
            *sample = self.process(dt);
        }
    }

    /// Return to the startup state: gate low, fresh startup delay.
    ///
    /// Density, gate length knob and slew are kept. The RNG continues its
    /// stream rather than being reseeded.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.threshold = self.rng.exponential() as f64;
        self.state = ClockState::Waiting;
        self.gate_elapsed = 0.0;
        self.gate_duration = 0.0;
        self.current_gate_len = 0.0;
        self.level = 0.0;
        self.pulse_count = 0;
    }

    /// Gate length of the most recently started pulse, as a fraction of the
    /// mean interval. 0 before the first pulse.
    pub fn current_gate_len(&self) -> f32 {
        self.current_gate_len
    }

    /// Duration in seconds committed for the most recently started pulse.
    pub fn current_gate_duration(&self) -> f32 {
        self.gate_duration as f32
    }

    /// Policy the most recently started pulse was drawn from.
    pub fn current_policy(&self) -> GateLengthPolicy {
        self.policy
    }

    pub fn is_gate_open(&self) -> bool {
        self.state == ClockState::GateOpen
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Current output level (0.0 to 1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    /// Pulses started since construction or the last reset.
    pub fn pulse_count(&self) -> u64 {
        self.pulse_count
    }
}
