use crate::{
    dsp::{
        clock::VoiceClock,
        density::{map_master_density, map_voice_multiplier, sanitize_control},
        rng::ClockRng,
    },
    module::{
        message::{ClockMessage, MessageReceiver},
        params::{ClockConfig, RandomClockParams},
    },
    render::RenderCtx,
    ClockError, NUM_VOICES,
};

/*
Random Clock Module
===================

Eight voice clocks behind one master density knob. This is the host side
of the clock contract: it owns the knobs, turns them into densities and
gate length controls, and scales gate levels into voltages.

    master knob ──→ map_master_density ──→ Hz ─┐
                                               ×──→ voice clock i ──→ x10 V ──→ out i
    voice i multiplier knob ──→ x0.1..x10 ─────┘          ↑
    voice i gate length knob ─────────────────────────────┘

    voice 0 current gate length ──→ x5 V ──→ gate length monitor out

Only connected outputs are processed. A voice whose output is unplugged
does no work and its clock stands still, so plugging it back in resumes
where it left off rather than replaying what it missed.

The gate length monitor reads voice 0 regardless of whether voice 0 is
connected; it never writes back into any clock.
*/

/// Voltages produced by one module step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RandomClockOutputs {
    /// Gate output per voice, in volts.
    pub gates: [f32; NUM_VOICES],
    /// Voice 0 gate length fraction, in volts.
    pub gate_len: f32,
}

pub struct RandomClock {
    clocks: [VoiceClock; NUM_VOICES],
    params: RandomClockParams,
    config: ClockConfig,
    current_density: f32, // master density in Hz, refreshed every step
}

impl RandomClock {
    /// Build the module. Without a configured seed, voices are seeded from
    /// OS entropy.
    pub fn new(params: RandomClockParams, config: ClockConfig) -> Result<Self, ClockError> {
        let seeder = match config.seed {
            Some(seed) => ClockRng::new_with_seed(seed),
            None => ClockRng::from_entropy()?,
        };

        tracing::debug!(
            seed = ?config.seed,
            slew_time = config.slew_time,
            voices = NUM_VOICES,
            "random clock created"
        );

        Ok(Self::build(seeder, params, config))
    }

    /// Build with default knobs and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(
            ClockRng::new_with_seed(seed),
            RandomClockParams::default(),
            ClockConfig::default().seed(seed),
        )
    }

    fn build(mut seeder: ClockRng, params: RandomClockParams, config: ClockConfig) -> Self {
        // Each voice gets its own stream so they never pulse in lockstep
        let clocks = std::array::from_fn(|_| {
            VoiceClock::new(seeder.next_seed()).with_slew(config.slew_time)
        });

        Self {
            clocks,
            params,
            config,
            current_density: map_master_density(params.master_density),
        }
    }

    /// Advance every connected voice by `sample_time` seconds.
    pub fn process(
        &mut self,
        sample_time: f32,
        connected: &[bool; NUM_VOICES],
    ) -> RandomClockOutputs {
        let master = map_master_density(self.params.master_density);
        self.current_density = master;

        let mut out = RandomClockOutputs::default();

        for (i, clock) in self.clocks.iter_mut().enumerate() {
            if !connected[i] {
                continue;
            }

            let voice = &self.params.voices[i];
            clock.set_density(master * map_voice_multiplier(voice.multiplier));
            clock.set_gate_len(voice.gate_len);
            out.gates[i] = self.config.gate_volts * clock.process(sample_time);
        }

        out.gate_len = self.config.gate_len_volts * self.clocks[0].current_gate_len();
        out
    }

    /// Render a block of module steps.
    pub fn render_block(
        &mut self,
        out: &mut [RandomClockOutputs],
        connected: &[bool; NUM_VOICES],
        ctx: &RenderCtx,
    ) {
        let dt = ctx.sample_time();
        for frame in out.iter_mut() {
            *frame = self.process(dt, connected);
        }
    }

    /// Apply pending control messages. Call between blocks.
    pub fn drain_messages<R: MessageReceiver>(&mut self, rx: &mut R) {
        while let Some(msg) = rx.pop() {
            self.apply_message(msg);
        }
    }

    /// Apply one control message. Messages addressed to a voice that does
    /// not exist are dropped.
    pub fn apply_message(&mut self, msg: ClockMessage) {
        match msg {
            ClockMessage::SetMasterDensity(value) => {
                self.params.master_density = sanitize_control(value);
            }
            ClockMessage::SetMultiplier { voice, value } => {
                if let Ok(v) = self.params.voice_mut(voice) {
                    v.multiplier = sanitize_control(value);
                }
            }
            ClockMessage::SetGateLen { voice, value } => {
                if let Ok(v) = self.params.voice_mut(voice) {
                    v.gate_len = sanitize_control(value);
                }
            }
            ClockMessage::Reset => self.reset(),
        }
    }

    /// Reset every voice to its startup state.
    pub fn reset(&mut self) {
        for clock in &mut self.clocks {
            clock.reset();
        }
        tracing::debug!(voices = NUM_VOICES, "random clock reset");
    }

    pub fn params(&self) -> &RandomClockParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut RandomClockParams {
        &mut self.params
    }

    pub fn set_params(&mut self, params: RandomClockParams) {
        self.params = params;
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Master density in Hz as of the last step.
    pub fn current_density(&self) -> f32 {
        self.current_density
    }

    pub fn voice(&self, index: usize) -> Option<&VoiceClock> {
        self.clocks.get(index)
    }

    pub fn voices(&self) -> &[VoiceClock; NUM_VOICES] {
        &self.clocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::params::VoiceParams;

    const DT: f32 = 1.0 / 48_000.0;
    const ALL: [bool; NUM_VOICES] = [true; NUM_VOICES];

    #[test]
    fn outputs_are_scaled_voltages() {
        let mut module = RandomClock::with_seed(1);
        module.set_params(RandomClockParams::new().master_density(0.8));

        let mut saw_high = false;
        for _ in 0..48_000 {
            let out = module.process(DT, &ALL);
            for &v in &out.gates {
                assert!(v == 0.0 || v == 10.0, "unexpected voltage {}", v);
                saw_high |= v == 10.0;
            }
            assert!((0.0..=5.0).contains(&out.gate_len));
        }
        assert!(saw_high);
    }

    #[test]
    fn gate_len_tap_reports_voice_zero() {
        let mut module = RandomClock::with_seed(2);
        module.set_params(
            RandomClockParams::new()
                .master_density(0.75)
                .voice(0, VoiceParams::default().gate_len(0.0)),
        );

        let mut out = RandomClockOutputs::default();
        for _ in 0..48_000 {
            out = module.process(DT, &ALL);
        }
        assert!(module.voice(0).unwrap().pulse_count() > 0);
        // 1% of the interval, times 5 V
        assert!((out.gate_len - 0.05).abs() < 1e-5);
    }

    #[test]
    fn unconnected_voices_do_no_work() {
        let mut module = RandomClock::with_seed(3);
        module.set_params(RandomClockParams::new().master_density(1.0));

        let mut connected = [false; NUM_VOICES];
        connected[2] = true;
        for _ in 0..48_000 {
            let out = module.process(DT, &connected);
            for (i, &v) in out.gates.iter().enumerate() {
                if i != 2 {
                    assert_eq!(v, 0.0);
                }
            }
        }
        for (i, clock) in module.voices().iter().enumerate() {
            if i == 2 {
                assert!(clock.pulse_count() > 0);
            } else {
                assert_eq!(clock.pulse_count(), 0);
            }
        }
    }

    #[test]
    fn voices_are_independent_streams() {
        let mut module = RandomClock::with_seed(4);
        module.set_params(RandomClockParams::new().master_density(0.8));
        let mut frames = vec![RandomClockOutputs::default(); 48_000];
        module.render_block(&mut frames, &ALL, &RenderCtx::new(48_000.0));

        let trace = |v: usize| frames.iter().map(|f| f.gates[v]).collect::<Vec<_>>();
        assert_ne!(trace(0), trace(1));
    }

    #[test]
    fn messages_update_knobs() {
        let mut module = RandomClock::with_seed(5);
        module.apply_message(ClockMessage::SetMasterDensity(2.0));
        module.apply_message(ClockMessage::SetGateLen { voice: 1, value: 0.9 });
        module.apply_message(ClockMessage::SetMultiplier { voice: 99, value: 0.5 });

        assert_eq!(module.params().master_density, 1.0);
        assert_eq!(module.params().voices[1].gate_len, 0.9);

        module.process(DT, &ALL);
        assert!((module.current_density() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn seeded_modules_are_reproducible() {
        let run = || {
            let params = RandomClockParams::new().master_density(0.7);
            let mut module = RandomClock::new(params, ClockConfig::default().seed(77)).unwrap();
            (0..20_000)
                .map(|_| module.process(DT, &ALL))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
