//! Offline run: render the module without an audio device and log pulse
//! statistics per voice.

use color_eyre::eyre::{eyre, Result as EyreResult};
use randclock::{
    dsp::density::voice_density,
    module::{ClockConfig, RandomClock, RandomClockParams},
    RenderCtx, NUM_VOICES,
};

/// Pulse statistics gathered for one voice.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceStats {
    pub pulses: u64,
    first_pulse: Option<u64>,
    last_pulse: u64,
    gate_len_sum: f64,
}

impl VoiceStats {
    fn record(&mut self, sample: u64, gate_len: f32) {
        self.first_pulse.get_or_insert(sample);
        self.last_pulse = sample;
        self.pulses += 1;
        self.gate_len_sum += gate_len as f64;
    }

    /// Mean time between pulse starts in seconds.
    pub fn mean_interval(&self, sample_rate: f32) -> Option<f64> {
        let first = self.first_pulse?;
        if self.pulses < 2 {
            return None;
        }
        let span = (self.last_pulse - first) as f64 / sample_rate as f64;
        Some(span / (self.pulses - 1) as f64)
    }

    /// Mean committed gate length fraction.
    pub fn mean_gate_len(&self) -> Option<f64> {
        (self.pulses > 0).then(|| self.gate_len_sum / self.pulses as f64)
    }
}

/// Step the module sample by sample with every voice connected.
pub fn measure(
    module: &mut RandomClock,
    frames: u64,
    ctx: &RenderCtx,
) -> [VoiceStats; NUM_VOICES] {
    let connected = [true; NUM_VOICES];
    let dt = ctx.sample_time();
    let mut stats = [VoiceStats::default(); NUM_VOICES];
    let mut counts = [0u64; NUM_VOICES];

    for sample in 0..frames {
        module.process(dt, &connected);
        for (i, voice) in module.voices().iter().enumerate() {
            if voice.pulse_count() != counts[i] {
                counts[i] = voice.pulse_count();
                stats[i].record(sample, voice.current_gate_len());
            }
        }
    }

    stats
}

pub fn run(
    params: RandomClockParams,
    config: ClockConfig,
    seconds: f32,
    sample_rate: f32,
) -> EyreResult<()> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(eyre!("headless duration must be positive, got {}", seconds));
    }
    if !sample_rate.is_finite() || sample_rate < 1.0 {
        return Err(eyre!("sample rate must be at least 1 Hz, got {}", sample_rate));
    }

    let mut module = RandomClock::new(params, config)?;
    let ctx = RenderCtx::new(sample_rate);
    let frames = (seconds as f64 * sample_rate as f64) as u64;

    tracing::info!(seconds, sample_rate, frames, seed = ?config.seed, "headless run");

    let stats = measure(&mut module, frames, &ctx);

    tracing::info!(master_hz = module.current_density(), "master density");
    for (i, voice) in stats.iter().enumerate() {
        let knobs = &params.voices[i];
        let density = voice_density(params.master_density, knobs.multiplier);
        tracing::info!(
            voice = i,
            density_hz = density,
            expected_interval_s = 1.0 / density,
            pulses = voice.pulses,
            mean_interval_s = ?voice.mean_interval(sample_rate),
            mean_gate_len = ?voice.mean_gate_len(),
            "voice stats"
        );
    }

    Ok(())
}
