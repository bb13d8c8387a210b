/// Context passed to block renderers
///
/// Contains information about how to render:
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - time: Current playback time in seconds
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub time: f64,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate: sample_rate.max(1.0),
            time: 0.0,
        }
    }

    /// Seconds per sample.
    #[inline]
    pub fn sample_time(&self) -> f32 {
        1.0 / self.sample_rate
    }

    /// Move the playback time forward by `frames` samples.
    pub fn advance(&mut self, frames: usize) {
        self.time += frames as f64 / self.sample_rate as f64;
    }
}
