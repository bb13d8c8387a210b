pub mod dsp;
mod error;
pub mod module; // Eight-voice host around the voice clocks
pub mod render;

pub use error::ClockError;
pub use render::RenderCtx;

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Number of voices in a [`module::RandomClock`].
pub const NUM_VOICES: usize = 8;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
