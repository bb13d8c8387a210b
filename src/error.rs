use thiserror::Error;

/// Errors from the non-realtime parts of the crate.
///
/// Nothing on the audio path returns these; `process` sanitizes its inputs
/// instead.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("failed to seed from OS entropy: {0}")]
    Entropy(String),

    #[cfg(feature = "serde")]
    #[error("invalid preset: {0}")]
    Preset(#[from] serde_json::Error),

    #[error("voice index {index} out of range (module has {count} voices)")]
    VoiceOutOfRange { index: usize, count: usize },
}
