//! Per-voice random source.
//!
//! Each voice clock owns one of these. The generator is seeded once and
//! never reseeded while running, so a fixed seed reproduces the exact same
//! pulse stream.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::ClockError;

/// Smallest uniform draw fed into `ln`, keeps exponential draws finite.
const MIN_UNIFORM: f32 = f32::EPSILON;

/// Small, fast, non-cryptographic PRNG for realtime use.
#[derive(Debug, Clone)]
pub struct ClockRng(SmallRng);

impl ClockRng {
    /// Same seed, same stream. Useful for tests and reproducible patches.
    pub fn new_with_seed(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Seed from the operating system's entropy source.
    pub fn from_entropy() -> Result<Self, ClockError> {
        SmallRng::try_from_os_rng()
            .map(Self)
            .map_err(|err| ClockError::Entropy(err.to_string()))
    }

    /// Uniform value in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f32 {
        self.0.random::<f32>()
    }

    /// Exponential value with mean 1.
    ///
    /// Bounded above by `-ln(f32::EPSILON)` (about 15.9), so waiting times
    /// derived from it are always finite.
    #[inline]
    pub fn exponential(&mut self) -> f32 {
        // 1 - u lies in (0, 1]
        let u = (1.0 - self.uniform()).max(MIN_UNIFORM);
        -u.ln()
    }

    /// Derive an independent child seed, used to give each voice its own
    /// stream from one module seed.
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.0.random::<u64>()
    }
}
