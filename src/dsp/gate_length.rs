use super::{density::sanitize_control, rng::ClockRng};

/*
Gate Length Policy
==================

One knob (0.0 to 1.0) chooses how long each pulse stays high. The length
is always a fraction of the mean clock interval (1 / density), so the
same knob position gives the same "feel" at any rate.

    control   0.0 ──────────── 0.5 ──────────────────── 1.0
              │ deterministic  │ stochastic              │
              1% ......... 99% │ uniform ... strongly U-shaped


Deterministic half (0.0 ..= 0.5)
--------------------------------

    fraction = 0.01 + (control / 0.5) * 0.98

0.0 gives 1% (a trigger), 0.25 gives 50% (a square-ish clock), 0.5 gives
99% (nearly legato). No randomness is involved.


Stochastic half (0.5, 1.0]
--------------------------

Each pulse draws a fresh fraction in [0, 1] from a symmetric U-shaped
distribution. The distance above 0.5 is the bias:

    bias = (control - 0.5) / 0.5          0.0 .. 1.0
    p    = 1 - 0.9 * bias                 1.0 .. 0.1

    u    uniform in [0, 1)
    y    = 2u - 1                         uniform in [-1, 1)
    x    = 0.5 + 0.5 * sign(y) * |y|^p

With p = 1 the draw is uniform. As p shrinks, |y|^p is pushed towards 1,
so x piles up near 0 and 1 (very short or very long gates) and thins out
around 0.5. The density of |y|^p is (1/p) * z^(1/p - 1): at p = 0.1 that
is 10 * z^9, so roughly two thirds of all draws land within 5% of an end.

                  p = 1.0            p = 0.5            p = 0.1
    density     ▁▁▁▁▁▁▁▁▁▁         █▃▂▁▁▁▁▂▃█         █▁        ▁█
                0   0.5   1        0   0.5   1        0   0.5   1

Each draw costs one uniform and one powf, bounded time on the audio thread.
*/

const SPLIT: f32 = 0.5;
const MIN_FRACTION: f32 = 0.01;
const MAX_FRACTION: f32 = 0.99;
const MIN_EXPONENT: f32 = 0.1;

/// How the next pulse's gate length is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateLengthPolicy {
    /// Fixed fraction of the mean interval, in `[0.01, 0.99]`.
    Deterministic(f32),
    /// Fresh U-shaped draw per pulse; bias in `[0, 1]` controls how hard
    /// the extremes are favoured.
    Stochastic(f32),
}

impl GateLengthPolicy {
    /// Select the policy for a knob position.
    pub fn from_control(control: f32) -> Self {
        let control = sanitize_control(control);

        if control <= SPLIT {
            let t = control / SPLIT;
            Self::Deterministic(MIN_FRACTION + t * (MAX_FRACTION - MIN_FRACTION))
        } else {
            Self::Stochastic(((control - SPLIT) / (1.0 - SPLIT)).clamp(0.0, 1.0))
        }
    }

    /// Gate length as a fraction of the mean interval, in `[0, 1]`.
    ///
    /// Only the stochastic policy touches `rng`.
    #[inline]
    pub fn fraction(&self, rng: &mut ClockRng) -> f32 {
        match *self {
            Self::Deterministic(fraction) => fraction,
            Self::Stochastic(bias) => favour_extremes(rng.uniform(), bias),
        }
    }

    pub fn is_stochastic(&self) -> bool {
        matches!(self, Self::Stochastic(_))
    }
}

impl Default for GateLengthPolicy {
    fn default() -> Self {
        Self::from_control(0.25)
    }
}

/// Shape a uniform draw `u` in `[0, 1)` into the U-shaped distribution for
/// `bias` in `[0, 1]`.
#[inline]
pub fn favour_extremes(u: f32, bias: f32) -> f32 {
    let p = 1.0 - (1.0 - MIN_EXPONENT) * bias.clamp(0.0, 1.0);
    let y = (2.0 * u - 1.0).clamp(-1.0, 1.0);
    let shaped = y.abs().powf(p).copysign(y);
    (0.5 + 0.5 * shaped).clamp(0.0, 1.0)
}
