/*
Density Mapping
===============

A single knob (0.0 to 1.0) has to cover everything from one pulse every
twenty seconds to a near-continuous buzz. A linear mapping wastes almost
all of the knob travel on rates that sound the same, so the knob is split
in two halves, each with its own curve.

Vocabulary
----------

  density     Mean number of pulse starts per second (Hz).

  control     The raw knob position, 0.0 to 1.0.

  segment     One half of the knob travel. Each segment is rescaled to
              0..1, bent by an exponent, then rescaled to its output range.


The Two Segments
----------------

    control     0.0 ─────────── 0.5 ─────────── 1.0
    density    0.05 Hz        1.0 Hz          200 Hz
                 (ambient, x^0.7)   (dense, x^4.0)

  Low half   [0.0, 0.5) → [0.05, 1.0] Hz, exponent 0.7
             Concave curve: rates climb quickly off the bottom so the
             sparse region is not all "nothing happens".

  High half  [0.5, 1.0] → [1.0, 200.0] Hz, exponent 4.0
             Steep curve: most of the travel stays at moderate rates and
             only the last stretch reaches audio-like densities.

Both halves produce exactly 1.0 Hz at control = 0.5, so the curve is
continuous across the split.


Voice Multiplier
----------------

Each voice scales the master rate by its own multiplier, linearly mapped
from 0..1 to 0.1..10.0 (one tenth to ten times the master rate):

    voice_density = map_master_density(master) * map_voice_multiplier(mult)
*/

/// Lowest master density, in Hz.
pub const MIN_DENSITY_HZ: f32 = 0.05;
/// Master density at the split point, in Hz.
pub const SPLIT_DENSITY_HZ: f32 = 1.0;
/// Highest master density, in Hz.
pub const MAX_DENSITY_HZ: f32 = 200.0;

/// Lowest per-voice multiplier.
pub const MIN_MULTIPLIER: f32 = 0.1;
/// Highest per-voice multiplier.
pub const MAX_MULTIPLIER: f32 = 10.0;

const SPLIT: f32 = 0.5;
const LOW_EXPONENT: f32 = 0.7;
const HIGH_EXPONENT: f32 = 4.0;

/// Linearly map `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// No clamping is applied; callers clamp their inputs first.
#[inline]
pub fn rescale(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (value - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Clamp a knob value to `[0, 1]`, treating NaN as 0.
#[inline]
pub fn sanitize_control(control: f32) -> f32 {
    if control.is_nan() {
        0.0
    } else {
        control.clamp(0.0, 1.0)
    }
}

/// Map the master density knob to an event rate in Hz.
///
/// # Example
/// ```
/// use randclock::dsp::density::map_master_density;
/// assert!((map_master_density(0.5) - 1.0).abs() < 1e-6);
/// assert!((map_master_density(1.0) - 200.0).abs() < 1e-3);
/// ```
pub fn map_master_density(control: f32) -> f32 {
    let control = sanitize_control(control);

    let hz = if control < SPLIT {
        let x = rescale(control, 0.0, SPLIT, 0.0, 1.0).powf(LOW_EXPONENT);
        rescale(x, 0.0, 1.0, MIN_DENSITY_HZ, SPLIT_DENSITY_HZ)
    } else {
        let x = rescale(control, SPLIT, 1.0, 0.0, 1.0).powf(HIGH_EXPONENT);
        rescale(x, 0.0, 1.0, SPLIT_DENSITY_HZ, MAX_DENSITY_HZ)
    };

    hz.clamp(MIN_DENSITY_HZ, MAX_DENSITY_HZ)
}

/// Map a voice multiplier knob to a rate multiplier in `[0.1, 10.0]`.
#[inline]
pub fn map_voice_multiplier(control: f32) -> f32 {
    rescale(
        sanitize_control(control),
        0.0,
        1.0,
        MIN_MULTIPLIER,
        MAX_MULTIPLIER,
    )
}

/// Knob position that yields a multiplier of exactly `multiplier`.
///
/// Used for defaults: `multiplier_control_for(1.0)` is the "follow master"
/// position.
#[inline]
pub fn multiplier_control_for(multiplier: f32) -> f32 {
    rescale(
        multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER),
        MIN_MULTIPLIER,
        MAX_MULTIPLIER,
        0.0,
        1.0,
    )
}

/// Effective density for one voice: master rate times the voice multiplier.
#[inline]
pub fn voice_density(master_control: f32, multiplier_control: f32) -> f32 {
    map_master_density(master_control) * map_voice_multiplier(multiplier_control)
}
