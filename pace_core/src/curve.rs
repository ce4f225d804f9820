//! Weight curve for exponential distributions.
//!
//! Maps a day's position among the effective days to a load multiplier. The
//! curve is `position^1.5` (ease-in) scaled into `[1 - 0.7i, 1 + 0.7i]`, so
//! early days are light and the load grows toward the deadline.

/// How far the multiplier may swing from 1.0 at full intensity
const SPREAD: f64 = 0.7;

/// Exponent of the ease-in curve
const EASE_EXPONENT: f64 = 1.5;

/// Clamp an intensity into [0, 1]; NaN becomes 0 (flat)
pub fn clamp_intensity(intensity: f64) -> f64 {
    if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    }
}

/// Load multiplier for the effective day at `day_index` (0-based) out of
/// `total_effective_days`.
///
/// Returns exactly `1.0` when there is at most one day or the intensity is 0.
/// An index past the end is treated as the last day.
pub fn weight(day_index: usize, total_effective_days: usize, intensity: f64) -> f64 {
    if total_effective_days <= 1 {
        return 1.0;
    }

    let intensity = clamp_intensity(intensity);
    let last = total_effective_days - 1;
    let position = day_index.min(last) as f64 / last as f64;

    let min_factor = 1.0 - SPREAD * intensity;
    let max_factor = 1.0 + SPREAD * intensity;
    let curve = position.powf(EASE_EXPONENT);

    min_factor + (max_factor - min_factor) * curve
}
