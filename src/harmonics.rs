//! # Harmonic Synthesizer
//!
//! Reconstructs the sea level at arbitrary instants by superposition of the
//! model's harmonic constituents:
//!
//! ```text
//! level(t) = mean_level + Σ amplitude_i · cos(angular_speed_i · Δt − phase_offset_i)
//! ```
//!
//! where `Δt` is the signed elapsed time in seconds between the model's
//! reference epoch and `t`. Instants before the epoch give negative `Δt`;
//! instants far outside the calibration window are a degraded-accuracy
//! condition, never an error.
//!
//! ## Numeric notes
//!
//! Phase arguments are evaluated in `f64`: a multi-year `Δt` at a speed near
//! 2π/12h puts the argument in the thousands of radians, where single
//! precision would lose the fractional cycle that carries all the
//! information. Cosine is periodic, so no explicit wrapping is applied.
//!
//! Levels are rounded to 2 decimal places only where they leave the core
//! (series generation, [`level_at`]); the superposition itself is full
//! precision so that callers composing on raw [`synthesize`] output see no
//! quantization.

use crate::TidalModel;
use chrono::{DateTime, Utc};

/// Compute water levels for a batch of instants.
///
/// One call produces all `instants.len()` levels; downstream consumers
/// request series of hundreds to tens of thousands of points, so per-instant
/// call overhead is kept out of the loop. Output order matches input order.
///
/// Deterministic: no clock access, no state beyond the borrowed model.
pub fn synthesize(model: &TidalModel, instants: &[DateTime<Utc>]) -> Vec<f64> {
    let mut levels = Vec::with_capacity(instants.len());

    for instant in instants {
        let dt_seconds = elapsed_seconds(model, *instant);
        let eta: f64 = model
            .constituents
            .iter()
            .map(|c| c.amplitude * (c.angular_speed * dt_seconds - c.phase_offset).cos())
            .sum();
        levels.push(model.mean_level + eta);
    }

    levels
}

/// Predicted level at a single instant, rounded at the core boundary.
///
/// Convenience for presentation callers ("current level"); series consumers
/// should use [`crate::series::generate`] instead.
pub fn level_at(model: &TidalModel, instant: DateTime<Utc>) -> f64 {
    round_level(synthesize(model, &[instant])[0])
}

/// Round a level to 2 decimal places of the station's length unit.
///
/// Applied where values leave the core; never inside the superposition.
pub fn round_level(level: f64) -> f64 {
    (level * 100.0).round() / 100.0
}

/// Signed seconds from the model's reference epoch to `instant`.
fn elapsed_seconds(model: &TidalModel, instant: DateTime<Utc>) -> f64 {
    (instant - model.reference_epoch).num_milliseconds() as f64 / 1000.0
}
