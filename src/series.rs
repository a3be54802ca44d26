//! # Time Series Generator
//!
//! Produces an ordered level series over a requested window: an evenly
//! spaced grid of instants at a caller-chosen cadence, forward or backward
//! from a center instant, evaluated through the harmonic synthesizer in a
//! single batched call.
//!
//! The generator is cadence-agnostic. The coarsening of cadence with window
//! length (fine grids for short windows, coarse grids for long ones, to
//! bound point count) is caller policy; [`default_cadence_minutes`] captures
//! the policy the Hon Dau forecast service ships with.

use crate::harmonics::{round_level, synthesize};
use crate::{LevelSample, LevelSeries, TidalModel, TideError};
use chrono::{DateTime, Duration, Utc};

/// Which side of the center instant the window covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Timestamps `center + i·cadence`, i = 0..num_points.
    Forward,
    /// Timestamps `center − i·cadence`, reordered chronologically before
    /// being returned.
    Backward,
}

/// Generate a level series of `num_points` samples spaced `cadence_minutes`
/// apart, starting at `center` and extending in `direction`.
///
/// The returned series is always in strictly increasing timestamp order;
/// callers never receive reverse-chronological data. Levels are rounded to
/// 2 decimal places here, at the core boundary.
///
/// Rejects a zero cadence or point count with
/// [`TideError::InvalidParameter`] rather than producing an empty or
/// degenerate series.
pub fn generate(
    model: &TidalModel,
    center: DateTime<Utc>,
    cadence_minutes: u32,
    num_points: usize,
    direction: Direction,
) -> Result<LevelSeries, TideError> {
    if cadence_minutes == 0 {
        return Err(TideError::InvalidParameter(
            "cadence_minutes must be positive".to_string(),
        ));
    }
    if num_points == 0 {
        return Err(TideError::InvalidParameter(
            "num_points must be positive".to_string(),
        ));
    }

    let step = Duration::minutes(i64::from(cadence_minutes));
    let mut timestamps: Vec<DateTime<Utc>> = (0..num_points)
        .map(|i| match direction {
            Direction::Forward => center + step * i as i32,
            Direction::Backward => center - step * i as i32,
        })
        .collect();

    if direction == Direction::Backward {
        timestamps.reverse();
    }

    // One batched evaluation for the whole grid.
    let levels = synthesize(model, &timestamps);

    let samples = timestamps
        .into_iter()
        .zip(levels)
        .map(|(timestamp, level)| LevelSample {
            timestamp,
            level: round_level(level),
        })
        .collect();

    Ok(LevelSeries { samples })
}

/// Default cadence for a forecast window of `window_days` days.
///
/// Keeps point counts bounded as windows grow: 15-minute grid up to 10
/// days, 30-minute up to 20 days, hourly beyond. Callers are free to pick
/// any other cadence; the generator does not care.
pub fn default_cadence_minutes(window_days: u32) -> u32 {
    if window_days <= 10 {
        15
    } else if window_days <= 20 {
        30
    } else {
        60
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Constituent;
    use chrono::TimeZone;

    fn test_model() -> TidalModel {
        TidalModel {
            mean_level: 214.0,
            reference_epoch: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
            constituents: vec![Constituent {
                name: "M2".to_string(),
                angular_speed: 2.0 * std::f64::consts::PI / (12.42 * 3600.0),
                amplitude: 100.0,
                phase_offset: 0.9,
            }],
        }
    }

    fn center() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn forward_series_is_strictly_increasing() {
        let series = generate(&test_model(), center(), 15, 96, Direction::Forward).unwrap();
        assert_eq!(series.samples.len(), 96);
        assert_eq!(series.samples[0].timestamp, center());
        for window in series.samples.windows(2) {
            assert!(window[0].timestamp < window[1].timestamp);
            assert_eq!(
                window[1].timestamp - window[0].timestamp,
                Duration::minutes(15)
            );
        }
    }

    #[test]
    fn backward_series_is_reordered_chronologically() {
        let series = generate(&test_model(), center(), 30, 48, Direction::Backward).unwrap();
        assert_eq!(series.samples.len(), 48);

        // Oldest sample first, center instant last
        assert_eq!(
            series.samples[0].timestamp,
            center() - Duration::minutes(30 * 47)
        );
        assert_eq!(series.samples[47].timestamp, center());
        for window in series.samples.windows(2) {
            assert!(
                window[0].timestamp < window[1].timestamp,
                "backward windows must still come out chronological"
            );
        }
    }

    #[test]
    fn backward_levels_match_forward_evaluation() {
        // The same instant must synthesize to the same level regardless of
        // which direction the window was requested in.
        let model = test_model();
        let backward = generate(&model, center(), 60, 24, Direction::Backward).unwrap();
        let start = center() - Duration::hours(23);
        let forward = generate(&model, start, 60, 24, Direction::Forward).unwrap();
        assert_eq!(backward, forward);
    }

    #[test]
    fn repeated_generation_is_bit_identical() {
        let model = test_model();
        let first = generate(&model, center(), 5, 288, Direction::Forward).unwrap();
        let second = generate(&model, center(), 5, 288, Direction::Forward).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn levels_are_rounded_at_the_boundary() {
        let series = generate(&test_model(), center(), 7, 50, Direction::Forward).unwrap();
        for sample in &series.samples {
            assert_eq!(
                sample.level,
                round_level(sample.level),
                "series level {} should carry at most 2 decimals",
                sample.level
            );
        }
    }

    #[test]
    fn zero_cadence_is_rejected() {
        let err = generate(&test_model(), center(), 0, 10, Direction::Forward).unwrap_err();
        assert!(matches!(err, TideError::InvalidParameter(_)));
    }

    #[test]
    fn zero_points_is_rejected() {
        let err = generate(&test_model(), center(), 15, 0, Direction::Backward).unwrap_err();
        assert!(matches!(err, TideError::InvalidParameter(_)));
    }

    #[test]
    fn cadence_policy_coarsens_with_window() {
        assert_eq!(default_cadence_minutes(1), 15);
        assert_eq!(default_cadence_minutes(10), 15);
        assert_eq!(default_cadence_minutes(11), 30);
        assert_eq!(default_cadence_minutes(20), 30);
        assert_eq!(default_cadence_minutes(21), 60);
        assert_eq!(default_cadence_minutes(365), 60);
    }
}
