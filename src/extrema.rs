//! # Extrema Detector
//!
//! Scans a sampled level series for local maxima (high tide) and minima
//! (low tide), enforcing a minimum index separation between reported events
//! of the same kind.
//!
//! ## Detection rules
//!
//! - A candidate high is a sample strictly greater than both neighbours.
//!   A flat plateau at the top counts once, attributed to its first index.
//!   Lows are the mirror image.
//! - The first and last samples are never candidates: the two-neighbour
//!   rule cannot be evaluated there, and a monotonic run-in to the window
//!   edge is not a tide turning.
//! - Separation is enforced greedily by magnitude, not by scan order: when
//!   two candidates fall inside one minimum window, the genuinely higher
//!   high (or lower low) survives.
//!
//! The minimum separation is a caller parameter. A semi-diurnal station
//! wants roughly 5 hours of real time between same-kind events; how many
//! samples that is depends on the cadence the series was generated at, so
//! the detector stays cadence-agnostic.

use crate::{ExtremaEvent, ExtremaKind, LevelSeries};

/// Find high- and low-tide events in `series`.
///
/// `min_separation_samples` is the smallest allowed index distance between
/// two reported events of the same kind; `0` disables suppression. Events
/// are returned sorted by timestamp ascending.
///
/// Series shorter than 3 samples have no interior points and yield no
/// events.
pub fn find_extrema(series: &LevelSeries, min_separation_samples: usize) -> Vec<ExtremaEvent> {
    let levels: Vec<f64> = series.samples.iter().map(|s| s.level).collect();

    let highs = suppress(
        &levels,
        candidates(&levels, ExtremaKind::High),
        min_separation_samples,
        ExtremaKind::High,
    );
    let lows = suppress(
        &levels,
        candidates(&levels, ExtremaKind::Low),
        min_separation_samples,
        ExtremaKind::Low,
    );

    let mut events: Vec<ExtremaEvent> = highs
        .into_iter()
        .map(|i| (i, ExtremaKind::High))
        .chain(lows.into_iter().map(|i| (i, ExtremaKind::Low)))
        .map(|(i, kind)| ExtremaEvent {
            timestamp: series.samples[i].timestamp,
            level: series.samples[i].level,
            kind,
        })
        .collect();

    events.sort_by_key(|e| e.timestamp);
    events
}

/// Interior local-extrema candidates of one kind, plateau-deduplicated.
///
/// Walks the series once: on an up-edge (for highs) the run of equal levels
/// that follows is skipped as a unit, and the run's first index becomes a
/// candidate only if the far side drops back down. A plateau that extends
/// to the series edge never qualifies.
fn candidates(levels: &[f64], kind: ExtremaKind) -> Vec<usize> {
    let n = levels.len();
    let mut found = Vec::new();
    if n < 3 {
        return found;
    }

    let ahead = |a: f64, b: f64| match kind {
        ExtremaKind::High => a > b,
        ExtremaKind::Low => a < b,
    };

    let mut i = 1;
    while i < n - 1 {
        if ahead(levels[i], levels[i - 1]) {
            // Extend across any flat top/bottom starting here.
            let mut j = i;
            while j + 1 < n && levels[j + 1] == levels[i] {
                j += 1;
            }
            if j + 1 < n && ahead(levels[i], levels[j + 1]) {
                found.push(i);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }

    found
}

/// Greedy minimum-separation suppression by magnitude.
///
/// Candidates are visited best-first (highest level for highs, lowest for
/// lows; ties go to the earlier index) and accepted only if far enough from
/// every already-accepted index. Returned indices are re-sorted ascending.
fn suppress(
    levels: &[f64],
    mut candidates: Vec<usize>,
    min_separation: usize,
    kind: ExtremaKind,
) -> Vec<usize> {
    candidates.sort_by(|&a, &b| {
        let by_level = match kind {
            ExtremaKind::High => levels[b].total_cmp(&levels[a]),
            ExtremaKind::Low => levels[a].total_cmp(&levels[b]),
        };
        by_level.then(a.cmp(&b))
    });

    let mut accepted: Vec<usize> = Vec::new();
    for candidate in candidates {
        if accepted
            .iter()
            .all(|&kept| kept.abs_diff(candidate) >= min_separation)
        {
            accepted.push(candidate);
        }
    }

    accepted.sort_unstable();
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Constituent, LevelSample, TidalModel};
    use crate::series::{generate, Direction};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    /// Build a series directly from raw levels, one minute apart.
    fn series_from(levels: &[f64]) -> LevelSeries {
        let start = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        LevelSeries {
            samples: levels
                .iter()
                .enumerate()
                .map(|(i, &level)| LevelSample {
                    timestamp: start + Duration::minutes(i as i64),
                    level,
                })
                .collect(),
        }
    }

    fn indices_of(series: &LevelSeries, events: &[ExtremaEvent], kind: ExtremaKind) -> Vec<usize> {
        events
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| {
                series
                    .samples
                    .iter()
                    .position(|s| s.timestamp == e.timestamp)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn simple_peak_and_trough() {
        let series = series_from(&[1.0, 3.0, 1.0, -2.0, 1.0]);
        let events = find_extrema(&series, 0);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, ExtremaKind::High);
        assert_eq!(events[0].level, 3.0);
        assert_eq!(events[1].kind, ExtremaKind::Low);
        assert_eq!(events[1].level, -2.0);
    }

    #[test]
    fn edges_are_never_events() {
        // Monotonic rise: the last sample is the largest but not a local
        // maximum under the two-neighbour rule.
        let rising = series_from(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(find_extrema(&rising, 0).is_empty());

        let falling = series_from(&[5.0, 4.0, 3.0, 2.0, 1.0]);
        assert!(find_extrema(&falling, 0).is_empty());
    }

    #[test]
    fn plateau_counts_once_at_first_index() {
        let series = series_from(&[1.0, 4.0, 4.0, 4.0, 1.0, 0.5, 2.0]);
        let events = find_extrema(&series, 0);
        let highs = indices_of(&series, &events, ExtremaKind::High);
        assert_eq!(highs, vec![1], "flat top must report its first index only");
        let lows = indices_of(&series, &events, ExtremaKind::Low);
        assert_eq!(lows, vec![5]);
    }

    #[test]
    fn plateau_reaching_the_edge_is_not_an_event() {
        let series = series_from(&[1.0, 4.0, 4.0, 4.0]);
        assert!(find_extrema(&series, 0).is_empty());
    }

    #[test]
    fn suppression_keeps_the_higher_peak_not_the_first() {
        // Two peaks 2 samples apart; the second is taller. Scan-order
        // suppression would keep index 2, magnitude-order must keep 4.
        let series = series_from(&[0.0, 1.0, 3.0, 2.5, 5.0, 1.0, 0.0]);
        let events = find_extrema(&series, 3);
        let highs = indices_of(&series, &events, ExtremaKind::High);
        assert_eq!(highs, vec![4], "the taller peak wins inside the window");
    }

    #[test]
    fn min_separation_is_enforced_per_kind() {
        let series = series_from(&[0.0, 2.0, 0.5, 3.0, 0.5, 2.5, 0.0, 1.5, 0.0]);
        let min_sep = 4;
        let events = find_extrema(&series, min_sep);

        for kind in [ExtremaKind::High, ExtremaKind::Low] {
            let indices = indices_of(&series, &events, kind);
            for pair in indices.windows(2) {
                assert!(
                    pair[1] - pair[0] >= min_sep,
                    "{:?} events at {} and {} violate separation {}",
                    kind,
                    pair[0],
                    pair[1],
                    min_sep
                );
            }
        }
    }

    #[test]
    fn events_come_back_in_timestamp_order() {
        let series = series_from(&[0.0, 5.0, 0.0, 4.0, 0.0, 6.0, 0.0]);
        let events = find_extrema(&series, 0);
        for pair in events.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[test]
    fn short_series_yield_nothing() {
        assert!(find_extrema(&series_from(&[]), 0).is_empty());
        assert!(find_extrema(&series_from(&[1.0]), 0).is_empty());
        assert!(find_extrema(&series_from(&[1.0, 2.0]), 0).is_empty());
    }

    /// 12-hour single-constituent wave, 5-minute cadence, 24 hours: exactly
    /// two highs and two lows, each within one sample of the analytic
    /// peak/trough instants.
    #[test]
    fn synthetic_semidiurnal_day_has_two_highs_and_two_lows() {
        let start: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let model = TidalModel {
            mean_level: 200.0,
            reference_epoch: start,
            constituents: vec![Constituent {
                name: "M2".to_string(),
                angular_speed: 2.0 * std::f64::consts::PI / (12.0 * 3600.0),
                // phase π/2 puts the first crest 3 h into the window,
                // away from the excluded edges
                amplitude: 100.0,
                phase_offset: std::f64::consts::FRAC_PI_2,
            }],
        };

        let series = generate(&model, start, 5, 288, Direction::Forward).unwrap();
        // 60 samples at 5-minute cadence ≈ the 5-hour policy separation
        let events = find_extrema(&series, 60);

        let highs = indices_of(&series, &events, ExtremaKind::High);
        let lows = indices_of(&series, &events, ExtremaKind::Low);
        assert_eq!(highs.len(), 2, "expected 2 highs, got {:?}", highs);
        assert_eq!(lows.len(), 2, "expected 2 lows, got {:?}", lows);

        // Analytic crests at +3 h and +15 h (indices 36, 180), troughs at
        // +9 h and +21 h (indices 108, 252).
        for (found, expected) in highs.iter().zip([36usize, 180]) {
            assert!(
                found.abs_diff(expected) <= 1,
                "high at index {} not within one sample of {}",
                found,
                expected
            );
        }
        for (found, expected) in lows.iter().zip([108usize, 252]) {
            assert!(
                found.abs_diff(expected) <= 1,
                "low at index {} not within one sample of {}",
                found,
                expected
            );
        }
    }
}
