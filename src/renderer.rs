//! # ASCII Series Rendering
//!
//! Development-mode visualization: plots a predicted level series as a
//! character grid on stdout, with high/low tide events marked. This is
//! presentation glue over the core's plain numeric output; it performs no
//! computation of its own.

use crate::{ExtremaEvent, ExtremaKind, LevelSeries};

/// Chart height in character rows.
const ROWS: usize = 20;
/// Space reserved for Y-axis labels.
const Y_AXIS_WIDTH: usize = 8;

/// Render `series` as an ASCII chart, marking `extrema` events with `H`/`L`.
///
/// Extrema are matched to columns by timestamp; events outside the series
/// are ignored. A flat series (all levels equal) is drawn on a single row.
pub fn draw_ascii(series: &LevelSeries, extrema: &[ExtremaEvent]) {
    if series.samples.is_empty() {
        println!("(empty series)");
        return;
    }

    let sample_count = series.samples.len();
    let (min_level, max_level) = series
        .samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), sample| {
            (min.min(sample.level), max.max(sample.level))
        });
    let range = max_level - min_level;

    let level_to_row = |level: f64| {
        if range == 0.0 {
            ROWS / 2
        } else {
            let normalized = (level - min_level) / range;
            ((1.0 - normalized) * (ROWS as f64 - 1.0)).round() as usize
        }
    };

    let mut grid = vec![vec![' '; sample_count + Y_AXIS_WIDTH]; ROWS];

    // Y-axis labels: step of 1 cm for small ranges, coarser for large ones
    let level_step = if range > 200.0 {
        50.0
    } else if range > 40.0 {
        10.0
    } else {
        1.0
    };
    let mut current_level = (min_level / level_step).floor() * level_step;
    while current_level <= max_level {
        let row = level_to_row(current_level);
        if row < ROWS {
            let label = format!("{:.0}", current_level);
            let padded = format!("{:>width$}", label, width = Y_AXIS_WIDTH - 2);
            for (i, ch) in padded.chars().enumerate() {
                if i < Y_AXIS_WIDTH - 2 {
                    grid[row][i] = ch;
                }
            }
            grid[row][Y_AXIS_WIDTH - 1] = '│';
        }
        current_level += level_step;
    }

    // Plot the curve, then overlay extrema markers
    for (column, sample) in series.samples.iter().enumerate() {
        let row = level_to_row(sample.level);
        grid[row][column + Y_AXIS_WIDTH] = '•';
    }
    for event in extrema {
        if let Some(column) = series
            .samples
            .iter()
            .position(|s| s.timestamp == event.timestamp)
        {
            let row = level_to_row(event.level);
            grid[row][column + Y_AXIS_WIDTH] = match event.kind {
                ExtremaKind::High => 'H',
                ExtremaKind::Low => 'L',
            };
        }
    }

    for row in grid {
        println!("{}", row.into_iter().collect::<String>());
    }

    // Time axis: tick marks plus the window's endpoints
    let padding = " ".repeat(Y_AXIS_WIDTH);
    let ticks: String = (0..sample_count)
        .map(|i| if i % 12 == 0 { '|' } else { ' ' })
        .collect();
    println!("{}{}", padding, ticks);

    let first = series.samples[0].timestamp.format("%m-%d %H:%M");
    let last = series.samples[sample_count - 1]
        .timestamp
        .format("%m-%d %H:%M");
    let left = format!("{}", first);
    let right = format!("{}", last);
    let gap = (sample_count).saturating_sub(left.len() + right.len());
    println!("{}{}{}{}", padding, left, " ".repeat(gap), right);
}
