//! # Tide Predictor Application Entry Point
//!
//! This binary crate is the presentation layer over the prediction core:
//! it loads the station configuration, builds the tidal model once, and
//! prints forecasts, daily extremes and validation reports. All numeric
//! work happens in the library; this file only shapes output.

// Test modules
#[cfg(test)]
mod tests;

// Re-export library types for internal use
pub use tide_predictor_lib::{config::Config, LevelSeries, TidalModel};

// Application dependencies
use anyhow::Context;
use chrono::{TimeZone, Timelike, Utc};
use std::env;
use tide_predictor_lib::{
    extrema::find_extrema,
    harmonics::level_at,
    renderer::draw_ascii,
    series::{default_cadence_minutes, generate, Direction},
    validation::validate,
    ExtremaKind,
};

/// Observed hourly water levels (cm) at Hon Dau for 2026-02-01, starting at
/// 00:00 UTC. The reference dataset the calibration was graded against;
/// note the negative reading at 16:00, which is why the datum is treated as
/// an opaque offset.
pub const HON_DAU_OBSERVED_2026_02_01: [f64; 24] = [
    302.0, 343.0, 374.0, 392.0, 395.0, 385.0, 360.0, 325.0, 284.0, 238.0, 190.0, 142.0, 97.0,
    60.0, 30.0, 9.0, -4.0, 0.0, 4.0, 25.0, 57.0, 100.0, 150.0, 202.0,
];

/// Start of the day the reference observations cover.
fn validation_day_start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0)
        .single()
        .expect("validation date constant should be a valid instant")
}

/// Parse `--days N` from the argument list; defaults to 3.
/// Negative values request a backward (past) window.
fn parse_days(args: &[String]) -> i32 {
    args.iter()
        .position(|a| a == "--days")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse::<i32>().ok())
        .unwrap_or(3)
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let config = Config::load();
    let model = config
        .build_model()
        .context("building tidal model from configuration")?;

    if args.iter().any(|a| a == "--current") {
        let now = Utc::now();
        let level = level_at(&model, now);
        println!("Station: {} ({})", config.station.name, config.station.datum);
        println!("{}  {:.2} cm", now.format("%Y-%m-%d %H:%M:%S UTC"), level);
        return Ok(());
    }

    if args.iter().any(|a| a == "--validate") {
        run_validation(&config, &model)?;
        return Ok(());
    }

    if args.iter().any(|a| a == "--extremes") {
        run_daily_extremes(&config, &model)?;
        return Ok(());
    }

    run_forecast(&config, &model, &args)
}

/// Forecast mode: chart the next (or previous) N days.
fn run_forecast(config: &Config, model: &TidalModel, args: &[String]) -> anyhow::Result<()> {
    let days = parse_days(args);

    // Clamp the window to a sane maximum; the core would happily compute
    // further out, but accuracy degrades and point counts grow
    let abs_days = days.unsigned_abs().clamp(1, 365);
    let direction = if days < 0 {
        Direction::Backward
    } else {
        Direction::Forward
    };

    let cadence = default_cadence_minutes(abs_days);
    let points_per_day = (24 * 60 / cadence) as usize;
    let num_points = abs_days as usize * points_per_day;

    let now = Utc::now();
    let series = generate(model, now, cadence, num_points, direction)
        .context("generating forecast series")?;

    // Roughly 5 hours of real time between same-kind events
    let min_separation = (5 * 60 / cadence) as usize;
    let events = find_extrema(&series, min_separation);

    if args.iter().any(|a| a == "--json") {
        let payload = serde_json::json!({
            "station": config.station.name,
            "datum": config.station.datum,
            "days": days,
            "cadence_minutes": cadence,
            "series": series,
            "extrema": events,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "Tide forecast for {} — {} day(s), {}-minute cadence",
        config.station.name, days, cadence
    );
    println!("Datum: {}\n", config.station.datum);
    draw_ascii(&series, &events);

    println!("\nTide events:");
    for event in &events {
        let tag = match event.kind {
            ExtremaKind::High => "HIGH",
            ExtremaKind::Low => "LOW ",
        };
        println!(
            "  {}  {}  {:7.2} cm",
            tag,
            event.timestamp.format("%Y-%m-%d %H:%M UTC"),
            event.level
        );
    }
    Ok(())
}

/// Daily-extremes mode: today's highs and lows at 5-minute resolution.
fn run_daily_extremes(config: &Config, model: &TidalModel) -> anyhow::Result<()> {
    let now = Utc::now();
    let start_of_day = now
        .with_hour(0)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .context("truncating current time to midnight")?;

    // 288 five-minute samples cover the day; 60 samples ≈ 5 hours apart
    let series = generate(model, start_of_day, 5, 288, Direction::Forward)
        .context("generating daily series")?;
    let events = find_extrema(&series, 60);

    println!(
        "High and low tides at {} for {}",
        config.station.name,
        start_of_day.format("%Y-%m-%d")
    );
    for event in &events {
        let tag = match event.kind {
            ExtremaKind::High => "high water",
            ExtremaKind::Low => "low water ",
        };
        println!(
            "  {}  {}  {:7.2} cm",
            tag,
            event.timestamp.format("%H:%M UTC"),
            event.level
        );
    }
    if events.is_empty() {
        println!("  (no interior tide turnings detected today)");
    }
    Ok(())
}

/// Validation mode: grade the model against the reference observations.
fn run_validation(config: &Config, model: &TidalModel) -> anyhow::Result<()> {
    let start = validation_day_start();
    let series = generate(model, start, 60, 24, Direction::Forward)
        .context("generating validation-day series")?;

    let predicted: Vec<f64> = series.samples.iter().map(|s| s.level).collect();
    let labels: Vec<String> = (0..24).map(|h| format!("{:02}:00", h)).collect();

    let report = validate(&predicted, &HON_DAU_OBSERVED_2026_02_01, &labels)
        .context("validating forecast against observations")?;

    println!(
        "Validation of {} forecast against observations for {}",
        config.station.name,
        start.format("%Y-%m-%d")
    );
    println!("  hour    observed   predicted     error");
    for c in &report.comparisons {
        println!(
            "  {}  {:9.2}  {:10.2}  {:8.2}",
            c.label, c.observed, c.predicted, c.error
        );
    }
    println!("\n  mean error:          {:8.2} cm", report.mean_error);
    println!("  mean absolute error: {:8.2} cm", report.mean_absolute_error);
    println!("  RMSE:                {:8.2} cm", report.root_mean_square_error);
    println!("  max absolute error:  {:8.2} cm", report.max_absolute_error);
    Ok(())
}
