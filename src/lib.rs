//! # Tide Predictor Core Library
//!
//! This library reconstructs sea-surface height at a single tidal observation
//! station from a fixed set of harmonic constituents, and derives high/low
//! tide events and forecast accuracy statistics from that reconstruction.
//!
//! ## Design Philosophy
//!
//! ### Pure, batched computation
//! - **No hidden state**: every operation is a pure function of a read-only
//!   [`TidalModel`] plus its request parameters; repeated calls with the same
//!   inputs return identical results
//! - **Batch evaluation**: the synthesizer takes a slice of instants and
//!   returns a vector of levels in one call, because consumers request series
//!   of hundreds to tens of thousands of points
//! - **Double precision throughout**: elapsed time spans years while
//!   constituent speeds sit near 2π/12h, so phase arguments are computed in
//!   `f64` end to end
//!
//! ### One model, many requests
//! The [`TidalModel`] is built once at process start from the station
//! configuration and then shared by reference into every call. Nothing in
//! this crate mutates it afterwards, so concurrent requests need no
//! synchronization.
//!
//! ### Data Flow
//! 1. **Configure**: load station constants → build [`TidalModel`]
//! 2. **Predict**: time window + cadence → [`series::generate`] → [`LevelSeries`]
//! 3. **Analyze**: [`extrema::find_extrema`] for high/low tides,
//!    [`validation::validate`] against observed readings
//!
//! ## Core Types
//!
//! The library exports the value types shared by all modules:
//! - [`Constituent`] / [`TidalModel`]: the calibrated station model
//! - [`LevelSample`] / [`LevelSeries`]: a predicted height series
//! - [`ExtremaEvent`]: a detected high or low tide
//! - [`TideError`]: the crate-wide error taxonomy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Module declarations
pub mod config;
pub mod constituents;
pub mod extrema;
pub mod harmonics;
pub mod renderer;
pub mod series;
pub mod validation;

/// Errors reported by the prediction core.
///
/// The core performs no recovery of its own: every failure is immediate and
/// the caller decides whether to retry with corrected parameters.
#[derive(Error, Debug)]
pub enum TideError {
    /// A request parameter that must be positive was zero (or otherwise
    /// unusable). The caller should clamp/validate before invoking the core,
    /// but the core rejects rather than silently producing an empty series.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Validator input arrays of differing length. Never truncated or padded.
    #[error("length mismatch: predicted={predicted}, observed={observed}, labels={labels}")]
    LengthMismatch {
        predicted: usize,
        observed: usize,
        labels: usize,
    },

    /// A constituent name with no entry in the standard speed table.
    /// Raised at model construction, never at prediction time.
    #[error("unknown tidal constituent: {0}")]
    UnknownConstituent(String),
}

/// One harmonic constituent of the tide at a specific site.
///
/// The angular speed is intrinsic to the constituent name and comes from the
/// standard astronomical table in [`constituents`]; amplitude and phase are
/// site-specific calibration constants. Immutable once the model is built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Constituent {
    /// Standard constituent name (e.g. "M2", the principal lunar
    /// semi-diurnal wave). Unique within a model.
    pub name: String,
    /// Angular speed in radians per second.
    pub angular_speed: f64,
    /// Site amplitude in the station's length unit (cm for Hon Dau).
    pub amplitude: f64,
    /// Site phase lag in radians, relative to the reference epoch.
    pub phase_offset: f64,
}

/// The calibrated harmonic model for one observation station.
///
/// Built exactly once at startup and treated as read-only process-wide
/// configuration: every core operation borrows it immutably, which makes
/// sharing across concurrent requests safe by construction and makes the
/// core trivially testable with synthetic single-constituent models.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TidalModel {
    /// Constant datum offset added to the oscillating superposition.
    /// Opaque: which physical datum it corresponds to is site metadata, and
    /// negative predicted levels are legal.
    pub mean_level: f64,
    /// Fixed instant from which elapsed time is measured for phase
    /// computation.
    pub reference_epoch: DateTime<Utc>,
    /// Constituents in calibration-table order.
    pub constituents: Vec<Constituent>,
}

/// A single predicted water level at a specific instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSample {
    /// Instant the level applies to (UTC).
    pub timestamp: DateTime<Utc>,
    /// Predicted height above the station datum, rounded to 2 decimal
    /// places at the series boundary.
    pub level: f64,
}

/// An ordered sequence of predicted levels.
///
/// Timestamps are strictly increasing when produced by
/// [`series::generate`], regardless of the requested window direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSeries {
    pub samples: Vec<LevelSample>,
}

/// Whether an extrema event is a high or a low tide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremaKind {
    High,
    Low,
}

/// A detected high- or low-tide event in a level series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtremaEvent {
    pub timestamp: DateTime<Utc>,
    pub level: f64,
    pub kind: ExtremaKind,
}
