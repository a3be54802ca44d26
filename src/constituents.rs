//! Standard tidal-constituent angular speeds.
//!
//! Centralises the physical constant data the prediction core depends on:
//! the mapping from a constituent's standard name to its astronomical
//! angular speed. Speeds are tabulated in degrees per hour, the form used
//! by harmonic-constant references (Schureman, NOAA tide tables), and
//! converted to radians per second at lookup.
//!
//! These values are properties of the orbital mechanics of the Earth, Moon
//! and Sun. They are the same at every station; only amplitudes and phases
//! are site-specific.

/// Angular speeds in degrees per solar hour, keyed by standard name.
///
/// Covers the constituent set used by the Hon Dau calibration: the four
/// principal semi-diurnal waves (M2, S2, N2, K2), the four principal
/// diurnal waves (K1, O1, P1, Q1), three shallow-water overtides
/// (M4, MS4, M6) and the two long-period solar annual/semi-annual
/// waves (Sa, Ssa).
const SPEEDS_DEG_PER_HOUR: &[(&str, f64)] = &[
    ("M2", 28.984_104_2),  // principal lunar semi-diurnal
    ("S2", 30.000_000_0),  // principal solar semi-diurnal
    ("N2", 28.439_729_5),  // larger lunar elliptic semi-diurnal
    ("K2", 30.082_137_3),  // luni-solar semi-diurnal
    ("K1", 15.041_068_6),  // luni-solar diurnal
    ("O1", 13.943_035_6),  // principal lunar diurnal
    ("P1", 14.958_931_4),  // principal solar diurnal
    ("Q1", 13.398_660_9),  // larger lunar elliptic diurnal
    ("M4", 57.968_208_4),  // first overtide of M2
    ("MS4", 58.984_104_2), // compound M2 + S2
    ("M6", 86.952_312_7),  // second overtide of M2
    ("Sa", 0.041_068_6),   // solar annual
    ("Ssa", 0.082_137_3),  // solar semi-annual
];

/// Seconds per hour, for speed unit conversion.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Look up the standard angular speed of a constituent in radians/second.
///
/// Returns `None` for names outside the embedded table; model construction
/// surfaces that as [`crate::TideError::UnknownConstituent`] rather than
/// guessing a frequency.
pub fn angular_speed(name: &str) -> Option<f64> {
    SPEEDS_DEG_PER_HOUR
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, deg_per_hour)| deg_per_hour.to_radians() / SECONDS_PER_HOUR)
}

/// Names of all constituents in the embedded table, in table order.
pub fn known_names() -> impl Iterator<Item = &'static str> {
    SPEEDS_DEG_PER_HOUR.iter().map(|(n, _)| *n)
}
