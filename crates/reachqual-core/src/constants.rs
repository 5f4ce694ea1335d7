//! Numerical thresholds and sentinels shared across the engine.

/// Sentinel written where a concentration cannot be defined, e.g. sorbed
/// concentration on a sediment class that has no sediment, or dissolved
/// concentration in a reach that went dry.
pub const UNDEFINED: f64 = -1.0e30;

/// Returns `true` if `value` is the [`UNDEFINED`] sentinel.
pub fn is_undefined(value: f64) -> bool {
    value <= UNDEFINED * 0.1
}

/// Average depth (ft) at or below which decay, volatilization, photolysis
/// and sorption exchange are not simulated for the step.
pub const MIN_REACTIVE_DEPTH_FT: f64 = 0.17;

/// Dissolved concentration below which dissolved decay is skipped.
pub const DISSOLVED_NOISE_FLOOR: f64 = 1.0e-25;

/// Sorbed concentration below which sorbed decay is skipped.
pub const SORBED_NOISE_FLOOR: f64 = 1.0e-30;

/// Reference water temperature (°C) for Arrhenius-style rate corrections.
pub const REFERENCE_TEMPERATURE_C: f64 = 20.0;

/// Number of wavelength bands in the photolysis light model.
pub const LIGHT_BANDS: usize = 18;
