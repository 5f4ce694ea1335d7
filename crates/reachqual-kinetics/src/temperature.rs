//! Temperature correction shared by every temperature-dependent rate.

use reachqual_core::constants::REFERENCE_TEMPERATURE_C;

/// Offset from 20 °C used as the exponent of every theta correction.
///
/// Water at or below -10 °C behaves as if at 20 °C (offset 0) and water at
/// or above 50 °C is capped at an offset of 30.
pub fn temperature_offset(water_temperature_c: f64) -> f64 {
    if water_temperature_c <= -10.0 {
        0.0
    } else if water_temperature_c >= 50.0 {
        30.0
    } else {
        water_temperature_c - REFERENCE_TEMPERATURE_C
    }
}
