//! Unit-system boundary.
//!
//! The engine computes in a single internal system (volume ft³, length ft,
//! velocity ft/s, area ft², precipitation ft, wind m/s, water temperature
//! °C, sediment mass in concentration·ft³ units). Inputs are converted once
//! when a run is compiled and mass outputs are reported in quantity units,
//! so the conversions here never appear inside the kinetics.

use std::fmt;

/// Cubic feet per cubic metre.
pub const FT3_PER_M3: f64 = 35.314_666_721_488_59;
/// Feet per metre.
pub const FT_PER_M: f64 = 3.280_839_895_013_123;
/// Square feet per acre.
pub const FT2_PER_ACRE: f64 = 43_560.0;
/// Square metres per hectare.
pub const M2_PER_HECTARE: f64 = 10_000.0;
/// Tons per (mg/l · ft³).
pub const TONS_PER_CONC_FT3: f64 = 3.121e-8;
/// Tonnes per (mg/l · m³).
pub const TONNES_PER_CONC_M3: f64 = 1.0e-6;

/// A dimensioned input quantity with a multiplicative conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Reach volume and outflow volumes: acre-ft or Mm³.
    Volume,
    /// Average depth and reach drop: ft or m.
    Depth,
    /// Average velocity: ft/s or m/s.
    Velocity,
    /// Surface area: acres or hectares.
    Area,
    /// Precipitation depth per interval: in or mm.
    Precipitation,
    /// Wind speed: mi/h or m/s.
    Wind,
    /// Sediment storage, flux and outflow: tons or tonnes.
    SedimentMass,
    /// Dry deposition flux: qty/acre/day or qty/hectare/day.
    DepositionFlux,
    /// Reach length: mi or km.
    ReachLength,
    /// Quantity-to-mass factor `conv`: qty → conc·ft³ or conc·m³.
    Conv,
}

/// The two supported boundary unit systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    /// US customary units.
    #[default]
    English,
    /// Metric units.
    Metric,
}

impl UnitSystem {
    /// Multiplier taking `quantity` from this system into internal units.
    ///
    /// Deposition flux converts to qty/ft²/day; scaling to the interval
    /// length is done by the caller.
    pub fn factor(self, quantity: Quantity) -> f64 {
        match (self, quantity) {
            (Self::English, Quantity::Volume) => FT2_PER_ACRE,
            (Self::Metric, Quantity::Volume) => 1.0e6 * FT3_PER_M3,
            (Self::English, Quantity::Depth | Quantity::Velocity) => 1.0,
            (Self::Metric, Quantity::Depth | Quantity::Velocity) => FT_PER_M,
            (Self::English, Quantity::Area) => FT2_PER_ACRE,
            (Self::Metric, Quantity::Area) => M2_PER_HECTARE * FT_PER_M * FT_PER_M,
            (Self::English, Quantity::Precipitation) => 1.0 / 12.0,
            (Self::Metric, Quantity::Precipitation) => FT_PER_M / 1000.0,
            (Self::English, Quantity::Wind) => 0.447_04,
            (Self::Metric, Quantity::Wind) => 1.0,
            (Self::English, Quantity::SedimentMass) => 1.0 / TONS_PER_CONC_FT3,
            (Self::Metric, Quantity::SedimentMass) => FT3_PER_M3 / TONNES_PER_CONC_M3,
            (Self::English, Quantity::DepositionFlux) => 1.0 / FT2_PER_ACRE,
            (Self::Metric, Quantity::DepositionFlux) => {
                1.0 / (M2_PER_HECTARE * FT_PER_M * FT_PER_M)
            }
            (Self::English, Quantity::ReachLength) => 5280.0,
            (Self::Metric, Quantity::ReachLength) => 1000.0 * FT_PER_M,
            (Self::English, Quantity::Conv) => 1.0,
            (Self::Metric, Quantity::Conv) => FT3_PER_M3,
        }
    }

    /// Convert a value of `quantity` into internal units.
    pub fn to_internal(self, quantity: Quantity, value: f64) -> f64 {
        value * self.factor(quantity)
    }

    /// Convert an internal value of `quantity` back into this system.
    pub fn from_internal(self, quantity: Quantity, value: f64) -> f64 {
        value / self.factor(quantity)
    }

    /// Water temperature in this system to °C.
    pub fn temperature_to_celsius(self, value: f64) -> f64 {
        match self {
            Self::English => (value - 32.0) * 5.0 / 9.0,
            Self::Metric => value,
        }
    }

    /// Water temperature in °C to this system.
    pub fn temperature_from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::English => celsius * 9.0 / 5.0 + 32.0,
            Self::Metric => celsius,
        }
    }

    /// Default water temperature when none is configured (60 °F).
    pub fn default_water_temperature(self) -> f64 {
        self.temperature_from_celsius(Self::English.temperature_to_celsius(60.0))
    }

    /// Convert a value from this system into `other` by way of internal units.
    pub fn convert(self, other: UnitSystem, quantity: Quantity, value: f64) -> f64 {
        other.from_internal(quantity, self.to_internal(quantity, value))
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => f.write_str("english"),
            Self::Metric => f.write_str("metric"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Quantity; 10] = [
        Quantity::Volume,
        Quantity::Depth,
        Quantity::Velocity,
        Quantity::Area,
        Quantity::Precipitation,
        Quantity::Wind,
        Quantity::SedimentMass,
        Quantity::DepositionFlux,
        Quantity::ReachLength,
        Quantity::Conv,
    ];

    #[test]
    fn english_volume_is_acre_feet() {
        assert_eq!(UnitSystem::English.to_internal(Quantity::Volume, 1.0), 43_560.0);
    }

    #[test]
    fn metric_depth_matches_feet() {
        let ft = UnitSystem::Metric.to_internal(Quantity::Depth, 0.3048);
        assert!((ft - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cross_system_conversion_is_invertible() {
        for q in ALL {
            let v = 12.5;
            let there = UnitSystem::English.convert(UnitSystem::Metric, q, v);
            let back = UnitSystem::Metric.convert(UnitSystem::English, q, there);
            assert!((back - v).abs() < 1e-9 * v, "{q:?}");
        }
    }

    #[test]
    fn temperature_round_trip() {
        let c = UnitSystem::English.temperature_to_celsius(68.0);
        assert!((c - 20.0).abs() < 1e-12);
        assert!((UnitSystem::English.temperature_from_celsius(c) - 68.0).abs() < 1e-12);
        assert_eq!(UnitSystem::Metric.temperature_to_celsius(12.0), 12.0);
        let metric_default = UnitSystem::Metric.default_water_temperature();
        assert!((metric_default - 15.555_555_555_555_555).abs() < 1e-9);
    }

    #[test]
    fn sediment_factors_match_conventional_constants() {
        // One short ton expressed as mg/l · ft³.
        let english = UnitSystem::English.to_internal(Quantity::SedimentMass, 1.0);
        assert!((english - 3.204_101e7).abs() / english < 1e-3);
    }
}
