//! Reach and constituent configuration, validation, and error types.
//!
//! [`ReachConfig`] is the read-once configuration surface for a run.
//! [`validate()`](ReachConfig::validate) checks structural invariants that
//! do not depend on the forcing; [`RunPlan::compile`](crate::RunPlan::compile)
//! calls it before checking the forcing and resolving sources.
//!
//! Parameters are given in the units of [`ReachConfig::units`] and rates in
//! natural time units (per second or per day, as documented per field).

use std::collections::HashSet;

use chrono::NaiveDateTime;
use reachqual_core::constants::LIGHT_BANDS;
use reachqual_core::coupling::{CouplingError, CouplingMatrix};
use reachqual_core::process::{ByProcess, DecayProcess};
use reachqual_core::sediment::BySediment;
use reachqual_core::units::UnitSystem;
use reachqual_kinetics::light::{LatitudeBucket, LightTableError};
use thiserror::Error;

/// Temperature correction base used when none is configured.
pub const DEFAULT_THETA: f64 = 1.07;

/// Reaeration temperature correction base used when none is configured.
pub const DEFAULT_REAERATION_THETA: f64 = 1.047;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors that make a run meaningless.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Interval length is NaN, infinite, zero or negative.
    #[error("interval length must be positive, got {minutes} minutes")]
    InvalidInterval {
        /// The configured interval in minutes.
        minutes: f64,
    },
    /// The reach has no exits.
    #[error("a reach needs at least one exit")]
    NoExits,
    /// No constituents are configured.
    #[error("no constituents configured")]
    NoConstituents,
    /// Two constituents share a name.
    #[error("duplicate constituent name {name:?}")]
    DuplicateConstituent {
        /// The repeated name.
        name: String,
    },
    /// The quantity-to-mass factor is not a positive finite number.
    #[error("constituent {constituent:?}: conv must be positive, got {conv}")]
    InvalidConv {
        /// Constituent name.
        constituent: String,
        /// The rejected factor.
        conv: f64,
    },
    /// A constituent parameter is out of range.
    #[error("constituent {constituent:?}: {parameter} out of range ({value})")]
    InvalidParameter {
        /// Constituent name.
        constituent: String,
        /// Parameter name.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A reach-level parameter is out of range.
    #[error("reach parameter {parameter} out of range ({value})")]
    InvalidReachParameter {
        /// Parameter name.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The coupling matrix does not cover the constituent list.
    #[error("coupling matrix covers {actual} constituents, expected {expected}")]
    CouplingSize {
        /// Number of constituents.
        expected: usize,
        /// Size of the matrix.
        actual: usize,
    },
    /// A coupling coefficient is invalid.
    #[error(transparent)]
    Coupling(#[from] CouplingError),
    /// Latitude outside the light table while strict mode is on.
    #[error(transparent)]
    LightTable(#[from] LightTableError),
    /// A forcing series does not have one value per step.
    #[error("series {series} has {actual} values, expected {expected}")]
    SeriesLength {
        /// Series name.
        series: String,
        /// Number of steps.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
    /// A forcing series holds NaN or an infinity.
    #[error("series {series} is not finite at step {step}")]
    NonFiniteInput {
        /// Series name.
        series: String,
        /// First offending step.
        step: usize,
    },
    /// The forcing describes a different number of exits.
    #[error("forcing has {actual} exits, configuration has {expected}")]
    ExitCount {
        /// Configured exits.
        expected: usize,
        /// Exits in the forcing.
        actual: usize,
    },
    /// The forcing describes a different number of constituents.
    #[error("forcing has {actual} constituents, configuration has {expected}")]
    ConstituentCount {
        /// Configured constituents.
        expected: usize,
        /// Constituents in the forcing.
        actual: usize,
    },
    /// A step timestamp cannot be represented.
    #[error("step {step} falls outside the representable calendar")]
    CalendarOverflow {
        /// Offending step.
        step: usize,
    },
}

// ── Source ─────────────────────────────────────────────────────────

/// Where an environmental input comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Source {
    /// Read from the matching forcing series.
    Series,
    /// The same value every step.
    Constant(f64),
    /// One value per calendar month, January first.
    Monthly([f64; 12]),
}

impl Source {
    fn check(&self, parameter: &'static str) -> Result<(), ConfigError> {
        let bad = match self {
            Self::Series => None,
            Self::Constant(v) => (!v.is_finite()).then_some(*v),
            Self::Monthly(values) => values.iter().copied().find(|v| !v.is_finite()),
        };
        match bad {
            Some(value) => Err(ConfigError::InvalidReachParameter { parameter, value }),
            None => Ok(()),
        }
    }
}

/// Sources of the reach-wide environmental inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentSources {
    /// Water temperature (°F or °C). Default: 60 °F equivalent.
    pub water_temperature: Source,
    /// pH. Default: 7.
    pub ph: Source,
    /// Free radical oxygen (mol/l). Default: 0.
    pub oxidant: Source,
    /// Cloud cover in tenths. Default: 0.
    pub cloud_cover: Source,
    /// Suspended sediment concentration for light extinction (mg/l). Default: 0.
    pub sediment_concentration: Source,
    /// Phytoplankton for light extinction. Default: 0.
    pub phytoplankton: Source,
}

impl EnvironmentSources {
    /// Defaults for `units`.
    pub fn defaults(units: UnitSystem) -> Self {
        Self {
            water_temperature: Source::Constant(units.default_water_temperature()),
            ph: Source::Constant(7.0),
            oxidant: Source::Constant(0.0),
            cloud_cover: Source::Constant(0.0),
            sediment_concentration: Source::Constant(0.0),
            phytoplankton: Source::Constant(0.0),
        }
    }

    /// Every source read from the forcing.
    pub fn all_series() -> Self {
        Self {
            water_temperature: Source::Series,
            ph: Source::Series,
            oxidant: Source::Series,
            cloud_cover: Source::Series,
            sediment_concentration: Source::Series,
            phytoplankton: Source::Series,
        }
    }
}

impl Default for EnvironmentSources {
    fn default() -> Self {
        Self::defaults(UnitSystem::default())
    }
}

// ── Reaeration ─────────────────────────────────────────────────────

/// Reaeration method for a free-flowing reach.
///
/// Power-law coefficients apply to velocity in ft/s and depth in ft in
/// either unit system.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum StreamReaeration {
    /// Tsivoglou energy dissipation.
    Tsivoglou {
        /// Escape coefficient per unit of drop (per ft or per m).
        reakt: f64,
        /// Reach length (mi or km).
        length: f64,
        /// Water surface drop over the reach (ft or m).
        drop: f64,
    },
    /// Owens, O'Connor-Dobbins or Churchill, chosen by depth and velocity.
    #[default]
    Empirical,
    /// User power law `reak · V^exprev · H^expred` (per hour).
    Power {
        /// Coefficient.
        reak: f64,
        /// Velocity exponent.
        exprev: f64,
        /// Depth exponent.
        expred: f64,
    },
}

// ── Constituent parameters ─────────────────────────────────────────

/// Hydrolysis rate constants (per second).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HydrolysisParams {
    /// Acid-catalysed constant.
    pub ka: f64,
    /// Base-catalysed constant.
    pub kb: f64,
    /// Neutral constant.
    pub kn: f64,
    /// Temperature correction base.
    pub theta: f64,
}

impl Default for HydrolysisParams {
    fn default() -> Self {
        Self {
            ka: 0.0,
            kb: 0.0,
            kn: 0.0,
            theta: DEFAULT_THETA,
        }
    }
}

/// Free radical oxidation (per mol/l per second).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OxidationParams {
    /// Second-order rate constant.
    pub kox: f64,
    /// Temperature correction base.
    pub theta: f64,
}

impl Default for OxidationParams {
    fn default() -> Self {
        Self {
            kox: 0.0,
            theta: DEFAULT_THETA,
        }
    }
}

/// Direct photolysis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotolysisParams {
    /// Molar absorption coefficient per band.
    pub absorption: [f64; LIGHT_BANDS],
    /// Quantum yield.
    pub quantum_yield: f64,
    /// Temperature correction base.
    pub theta: f64,
    /// Clear-water extinction per band.
    pub alpha: [f64; LIGHT_BANDS],
    /// Extinction per unit sediment concentration per band.
    pub gamma: [f64; LIGHT_BANDS],
    /// Extinction per unit phytoplankton per band.
    pub delta: [f64; LIGHT_BANDS],
    /// Cloud attenuation factor per band.
    pub cloud_factor: [f64; LIGHT_BANDS],
    /// Correction of the tabulated light to site conditions.
    pub cfsaex: f64,
}

impl Default for PhotolysisParams {
    fn default() -> Self {
        Self {
            absorption: [0.0; LIGHT_BANDS],
            quantum_yield: 0.0,
            theta: DEFAULT_THETA,
            alpha: [0.0; LIGHT_BANDS],
            gamma: [0.0; LIGHT_BANDS],
            delta: [0.0; LIGHT_BANDS],
            cloud_factor: [0.0; LIGHT_BANDS],
            cfsaex: 1.0,
        }
    }
}

/// Volatilization relative to oxygen reaeration.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct VolatilizationParams {
    /// Ratio of the constituent's transfer rate to oxygen's.
    pub cfgas: f64,
}

/// Biodegradation by active biomass (per unit biomass per day).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiodegradationParams {
    /// Second-order rate constant.
    pub biocon: f64,
    /// Temperature correction base.
    pub theta: f64,
    /// Active biomass. Default: constant 0.
    pub biomass: Source,
}

impl Default for BiodegradationParams {
    fn default() -> Self {
        Self {
            biocon: 0.0,
            theta: DEFAULT_THETA,
            biomass: Source::Constant(0.0),
        }
    }
}

/// Generalized first-order decay (per day).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenericDecayParams {
    /// Decay rate.
    pub rate: f64,
    /// Temperature correction base.
    pub theta: f64,
}

impl GenericDecayParams {
    /// Decay at `rate` per day with the default temperature base.
    pub fn new(rate: f64) -> Self {
        Self {
            rate,
            theta: DEFAULT_THETA,
        }
    }
}

/// Sediment association: partitioning, exchange and sorbed decay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SedimentParams {
    /// Partition coefficient per class.
    pub kd: BySediment<f64>,
    /// Adsorption/desorption transfer rate per class (per day).
    pub adsorption_rate: BySediment<f64>,
    /// Transfer temperature base per class.
    pub adsorption_theta: BySediment<f64>,
    /// Decay rate on suspended sediment (per day).
    pub suspended_decay: f64,
    /// Temperature base for suspended decay.
    pub suspended_decay_theta: f64,
    /// Decay rate on bed sediment (per day).
    pub bed_decay: f64,
    /// Temperature base for bed decay.
    pub bed_decay_theta: f64,
    /// Initial sorbed concentration per class.
    pub initial_sorbed: BySediment<f64>,
}

impl Default for SedimentParams {
    fn default() -> Self {
        Self {
            kd: BySediment::splat(0.0),
            adsorption_rate: BySediment::splat(0.0),
            adsorption_theta: BySediment::splat(DEFAULT_THETA),
            suspended_decay: 0.0,
            suspended_decay_theta: DEFAULT_THETA,
            bed_decay: 0.0,
            bed_decay_theta: DEFAULT_THETA,
            initial_sorbed: BySediment::splat(0.0),
        }
    }
}

// ── ConstituentConfig ──────────────────────────────────────────────

/// One generalized quality constituent.
///
/// Each process runs iff its parameter record is present.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstituentConfig {
    /// Unique name, used for output keys and diagnostics.
    pub name: String,
    /// Quantity-to-mass factor (qty → conc·ft³ or conc·m³).
    pub conv: f64,
    /// Initial dissolved concentration.
    pub initial_concentration: f64,
    /// Hydrolysis.
    pub hydrolysis: Option<HydrolysisParams>,
    /// Oxidation.
    pub oxidation: Option<OxidationParams>,
    /// Photolysis.
    pub photolysis: Option<PhotolysisParams>,
    /// Volatilization.
    pub volatilization: Option<VolatilizationParams>,
    /// Biodegradation.
    pub biodegradation: Option<BiodegradationParams>,
    /// Generalized decay.
    pub generic_decay: Option<GenericDecayParams>,
    /// Sediment association.
    pub sediment: Option<SedimentParams>,
    /// Processes through which this constituent is produced from parents.
    pub daughter_of: ByProcess<bool>,
    /// Dry deposition flux (qty per acre or hectare per day).
    pub dry_deposition: Option<Source>,
    /// Concentration of the constituent in rain.
    pub wet_deposition: Option<Source>,
}

impl ConstituentConfig {
    /// A conservative constituent with no processes.
    pub fn new(name: impl Into<String>, conv: f64) -> Self {
        Self {
            name: name.into(),
            conv,
            initial_concentration: 0.0,
            hydrolysis: None,
            oxidation: None,
            photolysis: None,
            volatilization: None,
            biodegradation: None,
            generic_decay: None,
            sediment: None,
            daughter_of: ByProcess::splat(false),
            dry_deposition: None,
            wet_deposition: None,
        }
    }

    /// Set the initial dissolved concentration.
    pub fn with_initial_concentration(mut self, concentration: f64) -> Self {
        self.initial_concentration = concentration;
        self
    }

    /// Enable hydrolysis.
    pub fn with_hydrolysis(mut self, params: HydrolysisParams) -> Self {
        self.hydrolysis = Some(params);
        self
    }

    /// Enable oxidation.
    pub fn with_oxidation(mut self, params: OxidationParams) -> Self {
        self.oxidation = Some(params);
        self
    }

    /// Enable photolysis.
    pub fn with_photolysis(mut self, params: PhotolysisParams) -> Self {
        self.photolysis = Some(params);
        self
    }

    /// Enable volatilization.
    pub fn with_volatilization(mut self, params: VolatilizationParams) -> Self {
        self.volatilization = Some(params);
        self
    }

    /// Enable biodegradation.
    pub fn with_biodegradation(mut self, params: BiodegradationParams) -> Self {
        self.biodegradation = Some(params);
        self
    }

    /// Enable generalized decay.
    pub fn with_generic_decay(mut self, params: GenericDecayParams) -> Self {
        self.generic_decay = Some(params);
        self
    }

    /// Associate the constituent with sediment.
    pub fn with_sediment(mut self, params: SedimentParams) -> Self {
        self.sediment = Some(params);
        self
    }

    /// Mark this constituent as a product of `process` in its parents.
    pub fn with_daughter_of(mut self, process: DecayProcess) -> Self {
        self.daughter_of[process] = true;
        self
    }

    /// Enable dry deposition.
    pub fn with_dry_deposition(mut self, source: Source) -> Self {
        self.dry_deposition = Some(source);
        self
    }

    /// Enable wet deposition.
    pub fn with_wet_deposition(mut self, source: Source) -> Self {
        self.wet_deposition = Some(source);
        self
    }

    /// Whether any dissolved decay process is enabled.
    pub fn decays(&self) -> bool {
        self.hydrolysis.is_some()
            || self.oxidation.is_some()
            || self.photolysis.is_some()
            || self.volatilization.is_some()
            || self.biodegradation.is_some()
            || self.generic_decay.is_some()
    }

    /// Whether the constituent is produced by any parent process.
    pub fn is_daughter(&self) -> bool {
        self.daughter_of.iter().any(|(_, on)| on)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.conv.is_finite() || self.conv <= 0.0 {
            return Err(ConfigError::InvalidConv {
                constituent: self.name.clone(),
                conv: self.conv,
            });
        }
        let mut checks: Vec<(&'static str, f64)> =
            vec![("initial_concentration", self.initial_concentration)];
        if let Some(p) = &self.hydrolysis {
            checks.extend([("ka", p.ka), ("kb", p.kb), ("kn", p.kn)]);
            checks.push(("hydrolysis theta", p.theta));
        }
        if let Some(p) = &self.oxidation {
            checks.extend([("kox", p.kox), ("oxidation theta", p.theta)]);
        }
        if let Some(p) = &self.photolysis {
            checks.extend([
                ("quantum_yield", p.quantum_yield),
                ("photolysis theta", p.theta),
                ("cfsaex", p.cfsaex),
            ]);
            checks.extend(p.absorption.iter().map(|&v| ("absorption", v)));
        }
        if let Some(p) = &self.volatilization {
            checks.push(("cfgas", p.cfgas));
        }
        if let Some(p) = &self.biodegradation {
            checks.extend([("biocon", p.biocon), ("biodegradation theta", p.theta)]);
        }
        if let Some(p) = &self.generic_decay {
            checks.extend([("fstdec", p.rate), ("generic decay theta", p.theta)]);
        }
        if let Some(p) = &self.sediment {
            checks.extend([
                ("suspended_decay", p.suspended_decay),
                ("suspended_decay_theta", p.suspended_decay_theta),
                ("bed_decay", p.bed_decay),
                ("bed_decay_theta", p.bed_decay_theta),
            ]);
            for (_, v) in p.kd.iter() {
                checks.push(("kd", v));
            }
            for (_, v) in p.adsorption_rate.iter() {
                checks.push(("adsorption_rate", v));
            }
            for (_, v) in p.adsorption_theta.iter() {
                checks.push(("adsorption_theta", v));
            }
            for (_, v) in p.initial_sorbed.iter() {
                checks.push(("initial_sorbed", v));
            }
        }
        for (parameter, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter {
                    constituent: self.name.clone(),
                    parameter,
                    value,
                });
            }
        }
        for source in [self.dry_deposition, self.wet_deposition].into_iter().flatten() {
            source.check("deposition")?;
        }
        if let Some(p) = &self.biodegradation {
            p.biomass.check("biomass")?;
        }
        Ok(())
    }
}

// ── ReachConfig ────────────────────────────────────────────────────

/// Configuration of one reach run.
#[derive(Clone, Debug, PartialEq)]
pub struct ReachConfig {
    /// Reach name, used in log lines and batch errors.
    pub name: String,
    /// Unit system of every input and parameter.
    pub units: UnitSystem,
    /// Interval length in minutes. Default: 60.
    pub interval_minutes: f64,
    /// Timestamp of the start of the first interval.
    pub start: NaiveDateTime,
    /// Reach latitude in degrees (negative south). Default: 40.
    pub latitude: f64,
    /// Reject latitudes beyond the light table instead of clamping them.
    pub strict_light_table: bool,
    /// The reach is a lake (wind-driven reaeration).
    pub lake: bool,
    /// Lake reaeration correction. Default: 1.
    pub cforea: f64,
    /// Reaeration method for free-flowing reaches.
    pub stream_reaeration: StreamReaeration,
    /// Reaeration temperature correction base. Default: 1.047.
    pub reaeration_theta: f64,
    /// Number of exits. Default: 1.
    pub exits: usize,
    /// Volume at the start of the run.
    pub initial_volume: f64,
    /// Environmental input sources.
    pub environment: EnvironmentSources,
    /// Constituents in processing order; parents before daughters.
    pub constituents: Vec<ConstituentConfig>,
    /// Parent-to-daughter coefficients; `None` when nothing is coupled.
    pub coupling: Option<CouplingMatrix>,
}

impl ReachConfig {
    /// An hourly single-exit stream reach in `units` with no constituents.
    pub fn new(name: impl Into<String>, units: UnitSystem) -> Self {
        Self {
            name: name.into(),
            units,
            interval_minutes: 60.0,
            start: NaiveDateTime::default(),
            latitude: 40.0,
            strict_light_table: false,
            lake: false,
            cforea: 1.0,
            stream_reaeration: StreamReaeration::default(),
            reaeration_theta: DEFAULT_REAERATION_THETA,
            exits: 1,
            initial_volume: 0.0,
            environment: EnvironmentSources::defaults(units),
            constituents: Vec::new(),
            coupling: None,
        }
    }

    /// Append a constituent.
    pub fn with_constituent(mut self, constituent: ConstituentConfig) -> Self {
        self.constituents.push(constituent);
        self
    }

    /// Set the coupling matrix.
    pub fn with_coupling(mut self, coupling: CouplingMatrix) -> Self {
        self.coupling = Some(coupling);
        self
    }

    /// Interval length in hours.
    pub fn interval_hours(&self) -> f64 {
        self.interval_minutes / 60.0
    }

    /// Check structural invariants.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.interval_minutes.is_finite() || self.interval_minutes <= 0.0 {
            return Err(ConfigError::InvalidInterval {
                minutes: self.interval_minutes,
            });
        }
        if self.exits == 0 {
            return Err(ConfigError::NoExits);
        }
        if self.constituents.is_empty() {
            return Err(ConfigError::NoConstituents);
        }
        let reach_checks = [
            ("initial_volume", self.initial_volume),
            ("cforea", self.cforea),
            ("reaeration_theta", self.reaeration_theta),
        ];
        for (parameter, value) in reach_checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidReachParameter { parameter, value });
            }
        }
        if !self.latitude.is_finite() || self.latitude.abs() > 90.0 {
            return Err(ConfigError::InvalidReachParameter {
                parameter: "latitude",
                value: self.latitude,
            });
        }
        let env = &self.environment;
        env.water_temperature.check("water_temperature")?;
        env.ph.check("ph")?;
        env.oxidant.check("oxidant")?;
        env.cloud_cover.check("cloud_cover")?;
        env.sediment_concentration.check("sediment_concentration")?;
        env.phytoplankton.check("phytoplankton")?;

        let mut names = HashSet::new();
        for constituent in &self.constituents {
            if !names.insert(constituent.name.as_str()) {
                return Err(ConfigError::DuplicateConstituent {
                    name: constituent.name.clone(),
                });
            }
            constituent.validate()?;
        }

        if let Some(coupling) = &self.coupling {
            if coupling.len() != self.constituents.len() {
                return Err(ConfigError::CouplingSize {
                    expected: self.constituents.len(),
                    actual: coupling.len(),
                });
            }
        }

        if self.strict_light_table && self.constituents.iter().any(|c| c.photolysis.is_some()) {
            LatitudeBucket::for_latitude(self.latitude)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reachqual_core::id::ConstituentId;

    fn reach() -> ReachConfig {
        ReachConfig::new("test", UnitSystem::English)
            .with_constituent(ConstituentConfig::new("parent", 1.0))
            .with_constituent(ConstituentConfig::new("child", 1.0))
    }

    #[test]
    fn defaults_validate() {
        assert!(reach().validate().is_ok());
        let env = EnvironmentSources::default();
        assert_eq!(env.ph, Source::Constant(7.0));
        match env.water_temperature {
            Source::Constant(t) => assert!((t - 60.0).abs() < 1e-9),
            other => panic!("unexpected default {other:?}"),
        }
    }

    #[test]
    fn bad_interval_rejected() {
        let mut cfg = reach();
        cfg.interval_minutes = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidInterval { .. })));
        cfg.interval_minutes = f64::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidInterval { .. })));
    }

    #[test]
    fn zero_exits_rejected() {
        let mut cfg = reach();
        cfg.exits = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::NoExits));
    }

    #[test]
    fn empty_and_duplicate_constituents_rejected() {
        let empty = ReachConfig::new("empty", UnitSystem::Metric);
        assert_eq!(empty.validate(), Err(ConfigError::NoConstituents));
        let dup = reach().with_constituent(ConstituentConfig::new("child", 2.0));
        assert!(matches!(
            dup.validate(),
            Err(ConfigError::DuplicateConstituent { name }) if name == "child"
        ));
    }

    #[test]
    fn conv_must_be_positive() {
        let cfg = ReachConfig::new("r", UnitSystem::English)
            .with_constituent(ConstituentConfig::new("x", 0.0));
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidConv { .. })));
    }

    #[test]
    fn negative_rate_rejected() {
        let cfg = ReachConfig::new("r", UnitSystem::English).with_constituent(
            ConstituentConfig::new("x", 1.0).with_generic_decay(GenericDecayParams::new(-0.1)),
        );
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidParameter { parameter: "fstdec", .. })
        ));
    }

    #[test]
    fn coupling_must_cover_constituents() {
        let cfg = reach().with_coupling(CouplingMatrix::new(3));
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::CouplingSize {
                expected: 2,
                actual: 3
            })
        );
        let coupled = reach().with_coupling(
            CouplingMatrix::new(2)
                .with(ConstituentId(0), ConstituentId(1), 1.0)
                .unwrap(),
        );
        assert!(coupled.validate().is_ok());
    }

    #[test]
    fn strict_light_table_rejects_high_latitude() {
        let mut cfg = ReachConfig::new("r", UnitSystem::English).with_constituent(
            ConstituentConfig::new("x", 1.0).with_photolysis(PhotolysisParams::default()),
        );
        cfg.latitude = 62.0;
        assert!(cfg.validate().is_ok());
        cfg.strict_light_table = true;
        assert!(matches!(cfg.validate(), Err(ConfigError::LightTable(_))));
    }

    #[test]
    fn builder_sets_flags() {
        let c = ConstituentConfig::new("d", 1.0)
            .with_generic_decay(GenericDecayParams::new(0.1))
            .with_daughter_of(DecayProcess::GenericDecay);
        assert!(c.decays());
        assert!(c.is_daughter());
        assert!(!ConstituentConfig::new("e", 1.0).decays());
    }
}
