//! Pre-loop validation and compilation of a run.
//!
//! [`RunPlan::compile`] checks a [`ReachConfig`] against its
//! [`ReachForcing`], raises the structural diagnostics, substitutes
//! zero-filled series for missing inputs, resolves every [`Source`], and
//! converts all inputs and rates into internal per-interval units. The
//! resulting plan is immutable and read-only during the step loop.

use log::warn;
use reachqual_core::coupling::CouplingMatrix;
use reachqual_core::diagnostics::{Diagnostic, ErrorCounts};
use reachqual_core::id::ConstituentId;
use reachqual_core::process::ByProcess;
use reachqual_core::sediment::{ByFraction, BySediment, SedimentClass};
use reachqual_core::units::{Quantity, UnitSystem};
use reachqual_kinetics::decay::{
    Biodegradation, DissolvedKinetics, Diurnal, GenericDecay, Hydrolysis, Oxidation, Photolysis,
    Volatilization,
};
use reachqual_kinetics::light::{LatitudeBucket, LightExtinction, Season};
use reachqual_kinetics::reaeration::Reaeration;
use reachqual_kinetics::sediment_decay::SorbedDecayRate;
use reachqual_kinetics::sorption::SorptionRates;
use reachqual_kinetics::temperature_offset;

use crate::calendar::StepCalendar;
use crate::config::{ConfigError, ConstituentConfig, ReachConfig, Source, StreamReaeration};
use crate::forcing::{ConstituentForcing, ReachForcing, SedimentForcing};

/// Hydraulic inputs in internal units.
#[derive(Clone, Debug)]
pub(crate) struct Hydraulics {
    pub initial_volume: f64,
    pub volume: Vec<f64>,
    pub start_total: Vec<f64>,
    pub end_total: Vec<f64>,
    /// Step-major: `[step * exits + exit]`.
    pub start_by_exit: Vec<f64>,
    pub end_by_exit: Vec<f64>,
    pub depth_ft: Vec<f64>,
    pub velocity_ft_s: Vec<f64>,
    pub wind_m_s: Vec<f64>,
    pub precipitation_ft: Vec<f64>,
    pub area_ft2: Vec<f64>,
}

/// Resolved environmental drivers.
#[derive(Clone, Debug)]
pub(crate) struct Environment {
    pub temperature_offset: Vec<f64>,
    pub ph: Vec<f64>,
    pub oxidant: Vec<f64>,
    pub cloud_cover: Vec<f64>,
    pub sediment_concentration: Vec<f64>,
    pub phytoplankton: Vec<f64>,
    pub seasons: Vec<Season>,
    pub diurnal: Vec<Diurnal>,
    /// Present when any constituent photolyses.
    pub bucket: Option<LatitudeBucket>,
}

/// Sediment state in internal mass units.
#[derive(Clone, Debug)]
pub(crate) struct SedimentPlan {
    pub initial_storage: BySediment<f64>,
    pub storage: BySediment<Vec<f64>>,
    pub deposition: ByFraction<Vec<f64>>,
    pub outflow: ByFraction<Vec<f64>>,
    /// Step-major: `[step * exits + exit]`.
    pub exit_outflow: ByFraction<Vec<f64>>,
}

/// Sorption and sorbed decay for one constituent.
#[derive(Clone, Debug)]
pub(crate) struct SorbedPlan {
    pub rates: SorptionRates,
    pub suspended_decay: SorbedDecayRate,
    pub bed_decay: SorbedDecayRate,
    pub initial_sorbed: BySediment<f64>,
}

/// Atmospheric deposition inputs for one constituent.
#[derive(Clone, Debug)]
pub(crate) struct DepositionPlan {
    /// Dry flux in qty per ft² per interval.
    pub dry: Vec<f64>,
    /// Rain concentration.
    pub wet: Vec<f64>,
}

/// One constituent, compiled.
#[derive(Clone, Debug)]
pub(crate) struct ConstituentPlan {
    pub name: String,
    pub conv: f64,
    pub initial_concentration: f64,
    pub kinetics: DissolvedKinetics,
    pub extinction: Option<LightExtinction>,
    pub sorbed: Option<SorbedPlan>,
    pub produces: ByProcess<bool>,
    pub has_parents: bool,
    pub inflow: Vec<f64>,
    pub sorbed_inflow: ByFraction<Vec<f64>>,
    pub deposition: Option<DepositionPlan>,
    pub biomass: Vec<f64>,
}

/// A validated run, ready to execute.
#[derive(Clone, Debug)]
pub struct RunPlan {
    pub(crate) name: String,
    pub(crate) units: UnitSystem,
    pub(crate) steps: usize,
    pub(crate) exits: usize,
    pub(crate) interval_hours: f64,
    pub(crate) lake: bool,
    pub(crate) hydraulics: Hydraulics,
    pub(crate) environment: Environment,
    pub(crate) reaeration: Option<Reaeration>,
    pub(crate) sediment: Option<SedimentPlan>,
    pub(crate) constituents: Vec<ConstituentPlan>,
    pub(crate) coupling: CouplingMatrix,
}

impl RunPlan {
    /// Validate `config` against `forcing` and compile the run.
    ///
    /// Returns the plan with the structural diagnostics raised while
    /// compiling; those are non-fatal and carried into the run's counts.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]: invalid configuration, series of the wrong
    /// length or with non-finite values, or mismatched exit and
    /// constituent counts.
    pub fn compile(
        config: &ReachConfig,
        forcing: &ReachForcing,
    ) -> Result<(Self, ErrorCounts), ConfigError> {
        config.validate()?;
        check_forcing(config, forcing)?;

        let steps = forcing.steps();
        let units = config.units;
        let calendar = StepCalendar::new(config.start, config.interval_minutes, steps)?;
        let mut counts = ErrorCounts::new();
        let constituents = &config.constituents;
        let any = |f: fn(&ConstituentConfig) -> bool| constituents.iter().any(f);

        // Structural diagnostics, one per offending constituent.
        for c in constituents {
            if c.sediment.is_some() && forcing.sediment.is_none() {
                raise(&mut counts, Diagnostic::SedimentTransportInactive, &c.name);
            }
            if c.photolysis.is_some() && forcing.depth.is_none() {
                raise(&mut counts, Diagnostic::PhotolysisWithoutDepth, &c.name);
            }
            if c.volatilization.is_some() {
                if !config.lake && forcing.velocity.is_none() {
                    raise(&mut counts, Diagnostic::StreamVolatilizationWithoutVelocity, &c.name);
                }
                if config.lake && forcing.depth.is_none() {
                    raise(&mut counts, Diagnostic::LakeVolatilizationWithoutDepth, &c.name);
                }
            }
        }

        let reactive = any(|c| c.decays() || c.sediment.is_some());
        let photolysis = any(|c| c.photolysis.is_some());
        let volatilization = any(|c| c.volatilization.is_some());
        let deposition = any(|c| c.dry_deposition.is_some() || c.wet_deposition.is_some());
        let wet = any(|c| c.wet_deposition.is_some());

        let hydraulics = Hydraulics {
            initial_volume: units.to_internal(Quantity::Volume, config.initial_volume),
            volume: scaled(&forcing.volume, units.factor(Quantity::Volume)),
            start_total: exit_totals(forcing, units, |e| &e.start),
            end_total: exit_totals(forcing, units, |e| &e.end),
            start_by_exit: step_major(forcing, units, |e| &e.start),
            end_by_exit: step_major(forcing, units, |e| &e.end),
            depth_ft: optional(&forcing.depth, "depth", reactive, steps, units, Quantity::Depth),
            velocity_ft_s: optional(
                &forcing.velocity,
                "velocity",
                volatilization && !config.lake,
                steps,
                units,
                Quantity::Velocity,
            ),
            wind_m_s: optional(
                &forcing.wind,
                "wind",
                volatilization && config.lake,
                steps,
                units,
                Quantity::Wind,
            ),
            precipitation_ft: optional(
                &forcing.precipitation,
                "precipitation",
                wet,
                steps,
                units,
                Quantity::Precipitation,
            ),
            area_ft2: optional(
                &forcing.surface_area,
                "surface_area",
                deposition,
                steps,
                units,
                Quantity::Area,
            ),
        };

        let env_sources = &config.environment;
        let env_series = &forcing.environment;
        let mut environmental = |source: &Source,
                                 series: &Option<Vec<f64>>,
                                 needed: bool,
                                 diagnostic: Diagnostic| {
            match resolve(source, series.as_deref(), &calendar.months) {
                Some(values) => values,
                None => {
                    if needed {
                        counts.record(diagnostic);
                        warn!("{}; substituting zeros", diagnostic.message());
                    }
                    vec![0.0; steps]
                }
            }
        };
        let water_temperature = environmental(
            &env_sources.water_temperature,
            &env_series.water_temperature,
            reactive,
            Diagnostic::MissingWaterTemperature,
        );
        let ph = environmental(
            &env_sources.ph,
            &env_series.ph,
            any(|c| c.hydrolysis.is_some()),
            Diagnostic::MissingPh,
        );
        let oxidant = environmental(
            &env_sources.oxidant,
            &env_series.oxidant,
            any(|c| c.oxidation.is_some()),
            Diagnostic::MissingOxidant,
        );
        let cloud_cover = environmental(
            &env_sources.cloud_cover,
            &env_series.cloud_cover,
            photolysis,
            Diagnostic::MissingCloudCover,
        );
        let sediment_concentration = environmental(
            &env_sources.sediment_concentration,
            &env_series.sediment_concentration,
            photolysis,
            Diagnostic::MissingSedimentConcentration,
        );
        let phytoplankton = environmental(
            &env_sources.phytoplankton,
            &env_series.phytoplankton,
            photolysis,
            Diagnostic::MissingPhytoplankton,
        );

        let interval_hours = config.interval_hours();
        let bucket = if photolysis {
            Some(if config.strict_light_table {
                LatitudeBucket::for_latitude(config.latitude)?
            } else {
                LatitudeBucket::clamped(config.latitude)
            })
        } else {
            None
        };
        let environment = Environment {
            temperature_offset: water_temperature
                .iter()
                .map(|&t| temperature_offset(units.temperature_to_celsius(t)))
                .collect(),
            ph,
            oxidant,
            cloud_cover,
            sediment_concentration,
            phytoplankton,
            seasons: calendar
                .months
                .iter()
                .map(|&m| Season::for_month(m, config.latitude))
                .collect(),
            diurnal: calendar
                .hours
                .iter()
                .map(|&h| Diurnal::at(h, interval_hours))
                .collect(),
            bucket,
        };

        let reaeration = volatilization.then(|| reaeration(config));

        let sediment = if any(|c| c.sediment.is_some()) {
            Some(match &forcing.sediment {
                Some(sed) => sediment_plan(sed, config.exits, units),
                None => zero_sediment(steps, config.exits),
            })
        } else {
            None
        };

        let coupling = config
            .coupling
            .clone()
            .unwrap_or_else(|| CouplingMatrix::new(constituents.len()));

        let compiled = constituents
            .iter()
            .zip(&forcing.constituents)
            .enumerate()
            .map(|(i, (c, f))| {
                let has_parents = coupling.has_parents(ConstituentId(i as u32));
                constituent_plan(config, c, f, &calendar, steps, has_parents)
            })
            .collect();

        let plan = RunPlan {
            name: config.name.clone(),
            units,
            steps,
            exits: config.exits,
            interval_hours,
            lake: config.lake,
            hydraulics,
            environment,
            reaeration,
            sediment,
            constituents: compiled,
            coupling,
        };
        Ok((plan, counts))
    }

    /// Number of intervals.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of exits.
    pub fn exits(&self) -> usize {
        self.exits
    }

    /// Constituent names in processing order.
    pub fn constituent_names(&self) -> impl Iterator<Item = &str> {
        self.constituents.iter().map(|c| c.name.as_str())
    }
}

fn raise(counts: &mut ErrorCounts, diagnostic: Diagnostic, constituent: &str) {
    counts.record(diagnostic);
    warn!("{}: {}; substituting zeros", constituent, diagnostic.message());
}

fn check_forcing(config: &ReachConfig, forcing: &ReachForcing) -> Result<(), ConfigError> {
    if forcing.outflow.len() != config.exits {
        return Err(ConfigError::ExitCount {
            expected: config.exits,
            actual: forcing.outflow.len(),
        });
    }
    if forcing.constituents.len() != config.constituents.len() {
        return Err(ConfigError::ConstituentCount {
            expected: config.constituents.len(),
            actual: forcing.constituents.len(),
        });
    }
    if let Some(sed) = &forcing.sediment {
        if config.exits > 1 && sed.exit_outflow.len() != config.exits {
            return Err(ConfigError::ExitCount {
                expected: config.exits,
                actual: sed.exit_outflow.len(),
            });
        }
    }
    let steps = forcing.steps();
    check_values("volume", &forcing.volume)?;
    for (name, values) in forcing.named_series() {
        if values.len() != steps {
            return Err(ConfigError::SeriesLength {
                series: name,
                expected: steps,
                actual: values.len(),
            });
        }
        check_values(&name, values)?;
    }
    Ok(())
}

fn check_values(name: &str, values: &[f64]) -> Result<(), ConfigError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(step) => Err(ConfigError::NonFiniteInput {
            series: name.to_string(),
            step,
        }),
        None => Ok(()),
    }
}

fn scaled(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|v| v * factor).collect()
}

fn optional(
    series: &Option<Vec<f64>>,
    name: &str,
    needed: bool,
    steps: usize,
    units: UnitSystem,
    quantity: Quantity,
) -> Vec<f64> {
    match series {
        Some(values) => scaled(values, units.factor(quantity)),
        None => {
            if needed {
                warn!("{name} series not supplied; substituting zeros");
            }
            vec![0.0; steps]
        }
    }
}

fn exit_totals(
    forcing: &ReachForcing,
    units: UnitSystem,
    side: impl Fn(&crate::forcing::ExitOutflow) -> &Vec<f64>,
) -> Vec<f64> {
    let factor = units.factor(Quantity::Volume);
    (0..forcing.steps())
        .map(|t| forcing.outflow.iter().map(|e| side(e)[t]).sum::<f64>() * factor)
        .collect()
}

fn step_major(
    forcing: &ReachForcing,
    units: UnitSystem,
    side: impl Fn(&crate::forcing::ExitOutflow) -> &Vec<f64>,
) -> Vec<f64> {
    let factor = units.factor(Quantity::Volume);
    let mut out = Vec::with_capacity(forcing.steps() * forcing.outflow.len());
    for t in 0..forcing.steps() {
        out.extend(forcing.outflow.iter().map(|e| side(e)[t] * factor));
    }
    out
}

fn resolve(source: &Source, series: Option<&[f64]>, months: &[u32]) -> Option<Vec<f64>> {
    match source {
        Source::Series => series.map(<[f64]>::to_vec),
        Source::Constant(v) => Some(vec![*v; months.len()]),
        Source::Monthly(by_month) => Some(
            months
                .iter()
                .map(|&m| by_month[(m.clamp(1, 12) - 1) as usize])
                .collect(),
        ),
    }
}

fn reaeration(config: &ReachConfig) -> Reaeration {
    let tcginv = config.reaeration_theta;
    let units = config.units;
    if config.lake {
        return Reaeration::Lake {
            cforea: config.cforea,
            tcginv,
        };
    }
    match config.stream_reaeration {
        StreamReaeration::Tsivoglou {
            reakt,
            length,
            drop,
        } => Reaeration::Tsivoglou {
            reakt: reakt / units.factor(Quantity::Depth),
            tcginv,
            length_ft: units.to_internal(Quantity::ReachLength, length),
            drop_ft: units.to_internal(Quantity::Depth, drop),
        },
        StreamReaeration::Empirical => Reaeration::Empirical { tcginv },
        StreamReaeration::Power {
            reak,
            exprev,
            expred,
        } => Reaeration::Power {
            reak,
            exprev,
            expred,
            tcginv,
        },
    }
}

fn sediment_plan(sed: &SedimentForcing, exits: usize, units: UnitSystem) -> SedimentPlan {
    let factor = units.factor(Quantity::SedimentMass);
    let steps = sed.storage[SedimentClass::SuspendedSand].len();
    let exit_outflow = ByFraction::splat(()).map(|fraction, ()| {
        let mut out = Vec::with_capacity(steps * exits);
        for t in 0..steps {
            if exits > 1 {
                out.extend(sed.exit_outflow.iter().map(|e| e[fraction][t] * factor));
            } else {
                out.push(sed.outflow[fraction][t] * factor);
            }
        }
        out
    });
    SedimentPlan {
        initial_storage: sed.initial_storage.map(|_, v| v * factor),
        storage: BySediment(std::array::from_fn(|i| {
            scaled(&sed.storage.0[i], factor)
        })),
        deposition: ByFraction(std::array::from_fn(|i| scaled(&sed.deposition.0[i], factor))),
        outflow: ByFraction(std::array::from_fn(|i| scaled(&sed.outflow.0[i], factor))),
        exit_outflow,
    }
}

fn zero_sediment(steps: usize, exits: usize) -> SedimentPlan {
    SedimentPlan {
        initial_storage: BySediment::splat(0.0),
        storage: BySediment(std::array::from_fn(|_| vec![0.0; steps])),
        deposition: ByFraction(std::array::from_fn(|_| vec![0.0; steps])),
        outflow: ByFraction(std::array::from_fn(|_| vec![0.0; steps])),
        exit_outflow: ByFraction(std::array::from_fn(|_| vec![0.0; steps * exits])),
    }
}

fn constituent_plan(
    config: &ReachConfig,
    c: &ConstituentConfig,
    forcing: &ConstituentForcing,
    calendar: &StepCalendar,
    steps: usize,
    has_parents: bool,
) -> ConstituentPlan {
    let units = config.units;
    let conv = units.to_internal(Quantity::Conv, c.conv);
    let seconds = config.interval_minutes * 60.0;
    let days = config.interval_minutes / 1440.0;
    let hours = config.interval_hours();

    let kinetics = DissolvedKinetics {
        hydrolysis: c.hydrolysis.map(|p| Hydrolysis {
            ka: p.ka * seconds,
            kb: p.kb * seconds,
            kn: p.kn * seconds,
            theta: p.theta,
        }),
        oxidation: c.oxidation.map(|p| Oxidation {
            kox: p.kox * seconds,
            theta: p.theta,
        }),
        photolysis: c.photolysis.map(|p| Photolysis {
            absorption: p.absorption,
            quantum_yield: p.quantum_yield,
            theta: p.theta,
            scale: p.cfsaex * hours / 24.0,
        }),
        volatilization: c.volatilization.map(|p| Volatilization { cfgas: p.cfgas }),
        biodegradation: c.biodegradation.map(|p| Biodegradation {
            biocon: p.biocon * days,
            theta: p.theta,
        }),
        generic: c.generic_decay.map(|p| GenericDecay {
            rate: p.rate * days,
            theta: p.theta,
        }),
    };
    let extinction = c.photolysis.map(|p| LightExtinction {
        alpha: p.alpha,
        gamma: p.gamma,
        delta: p.delta,
        cloud_factor: p.cloud_factor,
    });
    let sorbed = c.sediment.map(|p| SorbedPlan {
        rates: SorptionRates {
            kd: p.kd,
            rate: p.adsorption_rate.map(|_, r| r * days),
            theta: p.adsorption_theta,
        },
        suspended_decay: SorbedDecayRate {
            rate: p.suspended_decay * days,
            theta: p.suspended_decay_theta,
        },
        bed_decay: SorbedDecayRate {
            rate: p.bed_decay * days,
            theta: p.bed_decay_theta,
        },
        initial_sorbed: p.initial_sorbed,
    });

    let inflow = match &forcing.inflow {
        Some(values) => scaled(values, conv),
        None => vec![0.0; steps],
    };
    let sorbed_inflow = ByFraction(std::array::from_fn(|i| match &forcing.sorbed_inflow {
        Some(by_fraction) if c.sediment.is_some() => scaled(&by_fraction.0[i], conv),
        _ => vec![0.0; steps],
    }));
    if forcing.sorbed_inflow.is_some() && c.sediment.is_none() {
        warn!(
            "{}: sorbed inflow supplied for a constituent without sediment association; ignored",
            c.name
        );
    }

    let per_constituent = |source: &Source, series: &Option<Vec<f64>>, what: &str| {
        resolve(source, series.as_deref(), &calendar.months).unwrap_or_else(|| {
            warn!("{}: {what} series not supplied; substituting zeros", c.name);
            vec![0.0; steps]
        })
    };
    let deposition = if c.dry_deposition.is_some() || c.wet_deposition.is_some() {
        let flux_factor = units.factor(Quantity::DepositionFlux) * days;
        let dry = match &c.dry_deposition {
            Some(source) => scaled(
                &per_constituent(source, &forcing.dry_deposition, "dry deposition"),
                flux_factor,
            ),
            None => vec![0.0; steps],
        };
        let wet = match &c.wet_deposition {
            Some(source) => per_constituent(source, &forcing.wet_deposition, "wet deposition"),
            None => vec![0.0; steps],
        };
        Some(DepositionPlan { dry, wet })
    } else {
        None
    };
    let biomass = match &c.biodegradation {
        Some(p) => per_constituent(&p.biomass, &forcing.biomass, "biomass"),
        None => vec![0.0; steps],
    };

    ConstituentPlan {
        name: c.name.clone(),
        conv,
        initial_concentration: c.initial_concentration,
        kinetics,
        extinction,
        sorbed,
        produces: c.daughter_of,
        has_parents,
        inflow,
        sorbed_inflow,
        deposition,
        biomass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenericDecayParams, PhotolysisParams, SedimentParams, VolatilizationParams};
    use crate::forcing::ExitOutflow;

    fn forcing(steps: usize, constituents: usize) -> ReachForcing {
        ReachForcing {
            volume: vec![1.0; steps],
            outflow: vec![ExitOutflow {
                start: vec![0.0; steps],
                end: vec![0.0; steps],
            }],
            depth: Some(vec![2.0; steps]),
            velocity: Some(vec![1.0; steps]),
            constituents: vec![ConstituentForcing::default(); constituents],
            ..Default::default()
        }
    }

    fn reach(c: ConstituentConfig) -> ReachConfig {
        ReachConfig::new("plan", UnitSystem::English).with_constituent(c)
    }

    #[test]
    fn rates_are_scaled_to_the_interval() {
        let cfg = reach(
            ConstituentConfig::new("x", 2.0).with_generic_decay(GenericDecayParams::new(0.24)),
        );
        let (plan, counts) = RunPlan::compile(&cfg, &forcing(3, 1)).unwrap();
        assert!(counts.is_clean());
        let generic = plan.constituents[0].kinetics.generic.unwrap();
        assert!((generic.rate - 0.01).abs() < 1e-12);
        assert_eq!(plan.hydraulics.volume, vec![43_560.0; 3]);
    }

    #[test]
    fn series_length_mismatch_is_fatal() {
        let cfg = reach(ConstituentConfig::new("x", 1.0));
        let mut f = forcing(3, 1);
        f.depth = Some(vec![1.0; 2]);
        assert!(matches!(
            RunPlan::compile(&cfg, &f),
            Err(ConfigError::SeriesLength { series, expected: 3, actual: 2 }) if series == "depth"
        ));
    }

    #[test]
    fn non_finite_input_is_fatal() {
        let cfg = reach(ConstituentConfig::new("x", 1.0));
        let mut f = forcing(3, 1);
        f.volume[1] = f64::NAN;
        assert!(matches!(
            RunPlan::compile(&cfg, &f),
            Err(ConfigError::NonFiniteInput { step: 1, .. })
        ));
    }

    #[test]
    fn missing_series_raise_diagnostics() {
        let mut cfg = reach(
            ConstituentConfig::new("x", 1.0)
                .with_photolysis(PhotolysisParams::default())
                .with_volatilization(VolatilizationParams { cfgas: 1.0 })
                .with_sediment(SedimentParams::default()),
        );
        cfg.environment.ph = Source::Series;
        cfg.environment.cloud_cover = Source::Series;
        let mut f = forcing(2, 1);
        f.depth = None;
        f.velocity = None;
        let (plan, counts) = RunPlan::compile(&cfg, &f).unwrap();
        assert_eq!(counts.count(Diagnostic::SedimentTransportInactive), 1);
        assert_eq!(counts.count(Diagnostic::PhotolysisWithoutDepth), 1);
        assert_eq!(counts.count(Diagnostic::StreamVolatilizationWithoutVelocity), 1);
        assert_eq!(counts.count(Diagnostic::MissingCloudCover), 1);
        // pH is only needed for hydrolysis.
        assert_eq!(counts.count(Diagnostic::MissingPh), 0);
        assert_eq!(plan.environment.cloud_cover, vec![0.0; 2]);
        assert!(plan.sediment.is_some());
    }

    #[test]
    fn monthly_sources_follow_the_calendar() {
        let mut cfg = reach(
            ConstituentConfig::new("x", 1.0)
                .with_hydrolysis(crate::config::HydrolysisParams::default()),
        );
        let mut monthly = [7.0; 12];
        monthly[0] = 6.5;
        monthly[1] = 8.0;
        cfg.environment.ph = Source::Monthly(monthly);
        cfg.interval_minutes = 1440.0 * 31.0;
        let (plan, _) = RunPlan::compile(&cfg, &forcing(2, 1)).unwrap();
        assert_eq!(plan.environment.ph, vec![6.5, 8.0]);
    }

    #[test]
    fn exit_count_must_match() {
        let mut cfg = reach(ConstituentConfig::new("x", 1.0));
        cfg.exits = 2;
        assert_eq!(
            RunPlan::compile(&cfg, &forcing(1, 1)).err(),
            Some(ConfigError::ExitCount {
                expected: 2,
                actual: 1
            })
        );
    }
}
