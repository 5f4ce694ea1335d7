//! Input time series for one reach run.
//!
//! Every series holds one value per interval in the units of the reach's
//! [`UnitSystem`](reachqual_core::units::UnitSystem). Optional series are
//! only needed when a configured process reads them; a missing series that
//! a process needs is replaced with zeros and reported as a diagnostic.

use reachqual_core::sediment::{ByFraction, BySediment, SedimentClass, SizeFraction};

/// Outflow volumes through one exit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExitOutflow {
    /// Volume leaving at the start-of-interval concentration.
    pub start: Vec<f64>,
    /// Volume leaving at the end-of-interval concentration.
    pub end: Vec<f64>,
}

/// Reach-wide environmental series, used by [`Source::Series`](crate::Source::Series).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvironmentSeries {
    /// Water temperature.
    pub water_temperature: Option<Vec<f64>>,
    /// pH.
    pub ph: Option<Vec<f64>>,
    /// Free radical oxygen.
    pub oxidant: Option<Vec<f64>>,
    /// Cloud cover in tenths.
    pub cloud_cover: Option<Vec<f64>>,
    /// Suspended sediment concentration for light extinction.
    pub sediment_concentration: Option<Vec<f64>>,
    /// Phytoplankton.
    pub phytoplankton: Option<Vec<f64>>,
}

/// Sediment state produced by the sediment transport section.
///
/// Storage is at the end of each interval; fluxes are per interval.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SedimentForcing {
    /// Storage of each class at the start of the run.
    pub initial_storage: BySediment<f64>,
    /// Storage of each class.
    pub storage: BySediment<Vec<f64>>,
    /// Net deposition (positive) or scour (negative) per fraction.
    pub deposition: ByFraction<Vec<f64>>,
    /// Suspended sediment leaving the reach per fraction.
    pub outflow: ByFraction<Vec<f64>>,
    /// Suspended sediment leaving through each exit. Only read when the
    /// reach has more than one exit.
    pub exit_outflow: Vec<ByFraction<Vec<f64>>>,
}

/// Inputs specific to one constituent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstituentForcing {
    /// Dissolved inflow (qty per interval).
    pub inflow: Option<Vec<f64>>,
    /// Sorbed inflow per fraction (qty per interval).
    pub sorbed_inflow: Option<ByFraction<Vec<f64>>>,
    /// Dry deposition flux, for [`Source::Series`](crate::Source::Series).
    pub dry_deposition: Option<Vec<f64>>,
    /// Rain concentration, for [`Source::Series`](crate::Source::Series).
    pub wet_deposition: Option<Vec<f64>>,
    /// Active biomass, for [`Source::Series`](crate::Source::Series).
    pub biomass: Option<Vec<f64>>,
}

/// Every input series for one reach run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReachForcing {
    /// Volume at the end of each interval.
    pub volume: Vec<f64>,
    /// Outflow through each exit.
    pub outflow: Vec<ExitOutflow>,
    /// Average depth.
    pub depth: Option<Vec<f64>>,
    /// Average velocity.
    pub velocity: Option<Vec<f64>>,
    /// Wind speed over a lake.
    pub wind: Option<Vec<f64>>,
    /// Precipitation depth per interval.
    pub precipitation: Option<Vec<f64>>,
    /// Water surface area.
    pub surface_area: Option<Vec<f64>>,
    /// Environmental series.
    pub environment: EnvironmentSeries,
    /// Sediment transport state; `None` when sediment transport is not run.
    pub sediment: Option<SedimentForcing>,
    /// Per-constituent inputs, in configuration order.
    pub constituents: Vec<ConstituentForcing>,
}

impl ReachForcing {
    /// Number of intervals, taken from the volume series.
    pub fn steps(&self) -> usize {
        self.volume.len()
    }

    /// Every supplied series with its name, for length checks.
    pub(crate) fn named_series(&self) -> Vec<(String, &[f64])> {
        let mut out: Vec<(String, &[f64])> = Vec::new();
        for (n, exit) in self.outflow.iter().enumerate() {
            out.push((format!("outflow[{n}].start"), exit.start.as_slice()));
            out.push((format!("outflow[{n}].end"), exit.end.as_slice()));
        }
        let optional = [
            ("depth", &self.depth),
            ("velocity", &self.velocity),
            ("wind", &self.wind),
            ("precipitation", &self.precipitation),
            ("surface_area", &self.surface_area),
            ("water_temperature", &self.environment.water_temperature),
            ("ph", &self.environment.ph),
            ("oxidant", &self.environment.oxidant),
            ("cloud_cover", &self.environment.cloud_cover),
            ("sediment_concentration", &self.environment.sediment_concentration),
            ("phytoplankton", &self.environment.phytoplankton),
        ];
        for (name, series) in optional {
            if let Some(values) = series {
                out.push((name.to_string(), values.as_slice()));
            }
        }
        if let Some(sed) = &self.sediment {
            for class in SedimentClass::ALL {
                out.push((
                    format!("sediment.storage[{class}]"),
                    sed.storage[class].as_slice(),
                ));
            }
            for fraction in SizeFraction::ALL {
                out.push((
                    format!("sediment.deposition[{fraction}]"),
                    sed.deposition[fraction].as_slice(),
                ));
                out.push((
                    format!("sediment.outflow[{fraction}]"),
                    sed.outflow[fraction].as_slice(),
                ));
                for (n, exit) in sed.exit_outflow.iter().enumerate() {
                    out.push((
                        format!("sediment.exit_outflow[{n}][{fraction}]"),
                        exit[fraction].as_slice(),
                    ));
                }
            }
        }
        for (i, c) in self.constituents.iter().enumerate() {
            let optional = [
                ("inflow", &c.inflow),
                ("dry_deposition", &c.dry_deposition),
                ("wet_deposition", &c.wet_deposition),
                ("biomass", &c.biomass),
            ];
            for (name, series) in optional {
                if let Some(values) = series {
                    out.push((format!("constituents[{i}].{name}"), values.as_slice()));
                }
            }
            if let Some(sorbed) = &c.sorbed_inflow {
                for fraction in SizeFraction::ALL {
                    out.push((
                        format!("constituents[{i}].sorbed_inflow[{fraction}]"),
                        sorbed[fraction].as_slice(),
                    ));
                }
            }
        }
        out
    }
}
