//! Preallocated output series and mass-balance summaries.
//!
//! Every series has one slot per step and is written exactly once by the
//! driver. Concentrations are reported as computed (the undefined sentinel
//! marks a dry reach or an absent sediment class); masses and fluxes are
//! reported in quantity units.

use indexmap::IndexMap;
use reachqual_core::process::{ByProcess, DecayProcess};
use reachqual_core::sediment::{ByFraction, BySediment, SedimentClass, SizeFraction};

/// Outflow through one exit.
#[derive(Clone, Debug, PartialEq)]
pub struct ExitSeries {
    /// Dissolved outflow.
    pub dissolved: Vec<f64>,
    /// Sorbed outflow per size fraction.
    pub sorbed: ByFraction<Vec<f64>>,
    /// Total sorbed outflow.
    pub sorbed_total: Vec<f64>,
    /// Dissolved plus sorbed outflow.
    pub total: Vec<f64>,
}

impl ExitSeries {
    fn new(steps: usize) -> Self {
        Self {
            dissolved: vec![0.0; steps],
            sorbed: ByFraction(std::array::from_fn(|_| vec![0.0; steps])),
            sorbed_total: vec![0.0; steps],
            total: vec![0.0; steps],
        }
    }
}

/// Sediment-associated series of one constituent.
#[derive(Clone, Debug, PartialEq)]
pub struct SorbedSeries {
    /// Sorbed concentration per class.
    pub concentration: BySediment<Vec<f64>>,
    /// Net adsorption flux per class (positive onto sediment).
    pub adsorption: BySediment<Vec<f64>>,
    /// Sum of `adsorption`.
    pub adsorption_total: Vec<f64>,
    /// Sorbed decay per class.
    pub decay: BySediment<Vec<f64>>,
    /// Sum of `decay`.
    pub decay_total: Vec<f64>,
    /// Sorbed mass deposited (positive) or scoured (negative) per fraction.
    pub deposition: ByFraction<Vec<f64>>,
    /// Sum of `deposition`.
    pub deposition_total: Vec<f64>,
    /// Sorbed outflow per fraction.
    pub outflow: ByFraction<Vec<f64>>,
    /// Sum of `outflow`.
    pub outflow_total: Vec<f64>,
    /// Sorbed inflow per fraction.
    pub inflow: ByFraction<Vec<f64>>,
    /// Sum of `inflow`.
    pub inflow_total: Vec<f64>,
    /// Sorbed storage per class.
    pub storage: BySediment<Vec<f64>>,
    /// Storage on suspended sediment.
    pub suspended_storage: Vec<f64>,
    /// Storage on bed sediment.
    pub bed_storage: Vec<f64>,
    /// Suspended plus bed storage per fraction.
    pub fraction_storage: ByFraction<Vec<f64>>,
    /// Total sorbed storage.
    pub storage_total: Vec<f64>,
}

fn classes(steps: usize) -> BySediment<Vec<f64>> {
    BySediment(std::array::from_fn(|_| vec![0.0; steps]))
}

fn fractions(steps: usize) -> ByFraction<Vec<f64>> {
    ByFraction(std::array::from_fn(|_| vec![0.0; steps]))
}

impl SorbedSeries {
    fn new(steps: usize) -> Self {
        Self {
            concentration: classes(steps),
            adsorption: classes(steps),
            adsorption_total: vec![0.0; steps],
            decay: classes(steps),
            decay_total: vec![0.0; steps],
            deposition: fractions(steps),
            deposition_total: vec![0.0; steps],
            outflow: fractions(steps),
            outflow_total: vec![0.0; steps],
            inflow: fractions(steps),
            inflow_total: vec![0.0; steps],
            storage: classes(steps),
            suspended_storage: vec![0.0; steps],
            bed_storage: vec![0.0; steps],
            fraction_storage: fractions(steps),
            storage_total: vec![0.0; steps],
        }
    }
}

/// Run totals for one constituent, in quantity units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MassBalance {
    /// Dissolved plus sorbed storage before the first step.
    pub initial_storage: f64,
    /// Dissolved plus sorbed storage after the last step.
    pub final_storage: f64,
    /// Dissolved plus sorbed inflow.
    pub inflow: f64,
    /// Atmospheric deposition.
    pub deposition: f64,
    /// Mass produced by parent decay.
    pub daughter_gain: f64,
    /// Dissolved plus sorbed outflow.
    pub outflow: f64,
    /// Dissolved decay over all processes.
    pub dissolved_decay: f64,
    /// Decay of sorbed mass.
    pub sorbed_decay: f64,
}

impl MassBalance {
    /// Final storage minus what the fluxes account for.
    pub fn residual(&self) -> f64 {
        self.final_storage
            - (self.initial_storage + self.inflow + self.deposition + self.daughter_gain
                - self.outflow
                - self.dissolved_decay
                - self.sorbed_decay)
    }

    /// `residual` relative to the largest term, or 0 for an empty balance.
    pub fn relative_residual(&self) -> f64 {
        let scale = [
            self.initial_storage,
            self.final_storage,
            self.inflow,
            self.deposition,
            self.daughter_gain,
            self.outflow,
            self.dissolved_decay,
            self.sorbed_decay,
        ]
        .into_iter()
        .fold(0.0_f64, |m, v| m.max(v.abs()));
        if scale > 0.0 {
            self.residual() / scale
        } else {
            0.0
        }
    }
}

/// Every output series of one constituent.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstituentSeries {
    /// Constituent name.
    pub name: String,
    /// Dissolved concentration.
    pub concentration: Vec<f64>,
    /// Dissolved storage.
    pub dissolved_storage: Vec<f64>,
    /// Dissolved plus sorbed storage.
    pub total_storage: Vec<f64>,
    /// External dissolved inflow, excluding atmospheric deposition.
    pub dissolved_inflow: Vec<f64>,
    /// Dissolved plus sorbed inflow.
    pub total_inflow: Vec<f64>,
    /// Dissolved outflow over all exits.
    pub dissolved_outflow: Vec<f64>,
    /// Dissolved plus sorbed outflow over all exits.
    pub total_outflow: Vec<f64>,
    /// Mass gained from parent decay.
    pub daughter_gain: Vec<f64>,
    /// Dissolved decay per process.
    pub decay: ByProcess<Vec<f64>>,
    /// Dissolved decay over all processes.
    pub decay_total: Vec<f64>,
    /// Dry atmospheric deposition.
    pub dry_deposition: Vec<f64>,
    /// Wet atmospheric deposition.
    pub wet_deposition: Vec<f64>,
    /// Total atmospheric deposition.
    pub deposition: Vec<f64>,
    /// Sediment-associated series; `None` without sediment association.
    pub sorbed: Option<SorbedSeries>,
    /// Per-exit outflow, one entry per exit.
    pub exits: Vec<ExitSeries>,
    /// Run totals.
    pub mass_balance: MassBalance,
}

impl ConstituentSeries {
    /// Zeroed series for `steps` intervals.
    pub fn new(name: impl Into<String>, steps: usize, exits: usize, sorbed: bool) -> Self {
        Self {
            name: name.into(),
            concentration: vec![0.0; steps],
            dissolved_storage: vec![0.0; steps],
            total_storage: vec![0.0; steps],
            dissolved_inflow: vec![0.0; steps],
            total_inflow: vec![0.0; steps],
            dissolved_outflow: vec![0.0; steps],
            total_outflow: vec![0.0; steps],
            daughter_gain: vec![0.0; steps],
            decay: ByProcess(std::array::from_fn(|_| vec![0.0; steps])),
            decay_total: vec![0.0; steps],
            dry_deposition: vec![0.0; steps],
            wet_deposition: vec![0.0; steps],
            deposition: vec![0.0; steps],
            sorbed: sorbed.then(|| SorbedSeries::new(steps)),
            exits: (0..exits).map(|_| ExitSeries::new(steps)).collect(),
            mass_balance: MassBalance::default(),
        }
    }

    /// Number of steps.
    pub fn steps(&self) -> usize {
        self.concentration.len()
    }

    /// Every series under its export name, in a stable order.
    ///
    /// Sediment series (`SQAL`, `ADQAL`, `SQDEC`, `DSQAL`, `ROSQAL`,
    /// `ISQAL`, `RSQAL`, `OSQAL`, `TOSQAL`) appear only for
    /// sediment-associated constituents. Exit numbers start at 1.
    pub fn named(&self) -> IndexMap<String, &[f64]> {
        let mut out: IndexMap<String, &[f64]> = IndexMap::new();
        out.insert("DQAL".into(), &self.concentration);
        out.insert("RDQAL".into(), &self.dissolved_storage);
        out.insert("RRQAL".into(), &self.total_storage);
        out.insert("IDQAL".into(), &self.dissolved_inflow);
        out.insert("TIQAL".into(), &self.total_inflow);
        out.insert("RODQAL".into(), &self.dissolved_outflow);
        out.insert("TROQAL".into(), &self.total_outflow);
        out.insert("PDQAL".into(), &self.daughter_gain);
        for process in DecayProcess::ALL {
            out.insert(
                format!("DDQAL{}", process.index() + 1),
                &self.decay[process],
            );
        }
        out.insert("DDQAL7".into(), &self.decay_total);
        out.insert("GQADDR".into(), &self.dry_deposition);
        out.insert("GQADWT".into(), &self.wet_deposition);
        out.insert("GQADEP".into(), &self.deposition);

        if let Some(s) = &self.sorbed {
            for class in SedimentClass::ALL {
                out.insert(format!("SQAL{}", class.index() + 1), &s.concentration[class]);
            }
            for class in SedimentClass::ALL {
                out.insert(format!("ADQAL{}", class.index() + 1), &s.adsorption[class]);
            }
            out.insert("ADQAL7".into(), &s.adsorption_total);
            for class in SedimentClass::ALL {
                out.insert(format!("SQDEC{}", class.index() + 1), &s.decay[class]);
            }
            out.insert("SQDEC7".into(), &s.decay_total);
            let per_fraction = [
                ("DSQAL", &s.deposition, &s.deposition_total),
                ("ROSQAL", &s.outflow, &s.outflow_total),
                ("ISQAL", &s.inflow, &s.inflow_total),
            ];
            for (prefix, by_fraction, total) in per_fraction {
                for fraction in SizeFraction::ALL {
                    out.insert(
                        format!("{prefix}{}", fraction.index() + 1),
                        &by_fraction[fraction],
                    );
                }
                out.insert(format!("{prefix}4"), total);
            }
            for fraction in SizeFraction::ALL {
                let class = SedimentClass::suspended(fraction);
                out.insert(format!("RSQAL{}", fraction.index() + 1), &s.storage[class]);
            }
            out.insert("RSQAL4".into(), &s.suspended_storage);
            for fraction in SizeFraction::ALL {
                let class = SedimentClass::bed(fraction);
                out.insert(format!("RSQAL{}", fraction.index() + 5), &s.storage[class]);
            }
            out.insert("RSQAL8".into(), &s.bed_storage);
            for fraction in SizeFraction::ALL {
                out.insert(
                    format!("RSQAL{}", fraction.index() + 9),
                    &s.fraction_storage[fraction],
                );
            }
            out.insert("RSQAL12".into(), &s.storage_total);
        }

        for (n, exit) in self.exits.iter().enumerate() {
            let n = n + 1;
            out.insert(format!("ODQAL{n}"), &exit.dissolved);
            if self.sorbed.is_some() {
                for fraction in SizeFraction::ALL {
                    out.insert(
                        format!("OSQAL{}{n}", fraction.index() + 1),
                        &exit.sorbed[fraction],
                    );
                }
                out.insert(format!("TOSQAL{n}"), &exit.sorbed_total);
            }
            out.insert(format!("TOQAL{n}"), &exit.total);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dissolved_only_names() {
        let s = ConstituentSeries::new("atrazine", 4, 2, false);
        let named = s.named();
        let keys: Vec<&str> = named.keys().map(String::as_str).collect();
        assert_eq!(keys[0], "DQAL");
        assert!(keys.contains(&"DDQAL7"));
        assert!(keys.contains(&"ODQAL2"));
        assert!(keys.contains(&"TOQAL1"));
        assert!(!keys.iter().any(|k| k.starts_with("SQAL") || k.starts_with("TOSQAL")));
        assert!(named.values().all(|v| v.len() == 4));
        // 8 scalar + 7 decay + 3 deposition + 2 per exit.
        assert_eq!(named.len(), 8 + 7 + 3 + 2 * 2);
    }

    #[test]
    fn sediment_names_follow_export_layout() {
        let s = ConstituentSeries::new("pcb", 1, 1, true);
        let named = s.named();
        for key in ["SQAL6", "ADQAL7", "SQDEC7", "DSQAL4", "ROSQAL4", "ISQAL4", "RSQAL12", "OSQAL31", "TOSQAL1"] {
            assert!(named.contains_key(key), "missing {key}");
        }
        let position = |k: &str| named.get_index_of(k).unwrap();
        assert!(position("RSQAL4") < position("RSQAL5"));
        assert!(position("RSQAL11") < position("RSQAL12"));
    }

    #[test]
    fn residual_of_balanced_run_is_zero() {
        let b = MassBalance {
            initial_storage: 10.0,
            final_storage: 12.0,
            inflow: 5.0,
            deposition: 1.0,
            daughter_gain: 0.5,
            outflow: 3.0,
            dissolved_decay: 1.0,
            sorbed_decay: 0.5,
        };
        assert!(b.residual().abs() < 1e-12);
        assert_eq!(MassBalance::default().relative_residual(), 0.0);
    }
}
