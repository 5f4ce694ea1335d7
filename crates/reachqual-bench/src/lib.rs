//! Benchmark profiles for the reachqual engine.
//!
//! - [`reference_profile`]: one year of hourly steps, full kinetics, sediment
//!   and three exits
//! - [`stress_profile`]: a long parent/daughter chain on the reference hydrology
//! - [`batch_profile`]: many small independent reaches for [`run_batch`]
//!
//! [`run_batch`]: reachqual_engine::run_batch

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use reachqual_core::coupling::CouplingMatrix;
use reachqual_core::id::ConstituentId;
use reachqual_core::process::DecayProcess;
use reachqual_engine::{
    ConstituentConfig, GenericDecayParams, ReachConfig, ReachForcing, ReachJob,
};
use reachqual_test_utils::fixtures;

/// Hourly steps in a non-leap year.
pub const YEAR_HOURS: usize = 8760;

/// Smooth daily and seasonal swing in `[1 - amplitude, 1 + amplitude]`.
fn swing(t: usize, amplitude: f64) -> f64 {
    let day = (t as f64 / 24.0) * std::f64::consts::TAU;
    let season = (t as f64 / YEAR_HOURS as f64) * std::f64::consts::TAU;
    1.0 + amplitude * (0.3 * day.sin() + 0.7 * season.cos())
}

/// Vary the hydrology of `forcing` so no two steps are alike.
fn vary(mut forcing: ReachForcing) -> ReachForcing {
    let steps = forcing.steps();
    forcing.volume = (0..steps)
        .map(|t| fixtures::VOLUME * swing(t, 0.4))
        .collect();
    for exit in &mut forcing.outflow {
        for t in 0..steps {
            let k = swing(t + 11, 0.5);
            exit.start[t] *= k;
            exit.end[t] *= k;
        }
    }
    forcing.depth = Some((0..steps).map(|t| 3.0 * swing(t, 0.4)).collect());
    forcing
}

/// Build the reference profile: `steps` hourly intervals of the
/// full-kinetics reach (six dissolved processes, sediment, deposition and
/// a daughter) with three exits and varying hydrology.
pub fn reference_profile(steps: usize) -> (ReachConfig, ReachForcing) {
    let (mut config, _) = fixtures::full_kinetics(steps);
    config.exits = 3;
    let (_, sorbing) = fixtures::sorbing(steps, 3);
    let (_, full) = fixtures::full_kinetics(steps);
    let forcing = ReachForcing {
        outflow: sorbing.outflow,
        sediment: sorbing.sediment,
        ..full
    };
    (config, vary(forcing))
}

/// Build the stress profile: a chain of `length` constituents, each the
/// daughter of the one before it, on the reference hydrology.
pub fn stress_profile(steps: usize, length: usize) -> (ReachConfig, ReachForcing) {
    let mut config = fixtures::reach("chain", 1);
    let mut coupling = CouplingMatrix::new(length);
    for i in 0..length {
        let mut c = ConstituentConfig::new(format!("c{i}"), 1.0)
            .with_initial_concentration(1.0e-4)
            .with_generic_decay(GenericDecayParams::new(0.2 + 0.1 * i as f64));
        if i > 0 {
            c = c.with_daughter_of(DecayProcess::GenericDecay);
            coupling
                .set(ConstituentId(i as u32 - 1), ConstituentId(i as u32), 0.9)
                .expect("chain ids increase");
        }
        config = config.with_constituent(c);
    }
    config.coupling = Some(coupling);
    let forcing = fixtures::flow_through(steps, 1, length).inflow(0, 5.0).build();
    (config, vary(forcing))
}

/// Build `reaches` independent jobs alternating between a tracer, a
/// decaying chain and a sorbing reach.
pub fn batch_profile(reaches: usize, steps: usize) -> Vec<ReachJob> {
    (0..reaches)
        .map(|i| {
            let (mut config, forcing) = match i % 3 {
                0 => fixtures::tracer(steps),
                1 => fixtures::parent_daughter(steps),
                _ => fixtures::sorbing(steps, 1),
            };
            config.name = format!("reach-{i}");
            ReachJob {
                config,
                forcing: vary(forcing),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reachqual_engine::run;

    #[test]
    fn profiles_run_clean() {
        let (config, forcing) = reference_profile(48);
        let result = run(&config, &forcing).unwrap();
        assert!(result.diagnostics.is_clean(), "{}", result.diagnostics);
        assert_eq!(result.constituents[0].exits.len(), 3);

        let (config, forcing) = stress_profile(24, 8);
        let result = run(&config, &forcing).unwrap();
        assert_eq!(result.constituents.len(), 8);
        assert!(result.constituents[7].daughter_gain.iter().any(|&g| g > 0.0));
    }

    #[test]
    fn batch_profile_names_are_unique() {
        let jobs = batch_profile(6, 4);
        let mut names: Vec<&str> = jobs.iter().map(|j| j.config.name.as_str()).collect();
        names.dedup();
        assert_eq!(names.len(), 6);
    }
}
