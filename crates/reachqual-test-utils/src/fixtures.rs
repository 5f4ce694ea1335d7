//! Canned reaches for integration tests and benchmarks.
//!
//! All fixtures use English units: volumes in acre-ft, depth in ft,
//! hourly intervals, conv 1.

use reachqual_core::coupling::CouplingMatrix;
use reachqual_core::id::ConstituentId;
use reachqual_core::process::DecayProcess;
use reachqual_core::sediment::BySediment;
use reachqual_core::units::UnitSystem;
use reachqual_engine::{
    BiodegradationParams, ConstituentConfig, GenericDecayParams, HydrolysisParams,
    OxidationParams, PhotolysisParams, ReachConfig, ReachForcing, SedimentParams, Source,
    VolatilizationParams,
};

use crate::ForcingBuilder;

/// Reach volume used by the flow-through fixtures (acre-ft).
pub const VOLUME: f64 = 10.0;

/// A 10 acre-ft reach passing 1 acre-ft per interval, half at the start
/// concentration and half at the end concentration.
pub fn flow_through(steps: usize, exits: usize, constituents: usize) -> ForcingBuilder {
    let mut builder = ForcingBuilder::new(steps, exits, constituents).volume(VOLUME);
    for exit in 0..exits {
        let share = 1.0 / exits as f64;
        builder = builder.outflow(exit, 0.5 * share, 0.5 * share);
    }
    builder
}

/// Reach configuration named `name` holding `VOLUME` at the start.
pub fn reach(name: &str, exits: usize) -> ReachConfig {
    let mut config = ReachConfig::new(name, UnitSystem::English);
    config.initial_volume = VOLUME;
    config.exits = exits;
    config
}

/// A conservative tracer with a constant inflow of 5 qty per interval.
pub fn tracer(steps: usize) -> (ReachConfig, ReachForcing) {
    let config = reach("tracer", 1)
        .with_constituent(ConstituentConfig::new("tracer", 1.0).with_initial_concentration(1.0e-4));
    let forcing = flow_through(steps, 1, 1).inflow(0, 5.0).build();
    (config, forcing)
}

/// A decaying parent feeding a conservative daughter through generic
/// decay with full conversion.
pub fn parent_daughter(steps: usize) -> (ReachConfig, ReachForcing) {
    let coupling = CouplingMatrix::new(2)
        .with(ConstituentId(0), ConstituentId(1), 1.0)
        .expect("0 -> 1 is topological");
    let config = reach("chain", 1)
        .with_constituent(
            ConstituentConfig::new("parent", 1.0)
                .with_initial_concentration(2.0e-4)
                .with_generic_decay(GenericDecayParams::new(2.4)),
        )
        .with_constituent(
            ConstituentConfig::new("daughter", 1.0)
                .with_daughter_of(DecayProcess::GenericDecay),
        )
        .with_coupling(coupling);
    let forcing = flow_through(steps, 1, 2).inflow(0, 2.0).build();
    (config, forcing)
}

/// Sediment parameters with partitioning onto every class.
pub fn sorbing_params() -> SedimentParams {
    SedimentParams {
        kd: BySediment([0.5, 1.0, 2.0, 0.5, 1.0, 2.0]),
        adsorption_rate: BySediment::splat(5.0),
        suspended_decay: 0.1,
        bed_decay: 0.05,
        ..SedimentParams::default()
    }
}

/// A sediment-associated constituent in a reach with steady suspended
/// and bed sediment, net deposition and sediment outflow.
pub fn sorbing(steps: usize, exits: usize) -> (ReachConfig, ReachForcing) {
    let config = reach("sorbing", exits).with_constituent(
        ConstituentConfig::new("pcb", 1.0)
            .with_initial_concentration(1.0e-4)
            .with_sediment(sorbing_params()),
    );
    let forcing = flow_through(steps, exits, 1)
        .inflow(0, 3.0)
        .sorbed_inflow(0, [0.5, 0.5, 1.0])
        .sediment(
            [20.0, 30.0, 40.0, 500.0, 600.0, 700.0],
            [0.5, 0.3, 0.1],
            [1.0, 1.5, 2.0],
        )
        .build();
    (config, forcing)
}

/// Every dissolved process, sediment association and atmospheric
/// deposition on one constituent with a daughter.
pub fn full_kinetics(steps: usize) -> (ReachConfig, ReachForcing) {
    let mut photolysis = PhotolysisParams {
        quantum_yield: 0.01,
        ..PhotolysisParams::default()
    };
    photolysis.absorption = [500.0; 18];
    photolysis.alpha = [0.08; 18];
    photolysis.gamma = [0.01; 18];
    photolysis.cloud_factor = [0.5; 18];

    let parent = ConstituentConfig::new("pesticide", 1.0)
        .with_initial_concentration(1.0e-4)
        .with_hydrolysis(HydrolysisParams {
            ka: 1.0e-3,
            kb: 1.0e-2,
            kn: 1.0e-7,
            ..HydrolysisParams::default()
        })
        .with_oxidation(OxidationParams {
            kox: 1.0e3,
            ..OxidationParams::default()
        })
        .with_photolysis(photolysis)
        .with_volatilization(VolatilizationParams { cfgas: 0.3 })
        .with_biodegradation(BiodegradationParams {
            biocon: 1.0e-3,
            biomass: Source::Constant(10.0),
            ..BiodegradationParams::default()
        })
        .with_generic_decay(GenericDecayParams::new(0.1))
        .with_sediment(sorbing_params())
        .with_dry_deposition(Source::Constant(0.01))
        .with_wet_deposition(Source::Constant(0.002));
    let metabolite = ConstituentConfig::new("metabolite", 1.0)
        .with_daughter_of(DecayProcess::Hydrolysis)
        .with_daughter_of(DecayProcess::Biodegradation);
    let coupling = CouplingMatrix::new(2)
        .with(ConstituentId(0), ConstituentId(1), 0.8)
        .expect("0 -> 1 is topological");

    let mut config = reach("full", 1)
        .with_constituent(parent)
        .with_constituent(metabolite)
        .with_coupling(coupling);
    config.environment.oxidant = Source::Constant(1.0e-9);
    config.environment.cloud_cover = Source::Constant(3.0);

    let forcing = flow_through(steps, 1, 2)
        .inflow(0, 4.0)
        .sorbed_inflow(0, [0.2, 0.2, 0.4])
        .sediment(
            [20.0, 30.0, 40.0, 500.0, 600.0, 700.0],
            [0.5, -0.2, 0.1],
            [1.0, 1.5, 2.0],
        )
        .surface_area(5.0)
        .precipitation(0.01)
        .build();
    (config, forcing)
}
