//! Integration test: parent decay products reach their daughters.
//!
//! The daughter's dissolved concentration must rise by exactly the
//! converted parent loss divided by the reach volume, beyond what the
//! daughter's own processes produce, and only through the processes the
//! daughter is flagged for.

use reachqual_core::coupling::{CouplingError, CouplingMatrix};
use reachqual_core::id::ConstituentId;
use reachqual_core::process::DecayProcess;
use reachqual_core::units::{Quantity, UnitSystem};
use reachqual_engine::{
    run, ConfigError, ConstituentConfig, GenericDecayParams, OxidationParams, RunError,
};
use reachqual_test_utils::fixtures::{self, VOLUME};

#[test]
fn daughter_gains_parent_loss_over_volume() {
    let (config, forcing) = fixtures::parent_daughter(6);
    let coupled = run(&config, &forcing).unwrap();

    let mut isolated_config = config.clone();
    isolated_config.coupling = None;
    let isolated = run(&isolated_config, &forcing).unwrap();

    let parent = coupled.constituent("parent").unwrap();
    let daughter = coupled.constituent("daughter").unwrap();
    let alone = isolated.constituent("daughter").unwrap();

    let volume_ft3 = UnitSystem::English.to_internal(Quantity::Volume, VOLUME);
    let lost = parent.decay[DecayProcess::GenericDecay][0];
    assert!(lost > 0.0);
    let rise = daughter.concentration[0] - alone.concentration[0];
    assert!(
        (rise - lost / volume_ft3).abs() < 1e-15,
        "rise {rise} vs {}",
        lost / volume_ft3
    );
    assert_eq!(daughter.daughter_gain[0], lost);
    assert!(alone.daughter_gain.iter().all(|&g| g == 0.0));
}

#[test]
fn two_qty_of_decay_raise_the_daughter_by_two_over_volume() {
    // Pick an initial concentration so the parent loses exactly 2 qty in
    // the first interval of a still reach.
    let volume_ft3 = UnitSystem::English.to_internal(Quantity::Volume, VOLUME);
    let rate_per_day = 2.4;
    let mut config = fixtures::reach("exact", 1)
        .with_constituent(
            ConstituentConfig::new("parent", 1.0)
                .with_generic_decay(GenericDecayParams {
                    rate: rate_per_day,
                    theta: 1.0,
                }),
        )
        .with_constituent(
            ConstituentConfig::new("child", 1.0).with_daughter_of(DecayProcess::GenericDecay),
        )
        .with_coupling(
            CouplingMatrix::new(2)
                .with(ConstituentId(0), ConstituentId(1), 1.0)
                .unwrap(),
        );
    let per_interval = rate_per_day / 24.0;
    let c0 = 2.0 / ((1.0 - (-per_interval).exp()) * volume_ft3);
    config.constituents[0].initial_concentration = c0;

    let forcing = reachqual_test_utils::ForcingBuilder::new(1, 1, 2)
        .volume(VOLUME)
        .build();
    let result = run(&config, &forcing).unwrap();
    let parent = result.constituent("parent").unwrap();
    let child = result.constituent("child").unwrap();
    assert!((parent.decay_total[0] - 2.0).abs() < 1e-9);
    assert!((child.concentration[0] - 2.0 / volume_ft3).abs() < 1e-15);
}

#[test]
fn unflagged_processes_do_not_transfer() {
    let mut config = fixtures::reach("unflagged", 1)
        .with_constituent(
            ConstituentConfig::new("parent", 1.0)
                .with_initial_concentration(1.0e-3)
                .with_generic_decay(GenericDecayParams::new(1.0)),
        )
        .with_constituent(
            ConstituentConfig::new("child", 1.0).with_daughter_of(DecayProcess::Oxidation),
        )
        .with_coupling(
            CouplingMatrix::new(2)
                .with(ConstituentId(0), ConstituentId(1), 1.0)
                .unwrap(),
        );
    config.constituents[0].oxidation = Some(OxidationParams::default());
    let forcing = fixtures::flow_through(12, 1, 2).build();
    let result = run(&config, &forcing).unwrap();
    let child = result.constituent("child").unwrap();
    // Oxidation runs with zero oxidant, so nothing is produced.
    assert!(child.daughter_gain.iter().all(|&g| g == 0.0));
    assert!(child.concentration.iter().all(|&c| c == 0.0));
}

#[test]
fn malformed_coupling_is_rejected() {
    let err = CouplingMatrix::new(2)
        .with(ConstituentId(1), ConstituentId(0), 0.5)
        .unwrap_err();
    assert!(matches!(err, CouplingError::NotTopological { .. }));

    let (mut config, forcing) = fixtures::parent_daughter(2);
    config.coupling = Some(CouplingMatrix::new(3));
    assert_eq!(
        run(&config, &forcing).err(),
        Some(RunError::Config(ConfigError::CouplingSize {
            expected: 2,
            actual: 3
        }))
    );
}
