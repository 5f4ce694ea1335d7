//! Integration test: fatal configuration errors and the non-fatal
//! diagnostic counters.

use reachqual_core::diagnostics::Diagnostic;
use reachqual_engine::{
    run, ConfigError, ConstituentConfig, EnvironmentSources, HydrolysisParams, OxidationParams,
    PhotolysisParams, RunError, VolatilizationParams,
};
use reachqual_test_utils::{fixtures, ForcingBuilder};

fn config_error(result: Result<reachqual_engine::ReachRun, RunError>) -> ConfigError {
    match result {
        Err(RunError::Config(e)) => e,
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

// ── Fatal ──────────────────────────────────────────────────────────

#[test]
fn forcing_must_match_exits_and_constituents() {
    let (config, _) = fixtures::tracer(4);
    let two_exits = fixtures::flow_through(4, 2, 1).build();
    assert_eq!(
        config_error(run(&config, &two_exits)),
        ConfigError::ExitCount {
            expected: 1,
            actual: 2
        }
    );
    let two_constituents = fixtures::flow_through(4, 1, 2).build();
    assert_eq!(
        config_error(run(&config, &two_constituents)),
        ConfigError::ConstituentCount {
            expected: 1,
            actual: 2
        }
    );
}

#[test]
fn short_series_is_fatal() {
    let (config, _) = fixtures::tracer(4);
    let forcing = fixtures::flow_through(4, 1, 1)
        .with(|f| f.constituents[0].inflow = Some(vec![1.0; 3]))
        .build();
    assert_eq!(
        config_error(run(&config, &forcing)),
        ConfigError::SeriesLength {
            series: "constituents[0].inflow".into(),
            expected: 4,
            actual: 3
        }
    );
}

#[test]
fn non_finite_forcing_is_fatal() {
    let (config, _) = fixtures::tracer(4);
    let forcing = fixtures::flow_through(4, 1, 1)
        .with(|f| f.volume[2] = f64::NAN)
        .build();
    assert_eq!(
        config_error(run(&config, &forcing)),
        ConfigError::NonFiniteInput {
            series: "volume".into(),
            step: 2
        }
    );
    let forcing = fixtures::flow_through(4, 1, 1)
        .depth_series(vec![1.0, 1.0, 1.0, f64::INFINITY])
        .build();
    assert!(matches!(
        config_error(run(&config, &forcing)),
        ConfigError::NonFiniteInput { step: 3, .. }
    ));
}

#[test]
fn bad_constituents_are_fatal() {
    let forcing = fixtures::flow_through(2, 1, 2).build();
    let duplicate = fixtures::reach("dup", 1)
        .with_constituent(ConstituentConfig::new("x", 1.0))
        .with_constituent(ConstituentConfig::new("x", 1.0));
    assert!(matches!(
        config_error(run(&duplicate, &forcing)),
        ConfigError::DuplicateConstituent { .. }
    ));
    let bad_conv = fixtures::reach("conv", 1)
        .with_constituent(ConstituentConfig::new("x", f64::NAN))
        .with_constituent(ConstituentConfig::new("y", 1.0));
    assert!(matches!(
        config_error(run(&bad_conv, &forcing)),
        ConfigError::InvalidConv { .. }
    ));
}

// ── Structural diagnostics ─────────────────────────────────────────

#[test]
fn clean_run_raises_nothing() {
    let (config, forcing) = fixtures::full_kinetics(6);
    let result = run(&config, &forcing).unwrap();
    assert!(result.diagnostics.is_clean(), "{}", result.diagnostics);
}

#[test]
fn sediment_association_without_transport() {
    let config = fixtures::reach("no-sediment", 1).with_constituent(
        ConstituentConfig::new("pcb", 1.0)
            .with_initial_concentration(1.0e-4)
            .with_sediment(fixtures::sorbing_params()),
    );
    let forcing = fixtures::flow_through(5, 1, 1).inflow(0, 1.0).build();
    let result = run(&config, &forcing).unwrap();
    assert_eq!(result.diagnostics.count(Diagnostic::SedimentTransportInactive), 1);
    assert_eq!(result.diagnostics.total(), 1);
    let pcb = result.constituent("pcb").unwrap();
    assert!(pcb.sorbed.as_ref().unwrap().storage_total.iter().all(|&s| s == 0.0));
    assert!(pcb.mass_balance.relative_residual().abs() < 1e-9);
}

#[test]
fn photolysis_without_depth_runs_fully_gated() {
    let config = fixtures::reach("dark", 1).with_constituent(
        ConstituentConfig::new("dye", 1.0)
            .with_initial_concentration(1.0e-4)
            .with_photolysis(PhotolysisParams::default()),
    );
    let forcing = fixtures::flow_through(6, 1, 1).no_depth().build();
    let result = run(&config, &forcing).unwrap();
    assert_eq!(result.diagnostics.count(Diagnostic::PhotolysisWithoutDepth), 1);
    assert_eq!(result.metrics.gated_steps, 6);
    let dye = result.constituent("dye").unwrap();
    assert!(dye.decay_total.iter().all(|&d| d == 0.0));
}

#[test]
fn volatilization_needs_velocity_in_streams_and_depth_in_lakes() {
    let volatile = || {
        ConstituentConfig::new("voc", 1.0)
            .with_initial_concentration(1.0e-4)
            .with_volatilization(VolatilizationParams { cfgas: 0.5 })
    };

    let stream = fixtures::reach("stream", 1).with_constituent(volatile());
    let forcing = fixtures::flow_through(3, 1, 1).no_velocity().build();
    let result = run(&stream, &forcing).unwrap();
    assert_eq!(
        result.diagnostics.count(Diagnostic::StreamVolatilizationWithoutVelocity),
        1
    );
    assert_eq!(result.diagnostics.count(Diagnostic::LakeVolatilizationWithoutDepth), 0);

    let mut lake = fixtures::reach("lake", 1).with_constituent(volatile());
    lake.lake = true;
    let forcing = fixtures::flow_through(3, 1, 1).no_depth().no_velocity().build();
    let result = run(&lake, &forcing).unwrap();
    assert_eq!(result.diagnostics.count(Diagnostic::LakeVolatilizationWithoutDepth), 1);
    assert_eq!(
        result.diagnostics.count(Diagnostic::StreamVolatilizationWithoutVelocity),
        0
    );
}

#[test]
fn each_offending_constituent_is_counted() {
    let photolytic = |name: &str| {
        ConstituentConfig::new(name, 1.0).with_photolysis(PhotolysisParams::default())
    };
    let config = fixtures::reach("two", 1)
        .with_constituent(photolytic("a"))
        .with_constituent(photolytic("b"));
    let forcing = fixtures::flow_through(2, 1, 2).no_depth().build();
    let result = run(&config, &forcing).unwrap();
    assert_eq!(result.diagnostics.count(Diagnostic::PhotolysisWithoutDepth), 2);
}

#[test]
fn missing_environment_series_are_reported_when_needed() {
    let everything = ConstituentConfig::new("x", 1.0)
        .with_hydrolysis(HydrolysisParams::default())
        .with_oxidation(OxidationParams::default())
        .with_photolysis(PhotolysisParams::default());
    let mut config = fixtures::reach("series", 1).with_constituent(everything);
    config.environment = EnvironmentSources::all_series();
    let forcing = fixtures::flow_through(2, 1, 1).build();
    let result = run(&config, &forcing).unwrap();
    for diagnostic in [
        Diagnostic::MissingWaterTemperature,
        Diagnostic::MissingPh,
        Diagnostic::MissingOxidant,
        Diagnostic::MissingCloudCover,
        Diagnostic::MissingSedimentConcentration,
        Diagnostic::MissingPhytoplankton,
    ] {
        assert_eq!(result.diagnostics.count(diagnostic), 1, "{diagnostic:?}");
    }

    // A conservative constituent needs none of them.
    let mut quiet = fixtures::reach("quiet", 1).with_constituent(ConstituentConfig::new("x", 1.0));
    quiet.environment = EnvironmentSources::all_series();
    let result = run(&quiet, &forcing).unwrap();
    assert!(result.diagnostics.is_clean());
}

#[test]
fn supplied_series_silence_the_diagnostic() {
    let config = {
        let mut c = fixtures::reach("hydrolysis", 1).with_constituent(
            ConstituentConfig::new("x", 1.0)
                .with_initial_concentration(1.0e-4)
                .with_hydrolysis(HydrolysisParams {
                    kb: 1.0e-2,
                    ..HydrolysisParams::default()
                }),
        );
        c.environment.ph = reachqual_engine::Source::Series;
        c
    };
    let forcing = fixtures::flow_through(3, 1, 1)
        .with(|f| f.environment.ph = Some(vec![7.0, 8.0, 9.0]))
        .build();
    let result = run(&config, &forcing).unwrap();
    assert!(result.diagnostics.is_clean());
    let x = result.constituent("x").unwrap();
    // Base-catalysed hydrolysis speeds up tenfold per pH unit.
    assert!(x.decay_total[2] > x.decay_total[1] && x.decay_total[1] > x.decay_total[0]);
}

// ── Runtime diagnostics ────────────────────────────────────────────

#[test]
fn sorbed_inflow_without_suspended_sediment_is_counted_per_step() {
    let (config, _) = fixtures::sorbing(4, 1);
    let forcing = ForcingBuilder::new(4, 1, 1)
        .volume(fixtures::VOLUME)
        .outflow(0, 0.5, 0.5)
        .sorbed_inflow(0, [0.5, 0.0, 0.0])
        .sediment([0.0, 30.0, 40.0, 500.0, 600.0, 700.0], [0.0; 3], [0.0, 1.5, 2.0])
        .build();
    let result = run(&config, &forcing).unwrap();
    assert_eq!(result.diagnostics.count(Diagnostic::SuspendedSedimentAbsent), 4);
    assert_eq!(result.diagnostics.count(Diagnostic::BedSedimentAbsent), 0);
    let messages: Vec<&str> = result.diagnostics.raised().map(|(d, _)| d.message()).collect();
    assert_eq!(messages, vec![Diagnostic::SuspendedSedimentAbsent.message()]);
}

#[test]
fn deposition_onto_an_empty_bed_is_counted() {
    let (config, _) = fixtures::sorbing(3, 1);
    let forcing = ForcingBuilder::new(3, 1, 1)
        .volume(fixtures::VOLUME)
        .sorbed_inflow(0, [0.0, 0.0, 1.0])
        .sediment([20.0, 30.0, 40.0, 500.0, 600.0, 0.0], [0.0, 0.0, 0.5], [1.0; 3])
        .build();
    let result = run(&config, &forcing).unwrap();
    assert_eq!(result.diagnostics.count(Diagnostic::BedSedimentAbsent), 3);
}
