//! Reachqual: generalized water-quality constituent simulation for a single
//! stream or lake reach.
//!
//! This is the top-level facade crate that re-exports the public API of the
//! reachqual sub-crates. For most users, adding `reachqual` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use reachqual::prelude::*;
//!
//! // A 10 acre-ft reach passing 1 acre-ft per hour, with one decaying
//! // constituent.
//! let mut config = ReachConfig::new("pond", UnitSystem::English).with_constituent(
//!     ConstituentConfig::new("tracer", 1.0)
//!         .with_initial_concentration(2.0e-4)
//!         .with_generic_decay(GenericDecayParams::new(0.5)),
//! );
//! config.initial_volume = 10.0;
//!
//! let forcing = ReachForcing {
//!     volume: vec![10.0; 24],
//!     outflow: vec![ExitOutflow {
//!         start: vec![0.5; 24],
//!         end: vec![0.5; 24],
//!     }],
//!     depth: Some(vec![3.0; 24]),
//!     constituents: vec![ConstituentForcing::default()],
//!     ..Default::default()
//! };
//!
//! let result = run(&config, &forcing).unwrap();
//! let tracer = result.constituent("tracer").unwrap();
//! assert_eq!(tracer.concentration.len(), 24);
//! assert!(tracer.mass_balance.relative_residual().abs() < 1e-9);
//! assert!(result.diagnostics.is_clean());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `reachqual-core` | Indices, units, coupling matrix, diagnostics |
//! | [`kinetics`] | `reachqual-kinetics` | Per-step process operators |
//! | [`engine`] | `reachqual-engine` | Configuration, compilation, stepping and outputs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, indices and diagnostics (`reachqual-core`).
///
/// Contains the unit-system boundary ([`types::UnitSystem`]), the
/// parent/daughter [`types::CouplingMatrix`] and the diagnostic counters
/// ([`types::ErrorCounts`]).
pub use reachqual_core as types;

/// Process kinetics (`reachqual-kinetics`).
///
/// Stateless operators for advection, decay, light, reaeration, deposition
/// and sediment exchange. The engine calls them in a fixed order; they are
/// public for testing individual processes.
pub use reachqual_kinetics as kinetics;

/// The reach engine (`reachqual-engine`).
///
/// [`engine::run`] for a single reach, [`engine::run_batch`] for many
/// independent reaches on a worker pool.
pub use reachqual_engine as engine;

/// Common imports for typical reachqual usage.
///
/// ```rust
/// use reachqual::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use reachqual_core::{
        ConstituentId, CouplingMatrix, DecayProcess, Diagnostic, ErrorCounts, Quantity,
        SedimentClass, SizeFraction, UnitSystem,
    };

    // Configuration
    pub use reachqual_engine::{
        BiodegradationParams, ConstituentConfig, EnvironmentSources, GenericDecayParams,
        HydrolysisParams, OxidationParams, PhotolysisParams, ReachConfig, SedimentParams,
        Source, StreamReaeration, VolatilizationParams,
    };

    // Inputs
    pub use reachqual_engine::{
        ConstituentForcing, EnvironmentSeries, ExitOutflow, ReachForcing, SedimentForcing,
    };

    // Running and results
    pub use reachqual_engine::{
        run, run_batch, BatchConfig, BatchError, ConfigError, ConstituentSeries, MassBalance,
        ReachJob, ReachRun, RunError, RunMetrics, RunPlan,
    };
}
