//! Reach simulation engine for generalized water-quality constituents.
//!
//! A run takes a [`ReachConfig`] and a [`ReachForcing`] batch of input
//! series. [`RunPlan::compile`] validates them, raises the structural
//! diagnostics and converts everything to internal per-interval units;
//! [`RunPlan::execute`] then steps every constituent through advection,
//! deposition, decay, daughter coupling and sediment exchange, filling
//! preallocated [`ConstituentSeries`]. [`run`] does both, and
//! [`run_batch`] runs independent reaches on a worker pool.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batched;
mod calendar;
pub mod config;
mod driver;
pub mod forcing;
pub mod metrics;
pub mod outputs;
pub mod plan;
pub mod reach;

pub use batched::{run_batch, BatchConfig, BatchError, ReachJob};
pub use config::{
    BiodegradationParams, ConfigError, ConstituentConfig, EnvironmentSources,
    GenericDecayParams, HydrolysisParams, OxidationParams, PhotolysisParams, ReachConfig,
    SedimentParams, Source, StreamReaeration, VolatilizationParams,
};
pub use forcing::{
    ConstituentForcing, EnvironmentSeries, ExitOutflow, ReachForcing, SedimentForcing,
};
pub use metrics::RunMetrics;
pub use outputs::{ConstituentSeries, ExitSeries, MassBalance, SorbedSeries};
pub use plan::RunPlan;
pub use reach::{run, ReachRun, RunError};
