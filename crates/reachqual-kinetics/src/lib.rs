//! Per-step process kinetics for a single reach.
//!
//! Every function here is a pure update over one constituent for one
//! interval. Rates arrive already scaled to the interval length and all
//! quantities are in internal units; sequencing, gating and bookkeeping
//! belong to `reachqual-engine`.
//!
//! # Step order (each interval, each constituent)
//!
//! 1. [`temperature_offset`] and, when the reach is deep enough, the
//!    photolysis light factors ([`light`]) and the reaeration coefficient
//!    ([`Reaeration`]).
//! 2. [`atmospheric_deposition`] adds to the inflow.
//! 3. [`advect`] moves dissolved mass through the reach and its exits.
//! 4. [`DissolvedKinetics::decay`] removes mass by six first-order
//!    processes; [`daughter_inflow`] credits descendants.
//! 5. [`advect_sorbed`] moves sorbed mass with sand, silt and clay.
//! 6. [`decay_sorbed`] and [`equilibrate`] handle sorbed decay and
//!    dissolved/sorbed exchange.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod advection;
pub mod coupling;
pub mod decay;
pub mod deposition;
pub mod light;
pub mod reaeration;
pub mod sediment_decay;
pub mod sediment_transport;
pub mod sorption;
pub mod temperature;

pub use advection::{advect, Advection, ExitFlows};
pub use coupling::daughter_inflow;
pub use decay::{
    Biodegradation, DecayBreakdown, DecayConditions, Diurnal, DissolvedKinetics, GenericDecay,
    Hydrolysis, Oxidation, Photolysis, Volatilization,
};
pub use deposition::{atmospheric_deposition, Deposition};
pub use light::{
    attenuation_factors, LatitudeBucket, LightConditions, LightExtinction, LightTableError, Season,
};
pub use reaeration::{Reaeration, ReaerationConditions, StreamFormula};
pub use sediment_decay::{decay_sorbed, SorbedDecay, SorbedDecayRate};
pub use sediment_transport::{advect_sorbed, SorbedInputs, SorbedTransport};
pub use sorption::{equilibrate, SorptionExchange, SorptionRates};
pub use temperature::temperature_offset;

/// Per-exit values; almost every reach has four or fewer exits.
pub type ExitValues = smallvec::SmallVec<[f64; 4]>;
