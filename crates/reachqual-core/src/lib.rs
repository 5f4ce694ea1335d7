//! Core types for the reachqual reach water-quality engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the kinetics operators and the engine: typed
//! indices for decay processes and sediment classes, fixed-size containers
//! keyed by those indices, constituent ids, the daughter-coupling matrix,
//! the unit-system boundary, and the diagnostic counter taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod indexed;

pub mod constants;
pub mod coupling;
pub mod diagnostics;
pub mod id;
pub mod process;
pub mod sediment;
pub mod units;

pub use constants::{is_undefined, UNDEFINED};
pub use coupling::{CouplingError, CouplingMatrix};
pub use diagnostics::{Diagnostic, DiagnosticCategory, ErrorCounts, DIAGNOSTIC_MESSAGES};
pub use id::{ConstituentId, ExitId};
pub use process::{ByProcess, DecayProcess};
pub use sediment::{ByFraction, BySediment, SedimentClass, SizeFraction};
pub use units::{Quantity, UnitSystem};
