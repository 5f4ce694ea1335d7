//! Dissolved-phase decay processes and the per-process container.

use std::fmt;

use crate::indexed::indexed_array;

/// The six independent dissolved-phase decay processes.
///
/// Indices are zero-based and stable; they address [`ByProcess`] slots and
/// the daughter flags of a constituent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DecayProcess {
    /// Acid, base and neutral catalysed hydrolysis (pH dependent).
    Hydrolysis,
    /// Oxidation by free radicals.
    Oxidation,
    /// Direct photolysis driven by the light-attenuation model.
    Photolysis,
    /// Volatilization, proportional to the oxygen reaeration coefficient.
    Volatilization,
    /// Biodegradation, proportional to the active biomass.
    Biodegradation,
    /// Generic first-order decay.
    GenericDecay,
}

impl DecayProcess {
    /// Number of decay processes.
    pub const COUNT: usize = 6;

    /// Every process in index order.
    pub const ALL: [DecayProcess; Self::COUNT] = [
        Self::Hydrolysis,
        Self::Oxidation,
        Self::Photolysis,
        Self::Volatilization,
        Self::Biodegradation,
        Self::GenericDecay,
    ];

    /// Zero-based slot of this process.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short lowercase name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hydrolysis => "hydrolysis",
            Self::Oxidation => "oxidation",
            Self::Photolysis => "photolysis",
            Self::Volatilization => "volatilization",
            Self::Biodegradation => "biodegradation",
            Self::GenericDecay => "generic decay",
        }
    }
}

impl fmt::Display for DecayProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

indexed_array!(
    /// One value per [`DecayProcess`].
    ByProcess,
    DecayProcess,
    DecayProcess::COUNT
);
