//! The non-fatal diagnostic taxonomy.
//!
//! Every condition the engine tolerates but reports is a [`Diagnostic`].
//! Occurrences accumulate in an [`ErrorCounts`] vector whose slots are
//! index-aligned with the static [`DIAGNOSTIC_MESSAGES`] table. Nothing in
//! this module aborts a run; callers decide whether nonzero counts are fatal.

use std::fmt;

/// When a diagnostic is detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    /// Detected once before the step loop; a substitute (zero-filled)
    /// series is used in place of the missing input.
    Structural,
    /// Detected inside the sediment transport operator, once per occurrence.
    Runtime,
}

/// A tolerated configuration or consistency problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Diagnostic {
    /// A constituent is sediment-associated but no sediment transport
    /// series were supplied.
    SedimentTransportInactive,
    /// Photolysis is enabled but no average-depth series was supplied.
    PhotolysisWithoutDepth,
    /// Volatilization in a free-flowing reach without an average-velocity
    /// series.
    StreamVolatilizationWithoutVelocity,
    /// Volatilization in a lake without an average-depth series.
    LakeVolatilizationWithoutDepth,
    /// No suspended sediment passed through the reach, yet sorbed mass
    /// arrived or was resident in suspension.
    SuspendedSedimentAbsent,
    /// The bed was empty at the end of the step, yet sorbed mass was
    /// deposited or resident on it.
    BedSedimentAbsent,
    /// Water temperature is configured as a series that was not supplied.
    MissingWaterTemperature,
    /// pH is configured as a series that was not supplied.
    MissingPh,
    /// Free-radical oxidant concentration is configured as a series that
    /// was not supplied.
    MissingOxidant,
    /// Cloud cover is configured as a series that was not supplied.
    MissingCloudCover,
    /// Suspended sediment concentration for light extinction is configured
    /// as a series that was not supplied.
    MissingSedimentConcentration,
    /// Phytoplankton concentration is configured as a series that was not
    /// supplied.
    MissingPhytoplankton,
}

/// Human-readable message for each [`Diagnostic`], index-aligned with
/// [`Diagnostic::index`] and the slots of [`ErrorCounts`].
pub const DIAGNOSTIC_MESSAGES: [&str; Diagnostic::COUNT] = [
    "constituent is sediment-associated but sediment transport is not active",
    "photolysis requires the average depth series",
    "volatilization in a free-flowing reach requires the average velocity series",
    "volatilization in a lake requires the average depth series",
    "no suspended sediment in the reach, but inflowing or resident sorbed mass is nonzero",
    "no bed sediment at end of interval, but deposited or resident sorbed mass is nonzero",
    "water temperature is read from a series that was not supplied",
    "pH is read from a series that was not supplied",
    "oxidant concentration is read from a series that was not supplied",
    "cloud cover is read from a series that was not supplied",
    "suspended sediment concentration is read from a series that was not supplied",
    "phytoplankton concentration is read from a series that was not supplied",
];

impl Diagnostic {
    /// Number of diagnostic kinds (length of the counter vector).
    pub const COUNT: usize = 12;

    /// Every diagnostic in slot order.
    pub const ALL: [Diagnostic; Self::COUNT] = [
        Self::SedimentTransportInactive,
        Self::PhotolysisWithoutDepth,
        Self::StreamVolatilizationWithoutVelocity,
        Self::LakeVolatilizationWithoutDepth,
        Self::SuspendedSedimentAbsent,
        Self::BedSedimentAbsent,
        Self::MissingWaterTemperature,
        Self::MissingPh,
        Self::MissingOxidant,
        Self::MissingCloudCover,
        Self::MissingSedimentConcentration,
        Self::MissingPhytoplankton,
    ];

    /// Slot of this diagnostic in [`ErrorCounts`] and [`DIAGNOSTIC_MESSAGES`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Static message for this diagnostic.
    pub fn message(self) -> &'static str {
        DIAGNOSTIC_MESSAGES[self.index()]
    }

    /// Whether this is a pre-loop or an in-loop diagnostic.
    pub fn category(self) -> DiagnosticCategory {
        match self {
            Self::SuspendedSedimentAbsent | Self::BedSedimentAbsent => DiagnosticCategory::Runtime,
            _ => DiagnosticCategory::Structural,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Accumulate-only occurrence counts, one slot per [`Diagnostic`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorCounts([u64; Diagnostic::COUNT]);

impl ErrorCounts {
    /// All-zero counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.0[diagnostic.index()] += 1;
    }

    /// Occurrences of one diagnostic.
    pub fn count(&self, diagnostic: Diagnostic) -> u64 {
        self.0[diagnostic.index()]
    }

    /// Occurrences over all diagnostics.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// `true` if nothing was recorded.
    pub fn is_clean(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// The raw counter vector, index-aligned with [`DIAGNOSTIC_MESSAGES`].
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// The message table paired with [`as_slice`](Self::as_slice).
    pub fn messages(&self) -> &'static [&'static str] {
        &DIAGNOSTIC_MESSAGES
    }

    /// Add another counter vector into this one.
    pub fn merge(&mut self, other: &ErrorCounts) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *mine += theirs;
        }
    }

    /// Diagnostics with a nonzero count, in slot order.
    pub fn raised(&self) -> impl Iterator<Item = (Diagnostic, u64)> + '_ {
        Diagnostic::ALL
            .into_iter()
            .map(|d| (d, self.count(d)))
            .filter(|&(_, c)| c > 0)
    }
}

impl fmt::Display for ErrorCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "no diagnostics");
        }
        for (i, (d, c)) in self.raised().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{c}x {d}")?;
        }
        Ok(())
    }
}
