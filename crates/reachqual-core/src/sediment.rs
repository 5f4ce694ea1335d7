//! Sediment size fractions, the six sorption site classes, and their
//! containers.

use std::fmt;

use crate::indexed::indexed_array;

/// Sediment size fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeFraction {
    /// Sand.
    Sand,
    /// Silt.
    Silt,
    /// Clay.
    Clay,
}

impl SizeFraction {
    /// Number of size fractions.
    pub const COUNT: usize = 3;

    /// Every fraction in index order.
    pub const ALL: [SizeFraction; Self::COUNT] = [Self::Sand, Self::Silt, Self::Clay];

    /// Zero-based slot of this fraction.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sand => "sand",
            Self::Silt => "silt",
            Self::Clay => "clay",
        }
    }
}

impl fmt::Display for SizeFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A sorption site class: a size fraction either in suspension or in the bed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SedimentClass {
    /// Suspended sand.
    SuspendedSand,
    /// Suspended silt.
    SuspendedSilt,
    /// Suspended clay.
    SuspendedClay,
    /// Bed sand.
    BedSand,
    /// Bed silt.
    BedSilt,
    /// Bed clay.
    BedClay,
}

impl SedimentClass {
    /// Number of sediment classes.
    pub const COUNT: usize = 6;

    /// Every class in index order: the three suspended classes, then the
    /// three bed classes.
    pub const ALL: [SedimentClass; Self::COUNT] = [
        Self::SuspendedSand,
        Self::SuspendedSilt,
        Self::SuspendedClay,
        Self::BedSand,
        Self::BedSilt,
        Self::BedClay,
    ];

    /// Zero-based slot of this class.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The suspended class of a size fraction.
    pub const fn suspended(fraction: SizeFraction) -> Self {
        match fraction {
            SizeFraction::Sand => Self::SuspendedSand,
            SizeFraction::Silt => Self::SuspendedSilt,
            SizeFraction::Clay => Self::SuspendedClay,
        }
    }

    /// The bed class of a size fraction.
    pub const fn bed(fraction: SizeFraction) -> Self {
        match fraction {
            SizeFraction::Sand => Self::BedSand,
            SizeFraction::Silt => Self::BedSilt,
            SizeFraction::Clay => Self::BedClay,
        }
    }

    /// Size fraction of this class.
    pub const fn fraction(self) -> SizeFraction {
        match self {
            Self::SuspendedSand | Self::BedSand => SizeFraction::Sand,
            Self::SuspendedSilt | Self::BedSilt => SizeFraction::Silt,
            Self::SuspendedClay | Self::BedClay => SizeFraction::Clay,
        }
    }

    /// Whether this class is in suspension.
    pub const fn is_suspended(self) -> bool {
        matches!(
            self,
            Self::SuspendedSand | Self::SuspendedSilt | Self::SuspendedClay
        )
    }
}

impl fmt::Display for SedimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let place = if self.is_suspended() { "suspended" } else { "bed" };
        write!(f, "{place} {}", self.fraction())
    }
}

indexed_array!(
    /// One value per [`SizeFraction`].
    ByFraction,
    SizeFraction,
    SizeFraction::COUNT
);

indexed_array!(
    /// One value per [`SedimentClass`].
    BySediment,
    SedimentClass,
    SedimentClass::COUNT
);

impl<T: Copy> BySediment<T> {
    /// Build from a per-fraction suspended triple and a bed triple.
    pub fn from_parts(suspended: ByFraction<T>, bed: ByFraction<T>) -> Self {
        let [ss, si, sc] = suspended.0;
        let [bs, bi, bc] = bed.0;
        Self([ss, si, sc, bs, bi, bc])
    }

    /// The three suspended slots.
    pub fn suspended(&self) -> ByFraction<T> {
        ByFraction([self.0[0], self.0[1], self.0[2]])
    }

    /// The three bed slots.
    pub fn bed(&self) -> ByFraction<T> {
        ByFraction([self.0[3], self.0[4], self.0[5]])
    }
}
