//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a constituent within a reach.
///
/// Constituents are registered in configuration order and assigned
/// sequential ids. The order is significant: a constituent can only receive
/// decay products from constituents with a lower id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstituentId(pub u32);

impl ConstituentId {
    /// Position of this constituent in the reach's constituent list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ConstituentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ConstituentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an outflow gate of a reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExitId(pub u32);

impl ExitId {
    /// Position of this exit in the per-exit arrays.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ExitId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
