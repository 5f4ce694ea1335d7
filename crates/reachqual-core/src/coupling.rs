//! Parent/daughter stoichiometric coupling.
//!
//! [`CouplingMatrix`] stores the fraction of each parent's decayed mass that
//! becomes a daughter constituent. Entries exist only for `parent < child`;
//! anything else is rejected when set, so the dependency graph is acyclic
//! by construction and increasing-id order is a valid schedule.

use thiserror::Error;

use crate::id::ConstituentId;

/// Errors from building a [`CouplingMatrix`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CouplingError {
    /// A parent must be registered before its daughter.
    #[error("coupling {parent} -> {child} is not topological: parent id must be lower than child id")]
    NotTopological {
        /// Parent constituent.
        parent: ConstituentId,
        /// Child constituent.
        child: ConstituentId,
    },
    /// The yield coefficient is not a fraction.
    #[error("coupling {parent} -> {child} has coefficient {value}, expected a value in [0, 1]")]
    CoefficientOutOfRange {
        /// Parent constituent.
        parent: ConstituentId,
        /// Child constituent.
        child: ConstituentId,
        /// The rejected coefficient.
        value: f64,
    },
    /// A constituent id beyond the matrix dimension.
    #[error("constituent {id} is out of range for a {len}-constituent coupling matrix")]
    OutOfRange {
        /// The offending id.
        id: ConstituentId,
        /// Matrix dimension.
        len: usize,
    },
}

/// Strictly upper-triangular `C[parent][child]` yield matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CouplingMatrix {
    len: usize,
    coefficients: Vec<f64>,
}

impl CouplingMatrix {
    /// An all-zero matrix for `len` constituents.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            coefficients: vec![0.0; len * len],
        }
    }

    /// Number of constituents covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the matrix covers zero constituents.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the fraction of `parent`'s decayed mass that becomes `child`.
    ///
    /// # Errors
    ///
    /// Rejects ids out of range, `parent >= child`, and coefficients that
    /// are not finite values in `[0, 1]`.
    pub fn set(
        &mut self,
        parent: ConstituentId,
        child: ConstituentId,
        value: f64,
    ) -> Result<(), CouplingError> {
        for id in [parent, child] {
            if id.index() >= self.len {
                return Err(CouplingError::OutOfRange { id, len: self.len });
            }
        }
        if parent >= child {
            return Err(CouplingError::NotTopological { parent, child });
        }
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(CouplingError::CoefficientOutOfRange {
                parent,
                child,
                value,
            });
        }
        self.coefficients[parent.index() * self.len + child.index()] = value;
        Ok(())
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(
        mut self,
        parent: ConstituentId,
        child: ConstituentId,
        value: f64,
    ) -> Result<Self, CouplingError> {
        self.set(parent, child, value)?;
        Ok(self)
    }

    /// Coefficient for `parent -> child`; zero when unset or out of range.
    pub fn get(&self, parent: ConstituentId, child: ConstituentId) -> f64 {
        if parent.index() >= self.len || child.index() >= self.len {
            return 0.0;
        }
        self.coefficients[parent.index() * self.len + child.index()]
    }

    /// Nonzero `(parent, coefficient)` pairs feeding `child`, lowest parent
    /// first.
    pub fn parents_of(&self, child: ConstituentId) -> impl Iterator<Item = (ConstituentId, f64)> + '_ {
        let upper = child.index().min(self.len);
        (0..upper).filter_map(move |p| {
            let parent = ConstituentId(p as u32);
            let c = self.get(parent, child);
            (c > 0.0).then_some((parent, c))
        })
    }

    /// Whether `child` has at least one parent.
    pub fn has_parents(&self, child: ConstituentId) -> bool {
        self.parents_of(child).next().is_some()
    }
}
