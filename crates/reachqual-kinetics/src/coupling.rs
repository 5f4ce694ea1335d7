//! Parent-to-daughter transfer of decayed mass.

use reachqual_core::coupling::CouplingMatrix;
use reachqual_core::id::ConstituentId;
use reachqual_core::process::{ByProcess, DecayProcess};

/// Mass gained by `child` from the decay of its parents this interval.
///
/// `decayed[p]` holds the per-process losses of constituent `p` for the
/// current interval; only parents, which precede `child`, are read.
/// `produces` selects the processes whose products become daughters.
pub fn daughter_inflow(
    child: ConstituentId,
    produces: &ByProcess<bool>,
    decayed: &[ByProcess<f64>],
    coupling: &CouplingMatrix,
) -> f64 {
    let mut gained = 0.0;
    for process in DecayProcess::ALL {
        if !produces[process] {
            continue;
        }
        for (parent, coefficient) in coupling.parents_of(child) {
            if let Some(losses) = decayed.get(parent.index()) {
                gained += losses[process] * coefficient;
            }
        }
    }
    gained
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_flagged_processes_transfer() {
        let coupling = CouplingMatrix::new(3)
            .with(ConstituentId(0), ConstituentId(2), 0.5)
            .unwrap()
            .with(ConstituentId(1), ConstituentId(2), 1.0)
            .unwrap();
        let mut produces = ByProcess::splat(false);
        produces[DecayProcess::Hydrolysis] = true;

        let mut a = ByProcess::splat(0.0);
        a[DecayProcess::Hydrolysis] = 4.0;
        a[DecayProcess::Oxidation] = 100.0;
        let mut b = ByProcess::splat(0.0);
        b[DecayProcess::Hydrolysis] = 1.0;
        let decayed = [a, b, ByProcess::splat(0.0)];

        let gain = daughter_inflow(ConstituentId(2), &produces, &decayed, &coupling);
        assert_eq!(gain, 3.0);
        assert_eq!(daughter_inflow(ConstituentId(0), &produces, &decayed, &coupling), 0.0);
    }
}
