//! Advection of dissolved mass through a reach with one or more exits.
//!
//! Outflow is split into the part leaving at the start-of-interval
//! concentration (`start` volumes) and the part leaving at the
//! end-of-interval concentration (`end` volumes).

use reachqual_core::constants::{is_undefined, UNDEFINED};

use crate::ExitValues;

/// Outflow volumes for one interval, total and per exit.
#[derive(Clone, Copy, Debug)]
pub struct ExitFlows<'a> {
    /// Total outflow leaving at the start concentration.
    pub start_total: f64,
    /// Total outflow leaving at the end concentration.
    pub end_total: f64,
    /// Per-exit start outflow; sums to `start_total`.
    pub start_by_exit: &'a [f64],
    /// Per-exit end outflow; sums to `end_total`.
    pub end_by_exit: &'a [f64],
}

impl ExitFlows<'_> {
    fn exits(&self) -> usize {
        self.start_by_exit.len()
    }
}

/// Result of advecting one constituent for one interval.
#[derive(Clone, Debug, PartialEq)]
pub struct Advection {
    /// End-of-interval concentration; [`UNDEFINED`] when the reach is dry.
    pub concentration: f64,
    /// Total mass leaving the reach.
    pub outflow: f64,
    /// Mass leaving through each exit.
    pub exit_outflow: ExitValues,
}

/// Advect `inflow` mass through a reach that held `start_volume` at
/// `concentration` and holds `end_volume` at the end of the interval.
///
/// An undefined start concentration (the reach was dry) holds no mass.
/// When the reach ends the interval dry, everything present plus the
/// inflow leaves, split across exits in proportion to their outflow
/// volume.
pub fn advect(
    inflow: f64,
    concentration: f64,
    start_volume: f64,
    end_volume: f64,
    flows: &ExitFlows<'_>,
) -> Advection {
    let start_conc = if is_undefined(concentration) {
        0.0
    } else {
        concentration
    };

    if end_volume > 0.0 {
        let conc = (inflow + start_conc * (start_volume - flows.start_total))
            / (end_volume + flows.end_total);
        let outflow = flows.start_total * start_conc + flows.end_total * conc;
        let exit_outflow = if flows.exits() > 1 {
            flows
                .start_by_exit
                .iter()
                .zip(flows.end_by_exit)
                .map(|(s, e)| s * start_conc + e * conc)
                .collect()
        } else {
            ExitValues::from_slice(&[outflow])
        };
        return Advection {
            concentration: conc,
            outflow,
            exit_outflow,
        };
    }

    let outflow = inflow + start_conc * start_volume;
    let total_volume = flows.start_total + flows.end_total;
    let exit_outflow = if flows.exits() > 1 {
        flows
            .start_by_exit
            .iter()
            .zip(flows.end_by_exit)
            .map(|(s, e)| {
                if total_volume > 0.0 {
                    outflow * (s + e) / total_volume
                } else {
                    0.0
                }
            })
            .collect()
    } else {
        ExitValues::from_slice(&[outflow])
    };
    Advection {
        concentration: UNDEFINED,
        outflow,
        exit_outflow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(start: f64, end: f64) -> ([f64; 1], [f64; 1]) {
        ([start], [end])
    }

    #[test]
    fn steady_state_carries_inflow_concentration() {
        // 100 ft³ reach, 10 ft³ through per interval at concentration 2.
        let (s, e) = single(5.0, 5.0);
        let flows = ExitFlows {
            start_total: 5.0,
            end_total: 5.0,
            start_by_exit: &s,
            end_by_exit: &e,
        };
        let a = advect(20.0, 2.0, 100.0, 100.0, &flows);
        assert!((a.concentration - 2.0).abs() < 1e-12);
        assert!((a.outflow - 20.0).abs() < 1e-12);
        assert_eq!(a.exit_outflow.as_slice(), &[a.outflow]);
    }

    #[test]
    fn mass_is_conserved() {
        let s = [3.0, 1.0];
        let e = [2.0, 4.0];
        let flows = ExitFlows {
            start_total: 4.0,
            end_total: 6.0,
            start_by_exit: &s,
            end_by_exit: &e,
        };
        let (inflow, conc, vols, vol) = (50.0, 1.5, 80.0, 90.0);
        let a = advect(inflow, conc, vols, vol, &flows);
        let before = conc * vols + inflow;
        let after = a.concentration * vol + a.outflow;
        assert!((before - after).abs() < 1e-9);
        let by_exit: f64 = a.exit_outflow.iter().sum();
        assert!((by_exit - a.outflow).abs() < 1e-9);
    }

    #[test]
    fn drying_reach_flushes_everything() {
        let s = [6.0, 2.0];
        let e = [1.0, 1.0];
        let flows = ExitFlows {
            start_total: 8.0,
            end_total: 2.0,
            start_by_exit: &s,
            end_by_exit: &e,
        };
        let a = advect(4.0, 2.0, 10.0, 0.0, &flows);
        assert!(is_undefined(a.concentration));
        assert_eq!(a.outflow, 24.0);
        assert!((a.exit_outflow[0] - 24.0 * 0.7).abs() < 1e-12);
        assert!((a.exit_outflow[1] - 24.0 * 0.3).abs() < 1e-12);
    }

    #[test]
    fn dry_start_holds_no_mass() {
        let (s, e) = single(0.0, 1.0);
        let flows = ExitFlows {
            start_total: 0.0,
            end_total: 1.0,
            start_by_exit: &s,
            end_by_exit: &e,
        };
        let a = advect(10.0, UNDEFINED, 0.0, 9.0, &flows);
        assert!((a.concentration - 1.0).abs() < 1e-12);
        assert!((a.outflow - 1.0).abs() < 1e-12);
    }
}
