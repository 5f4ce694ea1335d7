//! Forcing builders and scenario fixtures for reachqual development.
//!
//! [`ForcingBuilder`] assembles a [`ReachForcing`] from uniform or
//! per-step series; [`fixtures`] holds the canned reaches shared by the
//! engine's integration tests and the benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use reachqual_core::sediment::{ByFraction, BySediment};
use reachqual_engine::{
    ConstituentForcing, EnvironmentSeries, ExitOutflow, ReachForcing, SedimentForcing,
};

/// Builder for [`ReachForcing`] with every series of the same length.
///
/// Starts as a still reach: constant volume, no outflow, 3 ft deep.
#[derive(Clone, Debug)]
pub struct ForcingBuilder {
    steps: usize,
    forcing: ReachForcing,
}

impl ForcingBuilder {
    pub fn new(steps: usize, exits: usize, constituents: usize) -> Self {
        let forcing = ReachForcing {
            volume: vec![1.0; steps],
            outflow: (0..exits)
                .map(|_| ExitOutflow {
                    start: vec![0.0; steps],
                    end: vec![0.0; steps],
                })
                .collect(),
            depth: Some(vec![3.0; steps]),
            velocity: Some(vec![1.0; steps]),
            wind: None,
            precipitation: None,
            surface_area: None,
            environment: EnvironmentSeries::default(),
            sediment: None,
            constituents: vec![ConstituentForcing::default(); constituents],
        };
        Self { steps, forcing }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Constant end-of-interval volume.
    pub fn volume(mut self, volume: f64) -> Self {
        self.forcing.volume = vec![volume; self.steps];
        self
    }

    /// Per-step end-of-interval volume.
    pub fn volume_series(mut self, volume: Vec<f64>) -> Self {
        self.forcing.volume = volume;
        self
    }

    /// Constant outflow through `exit`, split between the start and end
    /// concentrations.
    pub fn outflow(mut self, exit: usize, start: f64, end: f64) -> Self {
        if let Some(e) = self.forcing.outflow.get_mut(exit) {
            e.start = vec![start; self.steps];
            e.end = vec![end; self.steps];
        }
        self
    }

    /// Per-step outflow through `exit`.
    pub fn outflow_series(mut self, exit: usize, start: Vec<f64>, end: Vec<f64>) -> Self {
        if let Some(e) = self.forcing.outflow.get_mut(exit) {
            e.start = start;
            e.end = end;
        }
        self
    }

    pub fn depth(mut self, depth: f64) -> Self {
        self.forcing.depth = Some(vec![depth; self.steps]);
        self
    }

    pub fn depth_series(mut self, depth: Vec<f64>) -> Self {
        self.forcing.depth = Some(depth);
        self
    }

    pub fn no_depth(mut self) -> Self {
        self.forcing.depth = None;
        self
    }

    pub fn velocity(mut self, velocity: f64) -> Self {
        self.forcing.velocity = Some(vec![velocity; self.steps]);
        self
    }

    pub fn no_velocity(mut self) -> Self {
        self.forcing.velocity = None;
        self
    }

    pub fn wind(mut self, wind: f64) -> Self {
        self.forcing.wind = Some(vec![wind; self.steps]);
        self
    }

    pub fn precipitation(mut self, precipitation: f64) -> Self {
        self.forcing.precipitation = Some(vec![precipitation; self.steps]);
        self
    }

    pub fn surface_area(mut self, area: f64) -> Self {
        self.forcing.surface_area = Some(vec![area; self.steps]);
        self
    }

    pub fn water_temperature(mut self, temperature: f64) -> Self {
        self.forcing.environment.water_temperature = Some(vec![temperature; self.steps]);
        self
    }

    /// Constant dissolved inflow of constituent `index`.
    pub fn inflow(mut self, index: usize, inflow: f64) -> Self {
        let steps = self.steps;
        if let Some(c) = self.forcing.constituents.get_mut(index) {
            c.inflow = Some(vec![inflow; steps]);
        }
        self
    }

    /// Per-step dissolved inflow of constituent `index`.
    pub fn inflow_series(mut self, index: usize, inflow: Vec<f64>) -> Self {
        if let Some(c) = self.forcing.constituents.get_mut(index) {
            c.inflow = Some(inflow);
        }
        self
    }

    /// Constant sorbed inflow of constituent `index`, per fraction.
    pub fn sorbed_inflow(mut self, index: usize, inflow: [f64; 3]) -> Self {
        let steps = self.steps;
        if let Some(c) = self.forcing.constituents.get_mut(index) {
            c.sorbed_inflow = Some(ByFraction(inflow.map(|v| vec![v; steps])));
        }
        self
    }

    /// Steady sediment state: constant storage per class, deposition and
    /// outflow per fraction. Multi-exit reaches split the outflow evenly.
    pub fn sediment(
        mut self,
        storage: [f64; 6],
        deposition: [f64; 3],
        outflow: [f64; 3],
    ) -> Self {
        let steps = self.steps;
        let exits = self.forcing.outflow.len();
        let exit_outflow = if exits > 1 {
            (0..exits)
                .map(|_| ByFraction(outflow.map(|v| vec![v / exits as f64; steps])))
                .collect()
        } else {
            Vec::new()
        };
        self.forcing.sediment = Some(SedimentForcing {
            initial_storage: BySediment(storage),
            storage: BySediment(storage.map(|v| vec![v; steps])),
            deposition: ByFraction(deposition.map(|v| vec![v; steps])),
            outflow: ByFraction(outflow.map(|v| vec![v; steps])),
            exit_outflow,
        });
        self
    }

    /// Direct access for adjustments the builder does not cover.
    pub fn with(mut self, f: impl FnOnce(&mut ReachForcing)) -> Self {
        f(&mut self.forcing);
        self
    }

    pub fn build(self) -> ReachForcing {
        self.forcing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_lengths_aligned() {
        let f = ForcingBuilder::new(4, 2, 1)
            .volume(2.0)
            .outflow(1, 0.5, 0.5)
            .inflow(0, 3.0)
            .sediment([1.0; 6], [0.0; 3], [0.2; 3])
            .build();
        assert_eq!(f.steps(), 4);
        assert_eq!(f.outflow[1].start, vec![0.5; 4]);
        assert_eq!(f.outflow[0].end, vec![0.0; 4]);
        let sed = f.sediment.unwrap();
        assert_eq!(sed.exit_outflow.len(), 2);
        assert_eq!(sed.exit_outflow[0].0[2], vec![0.1; 4]);
    }
}
