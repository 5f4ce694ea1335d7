//! Per-run performance and activity metrics.
//!
//! [`RunMetrics`] is returned with every [`ReachRun`](crate::ReachRun).

/// Timing and step counts collected during one reach run.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Wall-clock time for the whole run, including plan compilation.
    pub total_us: u64,
    /// Time spent compiling the run plan.
    pub compile_us: u64,
    /// Per-constituent step time: `(name, microseconds)`.
    pub constituent_us: Vec<(String, u64)>,
    /// Number of steps simulated.
    pub steps: usize,
    /// Steps where the reach was too shallow for any reaction.
    pub gated_steps: usize,
    /// Steps ending with a dry reach.
    pub dry_steps: usize,
}

impl RunMetrics {
    /// Fraction of steps that were depth gated.
    pub fn gated_fraction(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.gated_steps as f64 / self.steps as f64
        }
    }
}
