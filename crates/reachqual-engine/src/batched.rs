//! Concurrent runs of independent reaches.
//!
//! [`run_batch`] distributes [`ReachJob`]s over scoped worker threads
//! through a shared job queue. Each reach runs on a single thread exactly
//! as [`run`](crate::run) would run it; results come back in input order.

use crossbeam_channel::unbounded;
use log::{info, warn};
use thiserror::Error;

use crate::config::ReachConfig;
use crate::forcing::ReachForcing;
use crate::reach::{run, ReachRun, RunError};

// ── Error type ─────────────────────────────────────────────────────

/// Error from a batched run, annotated with the failing reach index.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BatchError {
    /// A reach failed to run. The lowest failing index is reported.
    #[error("reach {reach_index} ({name}): {error}")]
    Run {
        /// Index of the reach in the job list (0-based).
        reach_index: usize,
        /// Reach name.
        name: String,
        /// The underlying error.
        #[source]
        error: RunError,
    },
    /// The worker running a reach panicked before reporting.
    #[error("reach {reach_index}: worker thread lost")]
    WorkerLost {
        /// Index of the reach in the job list (0-based).
        reach_index: usize,
    },
}

// ── Configuration ──────────────────────────────────────────────────

/// Worker pool settings for [`run_batch`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of worker threads. `None` picks half the available cores.
    pub worker_count: Option<usize>,
}

impl BatchConfig {
    /// Resolve the worker count: explicit counts clamp to `[1, 64]`,
    /// automatic counts to `[2, 16]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 64),
            None => {
                let cpus = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4);
                (cpus / 2).clamp(2, 16)
            }
        }
    }
}

/// One independent reach.
#[derive(Clone, Debug, PartialEq)]
pub struct ReachJob {
    /// Reach configuration.
    pub config: ReachConfig,
    /// Reach inputs.
    pub forcing: ReachForcing,
}

/// Run every job and return the results in job order.
///
/// # Errors
///
/// [`BatchError::Run`] for the lowest-indexed reach that failed, or
/// [`BatchError::WorkerLost`] if a worker died before reporting.
pub fn run_batch(jobs: &[ReachJob], config: &BatchConfig) -> Result<Vec<ReachRun>, BatchError> {
    if jobs.is_empty() {
        return Ok(Vec::new());
    }
    let workers = config.resolved_worker_count().min(jobs.len());
    info!("batch: {} reach(es) on {} worker(s)", jobs.len(), workers);

    let (job_tx, job_rx) = unbounded::<usize>();
    for index in 0..jobs.len() {
        job_tx
            .send(index)
            .map_err(|_| BatchError::WorkerLost { reach_index: index })?;
    }
    drop(job_tx);

    let (result_tx, result_rx) = unbounded::<(usize, Result<ReachRun, RunError>)>();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for index in job_rx.iter() {
                        let job = &jobs[index];
                        let outcome = run(&job.config, &job.forcing);
                        if result_tx.send((index, outcome)).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            if handle.join().is_err() {
                warn!("batch: a worker thread panicked");
            }
        }
    });
    drop(result_tx);

    let mut slots: Vec<Option<ReachRun>> = (0..jobs.len()).map(|_| None).collect();
    let mut failure: Option<(usize, RunError)> = None;
    for (index, outcome) in result_rx.iter() {
        match outcome {
            Ok(reach) => slots[index] = Some(reach),
            Err(error) => {
                if failure.as_ref().is_none_or(|(first, _)| index < *first) {
                    failure = Some((index, error));
                }
            }
        }
    }
    if let Some((reach_index, error)) = failure {
        return Err(BatchError::Run {
            reach_index,
            name: jobs[reach_index].config.name.clone(),
            error,
        });
    }
    slots
        .into_iter()
        .enumerate()
        .map(|(reach_index, slot)| slot.ok_or(BatchError::WorkerLost { reach_index }))
        .collect()
}
