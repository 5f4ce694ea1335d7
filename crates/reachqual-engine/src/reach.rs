//! The reach simulation loop.
//!
//! [`run`] compiles a [`RunPlan`] and executes it. Steps are strictly
//! sequential; within a step constituents run in index order so that every
//! parent's decay is known before its daughters are updated.

use std::time::Instant;

use log::{debug, info};
use reachqual_core::constants::MIN_REACTIVE_DEPTH_FT;
use reachqual_core::diagnostics::ErrorCounts;
use reachqual_core::id::ConstituentId;
use reachqual_core::process::ByProcess;
use reachqual_kinetics::ReaerationConditions;
use thiserror::Error;

use crate::config::{ConfigError, ReachConfig};
use crate::driver::{ConstituentState, StepContext};
use crate::forcing::ReachForcing;
use crate::metrics::RunMetrics;
use crate::outputs::{ConstituentSeries, MassBalance};
use crate::plan::RunPlan;

// ── RunError ───────────────────────────────────────────────────────

/// Errors that abort a run.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RunError {
    /// The configuration or forcing was rejected before the first step.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A state variable became NaN or infinite.
    #[error("constituent {constituent}: {output} is not finite at step {step}")]
    NonFinite {
        /// Constituent name.
        constituent: String,
        /// Step index.
        step: usize,
        /// Export name of the offending output.
        output: &'static str,
    },
}

// ── ReachRun ───────────────────────────────────────────────────────

/// Everything one reach run produces.
#[derive(Clone, Debug, PartialEq)]
pub struct ReachRun {
    /// Reach name.
    pub name: String,
    /// Output series per constituent, in configuration order.
    pub constituents: Vec<ConstituentSeries>,
    /// Diagnostic counts, pre-loop and runtime combined.
    pub diagnostics: ErrorCounts,
    /// Timing and step counts.
    pub metrics: RunMetrics,
}

impl ReachRun {
    /// Outputs of the constituent called `name`.
    pub fn constituent(&self, name: &str) -> Option<&ConstituentSeries> {
        self.constituents.iter().find(|c| c.name == name)
    }

    /// Mass balance of every constituent, in configuration order.
    pub fn mass_balances(&self) -> impl Iterator<Item = (&str, &MassBalance)> {
        self.constituents
            .iter()
            .map(|c| (c.name.as_str(), &c.mass_balance))
    }
}

/// Validate, compile and run one reach.
///
/// # Errors
///
/// [`RunError::Config`] if the configuration or forcing is rejected,
/// [`RunError::NonFinite`] if the state diverges.
pub fn run(config: &ReachConfig, forcing: &ReachForcing) -> Result<ReachRun, RunError> {
    let started = Instant::now();
    let (plan, counts) = RunPlan::compile(config, forcing)?;
    let compile_us = started.elapsed().as_micros() as u64;
    let mut result = plan.execute(counts)?;
    result.metrics.compile_us = compile_us;
    result.metrics.total_us = started.elapsed().as_micros() as u64;
    Ok(result)
}

impl RunPlan {
    /// Run the compiled plan, adding runtime diagnostics to `diagnostics`.
    ///
    /// # Errors
    ///
    /// [`RunError::NonFinite`] if a concentration or storage becomes NaN
    /// or infinite.
    pub fn execute(&self, mut diagnostics: ErrorCounts) -> Result<ReachRun, RunError> {
        let started = Instant::now();
        info!(
            "reach {}: {} constituent(s), {} step(s), {} exit(s)",
            self.name,
            self.constituents.len(),
            self.steps,
            self.exits
        );

        let mut states: Vec<ConstituentState> = self
            .constituents
            .iter()
            .enumerate()
            .map(|(i, cp)| ConstituentState::new(ConstituentId(i as u32), self, cp))
            .collect();
        let mut outputs: Vec<ConstituentSeries> = self
            .constituents
            .iter()
            .map(|cp| ConstituentSeries::new(&cp.name, self.steps, self.exits, cp.sorbed.is_some()))
            .collect();
        for ((state, out), cp) in states.iter().zip(outputs.iter_mut()).zip(&self.constituents) {
            out.mass_balance.initial_storage =
                state.storage(self.hydraulics.initial_volume) / cp.conv;
        }

        let mut decayed = vec![ByProcess::splat(0.0); self.constituents.len()];
        let mut constituent_us = vec![0u64; self.constituents.len()];
        let mut metrics = RunMetrics {
            steps: self.steps,
            ..RunMetrics::default()
        };

        let h = &self.hydraulics;
        let mut start_volume = h.initial_volume;
        for t in 0..self.steps {
            let volume = h.volume[t];
            let gated = h.depth_ft[t] <= MIN_REACTIVE_DEPTH_FT;
            if gated {
                metrics.gated_steps += 1;
            }
            if volume <= 0.0 {
                metrics.dry_steps += 1;
            }
            let reaeration = match (&self.reaeration, gated) {
                (Some(method), false) => method.coefficient(&ReaerationConditions {
                    depth_ft: h.depth_ft[t],
                    velocity_ft_s: h.velocity_ft_s[t],
                    wind_m_s: h.wind_m_s[t],
                    temperature_offset: self.environment.temperature_offset[t],
                    interval_hours: self.interval_hours,
                }),
                _ => 0.0,
            };
            let ctx = StepContext {
                step: t,
                start_volume,
                volume,
                gated,
                reaeration,
            };

            for (i, ((state, out), cp)) in states
                .iter_mut()
                .zip(outputs.iter_mut())
                .zip(&self.constituents)
                .enumerate()
            {
                let timer = Instant::now();
                state.step(self, cp, &ctx, &mut decayed, &mut diagnostics, out);
                constituent_us[i] += timer.elapsed().as_micros() as u64;

                let checks = [
                    ("DQAL", out.concentration[t]),
                    ("RRQAL", out.total_storage[t]),
                    ("RODQAL", out.dissolved_outflow[t]),
                ];
                for (output, value) in checks {
                    if !value.is_finite() {
                        return Err(RunError::NonFinite {
                            constituent: cp.name.clone(),
                            step: t,
                            output,
                        });
                    }
                }
            }
            start_volume = volume;
        }

        for ((state, out), cp) in states.iter().zip(outputs.iter_mut()).zip(&self.constituents) {
            out.mass_balance.final_storage = state.storage(start_volume) / cp.conv;
            debug!(
                "reach {}: {}: mass balance residual {:.3e} ({:.3e} relative)",
                self.name,
                cp.name,
                out.mass_balance.residual(),
                out.mass_balance.relative_residual()
            );
        }
        debug!(
            "reach {}: {} gated step(s), {} dry step(s), diagnostics: {}",
            self.name, metrics.gated_steps, metrics.dry_steps, diagnostics
        );

        metrics.constituent_us = self
            .constituents
            .iter()
            .map(|cp| cp.name.clone())
            .zip(constituent_us)
            .collect();
        metrics.total_us = started.elapsed().as_micros() as u64;
        Ok(ReachRun {
            name: self.name.clone(),
            constituents: outputs,
            diagnostics,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConstituentConfig, GenericDecayParams};
    use crate::forcing::{ConstituentForcing, ExitOutflow};
    use reachqual_core::units::UnitSystem;

    fn still_water(steps: usize, volume: f64) -> ReachForcing {
        ReachForcing {
            volume: vec![volume; steps],
            outflow: vec![ExitOutflow {
                start: vec![0.0; steps],
                end: vec![0.0; steps],
            }],
            depth: Some(vec![3.0; steps]),
            constituents: vec![ConstituentForcing::default()],
            ..Default::default()
        }
    }

    #[test]
    fn conservative_constituent_keeps_its_concentration() {
        let mut config = ReachConfig::new("pond", UnitSystem::English)
            .with_constituent(ConstituentConfig::new("tracer", 1.0).with_initial_concentration(4.0));
        config.initial_volume = 2.0;
        let run = run(&config, &still_water(5, 2.0)).unwrap();
        let tracer = run.constituent("tracer").unwrap();
        assert!(tracer.concentration.iter().all(|&c| (c - 4.0).abs() < 1e-12));
        assert!(tracer.mass_balance.residual().abs() < 1e-6);
        assert!(run.diagnostics.is_clean());
        assert_eq!(run.metrics.steps, 5);
        assert_eq!(run.metrics.gated_steps, 0);
    }

    #[test]
    fn first_order_decay_over_a_day() {
        let mut config = ReachConfig::new("pond", UnitSystem::English).with_constituent(
            ConstituentConfig::new("x", 1.0)
                .with_initial_concentration(1.0)
                .with_generic_decay(GenericDecayParams::new(0.24)),
        );
        config.initial_volume = 1.0;
        let run = run(&config, &still_water(24, 1.0)).unwrap();
        let x = run.constituent("x").unwrap();
        // 0.24 per day at 20 °C would give e^-0.24; 60 °F is below 20 °C.
        let last = *x.concentration.last().unwrap();
        assert!(last < 1.0 && last > (-0.24f64).exp());
        assert!(x.mass_balance.relative_residual().abs() < 1e-9);
        assert_eq!(run.metrics.constituent_us.len(), 1);
    }

    #[test]
    fn config_errors_propagate() {
        let config = ReachConfig::new("empty", UnitSystem::English);
        assert_eq!(
            run(&config, &still_water(1, 1.0)).err(),
            Some(RunError::Config(ConfigError::NoConstituents))
        );
    }
}
