//! The per-constituent time-step driver.
//!
//! [`ConstituentState`] carries one constituent's dissolved and sorbed
//! state across steps. [`ConstituentState::step`] runs the fixed operator
//! order for one interval and writes every output slot for that step.

use log::trace;
use reachqual_core::constants::{is_undefined, LIGHT_BANDS};
use reachqual_core::diagnostics::ErrorCounts;
use reachqual_core::id::ConstituentId;
use reachqual_core::process::ByProcess;
use reachqual_core::sediment::{BySediment, SedimentClass, SizeFraction};
use reachqual_kinetics::{
    advect, advect_sorbed, atmospheric_deposition, attenuation_factors, daughter_inflow,
    decay_sorbed, equilibrate, DecayBreakdown, DecayConditions, Deposition, ExitFlows,
    ExitValues, LightConditions, SorbedInputs,
};

use crate::outputs::ConstituentSeries;
use crate::plan::{ConstituentPlan, RunPlan, SedimentPlan};

/// Reach-wide values shared by every constituent in one step.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StepContext {
    pub step: usize,
    pub start_volume: f64,
    pub volume: f64,
    /// The reach is too shallow for any reaction.
    pub gated: bool,
    /// Reaeration coefficient for the interval; zero when gated.
    pub reaeration: f64,
}

/// Mass a value of `concentration` represents over `amount` of carrier.
///
/// An undefined concentration holds no mass.
pub(crate) fn stored(concentration: f64, amount: f64) -> f64 {
    if is_undefined(concentration) {
        0.0
    } else {
        concentration * amount
    }
}

/// State of one constituent between steps, in internal units.
#[derive(Clone, Debug)]
pub(crate) struct ConstituentState {
    id: ConstituentId,
    /// Dissolved concentration.
    dqal: f64,
    /// Sorbed concentration per class.
    sqal: BySediment<f64>,
    /// Sorbed mass per class.
    sorbed_mass: BySediment<f64>,
}

impl ConstituentState {
    pub fn new(id: ConstituentId, plan: &RunPlan, cp: &ConstituentPlan) -> Self {
        let (sqal, sorbed_mass) = match (&cp.sorbed, &plan.sediment) {
            (Some(sp), Some(sed)) => {
                let sqal = sp.initial_sorbed;
                let mass = sqal.map(|class, c| stored(c, sed.initial_storage[class]));
                (sqal, mass)
            }
            _ => (BySediment::splat(0.0), BySediment::splat(0.0)),
        };
        Self {
            id,
            dqal: cp.initial_concentration,
            sqal,
            sorbed_mass,
        }
    }

    /// Dissolved plus sorbed mass currently in the reach.
    pub fn storage(&self, volume: f64) -> f64 {
        stored(self.dqal, volume) + self.sorbed_mass.sum()
    }

    /// Advance one step and write step `ctx.step` of `out`.
    ///
    /// `decayed` holds this step's per-process losses of every constituent;
    /// slots below this constituent's index are already filled and this
    /// constituent's slot is written here.
    pub fn step(
        &mut self,
        plan: &RunPlan,
        cp: &ConstituentPlan,
        ctx: &StepContext,
        decayed: &mut [ByProcess<f64>],
        counts: &mut ErrorCounts,
        out: &mut ConstituentSeries,
    ) {
        let t = ctx.step;
        let e = plan.exits;
        let h = &plan.hydraulics;
        let env = &plan.environment;
        let tw20 = env.temperature_offset[t];

        // Atmospheric deposition joins the dissolved inflow.
        let deposition = match &cp.deposition {
            Some(d) => atmospheric_deposition(
                h.area_ft2[t],
                h.precipitation_ft[t],
                cp.conv,
                d.dry[t],
                d.wet[t],
            ),
            None => Deposition::default(),
        };
        let inflow = cp.inflow[t];

        let flows = ExitFlows {
            start_total: h.start_total[t],
            end_total: h.end_total[t],
            start_by_exit: &h.start_by_exit[t * e..(t + 1) * e],
            end_by_exit: &h.end_by_exit[t * e..(t + 1) * e],
        };
        let advection = advect(
            inflow + deposition.total(),
            self.dqal,
            ctx.start_volume,
            ctx.volume,
            &flows,
        );
        let mut dqal = advection.concentration;

        let mut decay = DecayBreakdown::ZERO;
        let mut gain = 0.0;
        if !ctx.gated {
            let light = match (&cp.extinction, env.bucket) {
                (Some(extinction), Some(bucket)) => attenuation_factors(
                    extinction,
                    &LightConditions {
                        depth_ft: h.depth_ft[t],
                        sediment_concentration: env.sediment_concentration[t],
                        phytoplankton: env.phytoplankton[t],
                        cloud_cover: env.cloud_cover[t],
                        season: env.seasons[t],
                        bucket,
                    },
                ),
                _ => [0.0; LIGHT_BANDS],
            };
            let conditions = DecayConditions {
                temperature_offset: tw20,
                ph: env.ph[t],
                oxidant: env.oxidant[t],
                light: &light,
                reaeration: ctx.reaeration,
                biomass: cp.biomass[t],
                diurnal: env.diurnal[t],
            };
            decay = cp.kinetics.decay(&conditions, dqal, ctx.volume);
            if cp.has_parents {
                gain = daughter_inflow(self.id, &cp.produces, decayed, &plan.coupling);
            }
            if ctx.volume > 0.0 {
                dqal += (gain - decay.total) / ctx.volume;
            } else {
                gain = 0.0;
            }
        }
        decayed[self.id.index()] = decay.by_process;

        let conv = cp.conv;
        out.concentration[t] = dqal;
        out.dissolved_inflow[t] = inflow / conv;
        out.dissolved_outflow[t] = advection.outflow / conv;
        out.daughter_gain[t] = gain / conv;
        for (process, lost) in decay.by_process.iter() {
            out.decay[process][t] = lost / conv;
        }
        out.decay_total[t] = decay.total / conv;
        out.dry_deposition[t] = deposition.dry / conv;
        out.wet_deposition[t] = deposition.wet / conv;
        out.deposition[t] = deposition.total() / conv;
        for (exit, mass) in out.exits.iter_mut().zip(&advection.exit_outflow) {
            exit.dissolved[t] = mass / conv;
        }

        let balance = &mut out.mass_balance;
        balance.inflow += inflow / conv;
        balance.deposition += deposition.total() / conv;
        balance.daughter_gain += gain / conv;
        balance.outflow += advection.outflow / conv;
        balance.dissolved_decay += decay.total / conv;

        let mut sorbed_inflow = 0.0;
        let mut sorbed_outflow = 0.0;
        if let (Some(sp), Some(sed)) = (&cp.sorbed, &plan.sediment) {
            let storage = storage_at(&sed.storage, t);
            let transport = self.transport_sorbed(cp, sed, t, e, counts, out);
            sorbed_inflow = transport.0;
            sorbed_outflow = transport.1;

            let mut sqdec = BySediment::splat(0.0);
            let mut adsorption = BySediment::splat(0.0);
            if !ctx.gated {
                let suspended =
                    decay_sorbed(&sp.suspended_decay, tw20, storage.suspended(), self.sqal.suspended());
                let bed = decay_sorbed(&sp.bed_decay, tw20, storage.bed(), self.sqal.bed());
                self.sqal = BySediment::from_parts(suspended.concentration, bed.concentration);
                sqdec = BySediment::from_parts(suspended.decayed, bed.decayed);

                let exchange = equilibrate(&sp.rates, tw20, ctx.volume, &storage, dqal, &self.sqal);
                dqal = exchange.dissolved;
                self.sqal = exchange.sorbed;
                adsorption = exchange.flux;
            }
            self.sorbed_mass = self.sqal.map(|class, c| stored(c, storage[class]));
            out.concentration[t] = dqal;

            if let Some(s) = out.sorbed.as_mut() {
                for class in SedimentClass::ALL {
                    s.concentration[class][t] = self.sqal[class];
                    s.adsorption[class][t] = adsorption[class] / conv;
                    s.decay[class][t] = sqdec[class] / conv;
                    s.storage[class][t] = self.sorbed_mass[class] / conv;
                }
                s.adsorption_total[t] = adsorption.sum() / conv;
                s.decay_total[t] = sqdec.sum() / conv;
                s.suspended_storage[t] = self.sorbed_mass.suspended().sum() / conv;
                s.bed_storage[t] = self.sorbed_mass.bed().sum() / conv;
                for fraction in SizeFraction::ALL {
                    s.fraction_storage[fraction][t] = (self.sorbed_mass
                        [SedimentClass::suspended(fraction)]
                        + self.sorbed_mass[SedimentClass::bed(fraction)])
                        / conv;
                }
                s.storage_total[t] = self.sorbed_mass.sum() / conv;
            }
            out.mass_balance.sorbed_decay += sqdec.sum() / conv;
        }
        self.dqal = dqal;

        let dissolved_storage = stored(dqal, ctx.volume);
        out.dissolved_storage[t] = dissolved_storage / conv;
        out.total_storage[t] = (dissolved_storage + self.sorbed_mass.sum()) / conv;
        out.total_inflow[t] = (inflow + sorbed_inflow) / conv;
        out.total_outflow[t] = (advection.outflow + sorbed_outflow) / conv;
        for exit in &mut out.exits {
            exit.total[t] = exit.dissolved[t] + exit.sorbed_total[t];
        }
        out.mass_balance.inflow += sorbed_inflow / conv;
        out.mass_balance.outflow += sorbed_outflow / conv;
    }

    /// Move sorbed mass with each size fraction and record the transport
    /// outputs. Returns the sorbed inflow and outflow masses.
    fn transport_sorbed(
        &mut self,
        cp: &ConstituentPlan,
        sed: &SedimentPlan,
        t: usize,
        exits: usize,
        counts: &mut ErrorCounts,
        out: &mut ConstituentSeries,
    ) -> (f64, f64) {
        let conv = cp.conv;
        let mut inflow_total = 0.0;
        let mut outflow_total = 0.0;
        let mut deposition_total = 0.0;
        let mut exit_totals = exit_scratch(exits);
        let raised_before = counts.total();

        for fraction in SizeFraction::ALL {
            let suspended = SedimentClass::suspended(fraction);
            let bed = SedimentClass::bed(fraction);
            let inflow = cp.sorbed_inflow[fraction][t];
            let inputs = SorbedInputs {
                inflow,
                suspended_sediment: sed.storage[suspended][t],
                bed_sediment: sed.storage[bed][t],
                deposition: sed.deposition[fraction][t],
                outflow_sediment: sed.outflow[fraction][t],
                exit_outflow_sediment: &sed.exit_outflow[fraction][t * exits..(t + 1) * exits],
                suspended_sorbed: self.sorbed_mass[suspended],
                bed_sorbed: self.sorbed_mass[bed],
            };
            let transport = advect_sorbed(&inputs, counts);
            self.sqal[suspended] = transport.suspended_concentration;
            self.sqal[bed] = transport.bed_concentration;

            inflow_total += inflow;
            outflow_total += transport.outflow;
            deposition_total += transport.deposited;
            if let Some(s) = out.sorbed.as_mut() {
                s.inflow[fraction][t] = inflow / conv;
                s.outflow[fraction][t] = transport.outflow / conv;
                s.deposition[fraction][t] = transport.deposited / conv;
            }
            for (n, mass) in transport.exit_outflow.iter().enumerate() {
                if let Some(exit) = out.exits.get_mut(n) {
                    exit.sorbed[fraction][t] = mass / conv;
                }
                if let Some(total) = exit_totals.get_mut(n) {
                    *total += mass;
                }
            }
        }

        if counts.total() > raised_before {
            trace!(
                "{}: step {t}: sorbed transport raised {} diagnostic(s)",
                cp.name,
                counts.total() - raised_before
            );
        }
        if let Some(s) = out.sorbed.as_mut() {
            s.inflow_total[t] = inflow_total / conv;
            s.outflow_total[t] = outflow_total / conv;
            s.deposition_total[t] = deposition_total / conv;
        }
        for (exit, mass) in out.exits.iter_mut().zip(exit_totals) {
            exit.sorbed_total[t] = mass / conv;
        }
        (inflow_total, outflow_total)
    }
}

/// Zeroed per-exit accumulator; inline for the usual handful of exits.
fn exit_scratch(exits: usize) -> ExitValues {
    ExitValues::from_elem(0.0, exits)
}

/// Sediment storage of every class at step `t`.
fn storage_at(storage: &BySediment<Vec<f64>>, t: usize) -> BySediment<f64> {
    BySediment(std::array::from_fn(|i| storage.0[i][t]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reachqual_core::constants::UNDEFINED;

    #[test]
    fn undefined_concentration_stores_nothing() {
        assert_eq!(stored(UNDEFINED, 10.0), 0.0);
        assert_eq!(stored(2.0, 10.0), 20.0);
    }

    #[test]
    fn storage_column_reads_one_step() {
        let series = BySediment(std::array::from_fn(|i| vec![i as f64, 10.0 + i as f64]));
        let column = storage_at(&series, 1);
        assert_eq!(column[SedimentClass::BedClay], 15.0);
        assert_eq!(column.suspended().sum(), 33.0);
    }

    #[test]
    fn exit_accumulator_stays_inline() {
        for exits in 1..=4 {
            let scratch = exit_scratch(exits);
            assert_eq!(scratch.len(), exits);
            assert!(!scratch.spilled());
            assert!(scratch.iter().all(|&v| v == 0.0));
        }
    }
}
