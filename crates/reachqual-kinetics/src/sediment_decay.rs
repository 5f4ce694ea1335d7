//! First-order decay of sorbed mass, applied separately to suspended and
//! bed sediment.

use reachqual_core::constants::SORBED_NOISE_FLOOR;
use reachqual_core::sediment::ByFraction;

/// Sorbed decay rate for one compartment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SorbedDecayRate {
    /// Rate per interval.
    pub rate: f64,
    /// Temperature correction base.
    pub theta: f64,
}

/// Sorbed concentrations after decay and the mass removed per fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SorbedDecay {
    /// Concentration on each size fraction after decay.
    pub concentration: ByFraction<f64>,
    /// Mass decayed from each size fraction.
    pub decayed: ByFraction<f64>,
}

/// Decay the sorbed concentration on each size fraction.
///
/// A non-positive rate leaves everything unchanged. Concentrations at or
/// below the noise floor, including the undefined sentinel, are skipped.
pub fn decay_sorbed(
    rate: &SorbedDecayRate,
    temperature_offset: f64,
    sediment: ByFraction<f64>,
    concentration: ByFraction<f64>,
) -> SorbedDecay {
    let mut out = SorbedDecay {
        concentration,
        decayed: ByFraction::splat(0.0),
    };
    if rate.rate <= 0.0 {
        return out;
    }
    let fraction_lost = 1.0 - (-(rate.rate * rate.theta.powf(temperature_offset))).exp();
    for (f, conc) in concentration.iter() {
        if conc > SORBED_NOISE_FLOOR {
            let lost = conc * fraction_lost;
            out.concentration[f] = conc - lost;
            out.decayed[f] = lost * sediment[f];
        }
    }
    out
}
