//! First-order approach to sorption equilibrium between the dissolved phase
//! and the six sediment classes.
//!
//! For each class with sediment, the transfer coefficient
//! `a = rate · theta^(T-20)` relaxes the sorbed concentration towards
//! `kd · C`. Solving all six relaxations together with the dissolved mass
//! balance gives a closed-form update that conserves total mass.

use reachqual_core::sediment::{BySediment, SedimentClass};

/// Partition and transfer parameters for every sediment class.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SorptionRates {
    /// Partition coefficient.
    pub kd: BySediment<f64>,
    /// Transfer rate per interval.
    pub rate: BySediment<f64>,
    /// Temperature correction base.
    pub theta: BySediment<f64>,
}

/// Result of [`equilibrate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SorptionExchange {
    /// Dissolved concentration after exchange.
    pub dissolved: f64,
    /// Sorbed concentration on each class after exchange.
    pub sorbed: BySediment<f64>,
    /// Mass moved from the dissolved phase onto each class.
    pub flux: BySediment<f64>,
    /// Sum of `flux`.
    pub total_flux: f64,
}

/// Exchange mass between the dissolved phase of `volume` and the sorbed
/// phase on `sediment`.
///
/// Classes without sediment keep their concentration and carry no flux. A
/// dry reach exchanges nothing.
pub fn equilibrate(
    rates: &SorptionRates,
    temperature_offset: f64,
    volume: f64,
    sediment: &BySediment<f64>,
    dissolved: f64,
    sorbed: &BySediment<f64>,
) -> SorptionExchange {
    let mut out = SorptionExchange {
        dissolved,
        sorbed: *sorbed,
        flux: BySediment::splat(0.0),
        total_flux: 0.0,
    };
    if volume <= 0.0 {
        return out;
    }

    let mut numerator = volume * dissolved;
    let mut denominator = volume;
    let mut retained = BySediment::splat(0.0);
    let mut uptake = BySediment::splat(0.0);
    for class in SedimentClass::ALL {
        let sed = sediment[class];
        if sed <= 0.0 {
            continue;
        }
        let a = rates.rate[class] * rates.theta[class].powf(temperature_offset);
        let keep = 1.0 / (1.0 + a);
        uptake[class] = a * rates.kd[class] * keep;
        retained[class] = sorbed[class] * keep;
        numerator += (sorbed[class] - retained[class]) * sed;
        denominator += sed * uptake[class];
    }
    let conc = numerator / denominator;
    out.dissolved = conc;

    for class in SedimentClass::ALL {
        let sed = sediment[class];
        if sed <= 0.0 {
            continue;
        }
        let updated = retained[class] + conc * uptake[class];
        out.flux[class] = (updated - sorbed[class]) * sed;
        out.sorbed[class] = updated;
    }
    out.total_flux = out.flux.sum();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use reachqual_core::constants::UNDEFINED;

    fn uniform(kd: f64, rate: f64) -> SorptionRates {
        SorptionRates {
            kd: BySediment::splat(kd),
            rate: BySediment::splat(rate),
            theta: BySediment::splat(1.0),
        }
    }

    #[test]
    fn fast_exchange_reaches_partition_equilibrium() {
        let sediment = BySediment([5.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let sorbed = BySediment([0.0, UNDEFINED, UNDEFINED, UNDEFINED, UNDEFINED, UNDEFINED]);
        let x = equilibrate(&uniform(2.0, 1.0e9), 0.0, 10.0, &sediment, 3.0, &sorbed);
        // 30 units shared between 10 volume units and 5 · kd = 10 sorbed units.
        assert!((x.dissolved - 1.5).abs() < 1e-6);
        assert!((x.sorbed[SedimentClass::SuspendedSand] - 3.0).abs() < 1e-6);
        assert!((x.total_flux - 15.0).abs() < 1e-5);
        assert_eq!(x.sorbed[SedimentClass::BedClay], UNDEFINED);
        assert_eq!(x.flux[SedimentClass::BedClay], 0.0);
    }

    #[test]
    fn dry_reach_is_untouched() {
        let sediment = BySediment::splat(1.0);
        let sorbed = BySediment::splat(2.0);
        let x = equilibrate(&uniform(1.0, 1.0), 0.0, 0.0, &sediment, 4.0, &sorbed);
        assert_eq!(x.dissolved, 4.0);
        assert_eq!(x.sorbed, sorbed);
        assert_eq!(x.total_flux, 0.0);
    }

    proptest! {
        #[test]
        fn exchange_conserves_mass(
            volume in 1.0f64..1.0e5,
            dissolved in 0.0f64..50.0,
            sed in proptest::array::uniform6(0.0f64..1.0e3),
            sorbed in proptest::array::uniform6(0.0f64..20.0),
            kd in 0.0f64..10.0,
            rate in 0.0f64..5.0,
        ) {
            let sediment = BySediment(sed);
            let sorbed = BySediment(sorbed);
            let x = equilibrate(&uniform(kd, rate), 0.0, volume, &sediment, dissolved, &sorbed);
            let before: f64 = volume * dissolved
                + SedimentClass::ALL.iter().map(|&c| sorbed[c] * sediment[c]).sum::<f64>();
            let after: f64 = volume * x.dissolved
                + SedimentClass::ALL.iter().map(|&c| x.sorbed[c] * sediment[c]).sum::<f64>();
            prop_assert!((before - after).abs() <= 1e-8 * before.max(1.0));
            prop_assert!((volume * (dissolved - x.dissolved) - x.total_flux).abs()
                <= 1e-8 * before.max(1.0));
        }
    }
}
