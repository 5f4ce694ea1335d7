//! First-order decay of the dissolved phase by six processes.
//!
//! Each process contributes a rate for the interval. The combined loss
//! `C · (1 - e^(-Σk)) · V` is apportioned to the processes in proportion to
//! their rates, so the per-process losses always sum to the total.

use reachqual_core::constants::{DISSOLVED_NOISE_FLOOR, LIGHT_BANDS};
use reachqual_core::process::{ByProcess, DecayProcess};

/// Acid, base and neutral hydrolysis. Rates are per interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hydrolysis {
    /// Acid-catalysed rate constant (per molar H⁺).
    pub ka: f64,
    /// Base-catalysed rate constant (per molar OH⁻).
    pub kb: f64,
    /// Neutral rate.
    pub kn: f64,
    /// Temperature correction base.
    pub theta: f64,
}

/// Oxidation by free radical oxygen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oxidation {
    /// Second-order rate constant per interval.
    pub kox: f64,
    /// Temperature correction base.
    pub theta: f64,
}

/// Direct photolysis driven by the light model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Photolysis {
    /// Molar absorption coefficient per band.
    pub absorption: [f64; LIGHT_BANDS],
    /// Quantum yield.
    pub quantum_yield: f64,
    /// Temperature correction base.
    pub theta: f64,
    /// Solar-to-interval scale, `cfsaex · hours / 24`.
    pub scale: f64,
}

/// Volatilization as a multiple of the oxygen reaeration coefficient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Volatilization {
    /// Ratio of the constituent's transfer rate to oxygen's.
    pub cfgas: f64,
}

/// Second-order biodegradation by active biomass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Biodegradation {
    /// Rate per unit biomass per interval.
    pub biocon: f64,
    /// Temperature correction base.
    pub theta: f64,
}

/// Generalized first-order decay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenericDecay {
    /// Rate per interval.
    pub rate: f64,
    /// Temperature correction base.
    pub theta: f64,
}

/// Whether photolysis sees sunlight this interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diurnal {
    /// Sub-daily interval: light only between 05:00 and 17:00, at twice the
    /// daily average intensity.
    Resolved {
        /// The interval starts in daylight hours.
        daylight: bool,
    },
    /// Daily or longer interval: daily average light.
    Daily,
}

impl Diurnal {
    /// Diurnal state for an interval starting at `hour` (0-23).
    pub fn at(hour: u32, interval_hours: f64) -> Self {
        if interval_hours < 24.0 {
            Self::Resolved {
                daylight: (5..17).contains(&hour),
            }
        } else {
            Self::Daily
        }
    }

    fn factor(self) -> f64 {
        match self {
            Self::Resolved { daylight: true } => 2.0,
            Self::Resolved { daylight: false } => 0.0,
            Self::Daily => 1.0,
        }
    }
}

/// Environmental drivers of dissolved decay for one interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayConditions<'a> {
    /// Offset of the water temperature from 20 °C.
    pub temperature_offset: f64,
    /// pH.
    pub ph: f64,
    /// Free radical oxygen concentration.
    pub oxidant: f64,
    /// Light available per band, from [`crate::attenuation_factors`].
    pub light: &'a [f64; LIGHT_BANDS],
    /// Oxygen reaeration coefficient for the interval.
    pub reaeration: f64,
    /// Active biomass.
    pub biomass: f64,
    /// Day/night state.
    pub diurnal: Diurnal,
}

/// Mass removed by dissolved decay in one interval.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DecayBreakdown {
    /// Loss attributed to each process.
    pub by_process: ByProcess<f64>,
    /// Total loss.
    pub total: f64,
}

impl DecayBreakdown {
    /// No loss.
    pub const ZERO: Self = Self {
        by_process: ByProcess([0.0; DecayProcess::COUNT]),
        total: 0.0,
    };
}

/// The decay processes enabled for one constituent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DissolvedKinetics {
    /// Hydrolysis, if simulated.
    pub hydrolysis: Option<Hydrolysis>,
    /// Oxidation, if simulated.
    pub oxidation: Option<Oxidation>,
    /// Photolysis, if simulated.
    pub photolysis: Option<Photolysis>,
    /// Volatilization, if simulated.
    pub volatilization: Option<Volatilization>,
    /// Biodegradation, if simulated.
    pub biodegradation: Option<Biodegradation>,
    /// Generalized decay, if simulated.
    pub generic: Option<GenericDecay>,
}

impl DissolvedKinetics {
    /// Whether `process` is enabled.
    pub fn simulates(&self, process: DecayProcess) -> bool {
        match process {
            DecayProcess::Hydrolysis => self.hydrolysis.is_some(),
            DecayProcess::Oxidation => self.oxidation.is_some(),
            DecayProcess::Photolysis => self.photolysis.is_some(),
            DecayProcess::Volatilization => self.volatilization.is_some(),
            DecayProcess::Biodegradation => self.biodegradation.is_some(),
            DecayProcess::GenericDecay => self.generic.is_some(),
        }
    }

    /// Rate of each process over the interval; disabled processes are zero.
    pub fn rates(&self, conditions: &DecayConditions<'_>) -> ByProcess<f64> {
        let tw20 = conditions.temperature_offset;
        let mut k = ByProcess::splat(0.0);
        if let Some(h) = &self.hydrolysis {
            let acid = h.ka * 10f64.powf(-conditions.ph);
            let base = h.kb * 10f64.powf(conditions.ph - 14.0);
            k[DecayProcess::Hydrolysis] = (acid + base + h.kn) * h.theta.powf(tw20);
        }
        if let Some(o) = &self.oxidation {
            k[DecayProcess::Oxidation] = o.kox * conditions.oxidant * o.theta.powf(tw20);
        }
        if let Some(p) = &self.photolysis {
            let absorbed: f64 = conditions
                .light
                .iter()
                .zip(&p.absorption)
                .map(|(light, eps)| light * eps)
                .sum();
            k[DecayProcess::Photolysis] = p.scale
                * p.quantum_yield
                * absorbed
                * p.theta.powf(tw20)
                * conditions.diurnal.factor();
        }
        if let Some(v) = &self.volatilization {
            k[DecayProcess::Volatilization] = conditions.reaeration * v.cfgas;
        }
        if let Some(b) = &self.biodegradation {
            k[DecayProcess::Biodegradation] = b.biocon * conditions.biomass * b.theta.powf(tw20);
        }
        if let Some(g) = &self.generic {
            k[DecayProcess::GenericDecay] = g.rate * g.theta.powf(tw20);
        }
        k
    }

    /// Loss from `volume` at `concentration` over the interval.
    ///
    /// Concentrations at or below the noise floor (including the undefined
    /// sentinel) do not decay.
    pub fn decay(
        &self,
        conditions: &DecayConditions<'_>,
        concentration: f64,
        volume: f64,
    ) -> DecayBreakdown {
        if concentration <= DISSOLVED_NOISE_FLOOR {
            return DecayBreakdown::ZERO;
        }
        let rates = self.rates(conditions);
        let sum = rates.sum();
        if sum <= 0.0 {
            return DecayBreakdown::ZERO;
        }
        let total = concentration * (1.0 - (-sum).exp()) * volume;
        DecayBreakdown {
            by_process: rates.map(|_, k| k / sum * total),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DARK: [f64; LIGHT_BANDS] = [0.0; LIGHT_BANDS];

    fn conditions(light: &[f64; LIGHT_BANDS]) -> DecayConditions<'_> {
        DecayConditions {
            temperature_offset: 0.0,
            ph: 7.0,
            oxidant: 0.0,
            light,
            reaeration: 0.0,
            biomass: 0.0,
            diurnal: Diurnal::Daily,
        }
    }

    fn generic(rate: f64) -> DissolvedKinetics {
        DissolvedKinetics {
            generic: Some(GenericDecay { rate, theta: 1.07 }),
            ..Default::default()
        }
    }

    #[test]
    fn first_order_loss() {
        let d = generic(0.1).decay(&conditions(&DARK), 2.0, 50.0);
        let expected = 2.0 * (1.0 - (-0.1f64).exp()) * 50.0;
        assert!((d.total - expected).abs() < 1e-12);
        assert_eq!(d.by_process[DecayProcess::GenericDecay], d.total);
    }

    #[test]
    fn below_noise_floor_is_skipped() {
        let d = generic(0.1).decay(&conditions(&DARK), 1.0e-26, 50.0);
        assert_eq!(d, DecayBreakdown::ZERO);
    }

    #[test]
    fn no_processes_no_loss() {
        let d = DissolvedKinetics::default().decay(&conditions(&DARK), 3.0, 10.0);
        assert_eq!(d, DecayBreakdown::ZERO);
    }

    #[test]
    fn hydrolysis_responds_to_ph() {
        let k = DissolvedKinetics {
            hydrolysis: Some(Hydrolysis {
                ka: 1.0e7,
                kb: 0.0,
                kn: 0.0,
                theta: 1.07,
            }),
            ..Default::default()
        };
        let mut c = conditions(&DARK);
        let neutral = k.rates(&c)[DecayProcess::Hydrolysis];
        assert!((neutral - 1.0).abs() < 1e-9);
        c.ph = 6.0;
        assert!((k.rates(&c)[DecayProcess::Hydrolysis] - 10.0).abs() < 1e-8);
    }

    #[test]
    fn photolysis_follows_daylight() {
        let k = DissolvedKinetics {
            photolysis: Some(Photolysis {
                absorption: [1.0; LIGHT_BANDS],
                quantum_yield: 0.5,
                theta: 1.0,
                scale: 0.1,
            }),
            ..Default::default()
        };
        let light = [1.0; LIGHT_BANDS];
        let mut c = conditions(&light);
        let daily = k.rates(&c)[DecayProcess::Photolysis];
        assert!((daily - 0.1 * 0.5 * 18.0).abs() < 1e-12);
        c.diurnal = Diurnal::at(12, 1.0);
        assert_eq!(k.rates(&c)[DecayProcess::Photolysis], 2.0 * daily);
        c.diurnal = Diurnal::at(17, 1.0);
        assert_eq!(k.rates(&c)[DecayProcess::Photolysis], 0.0);
        assert_eq!(Diurnal::at(3, 24.0), Diurnal::Daily);
    }

    #[test]
    fn volatilization_scales_reaeration() {
        let k = DissolvedKinetics {
            volatilization: Some(Volatilization { cfgas: 0.25 }),
            ..Default::default()
        };
        let mut c = conditions(&DARK);
        c.reaeration = 0.8;
        assert_eq!(k.rates(&c)[DecayProcess::Volatilization], 0.2);
    }

    fn diurnal() -> impl Strategy<Value = Diurnal> {
        prop_oneof![
            Just(Diurnal::Daily),
            any::<bool>().prop_map(|daylight| Diurnal::Resolved { daylight }),
        ]
    }

    proptest! {
        #[test]
        fn process_losses_sum_to_total(
            enabled in proptest::array::uniform6(any::<bool>()),
            kn in 1.0e-4f64..0.5,
            kox in 1.0e-4f64..0.5,
            phi in 1.0e-4f64..0.5,
            rea in 1.0e-4f64..0.5,
            bio in 1.0e-3f64..5.0,
            fst in 1.0e-4f64..0.5,
            level in 0.01f64..2.0,
            diurnal in diurnal(),
            conc in 0.0f64..100.0,
            vol in 0.0f64..1.0e6,
            tw20 in -20.0f64..30.0,
        ) {
            let k = DissolvedKinetics {
                hydrolysis: enabled[0].then_some(Hydrolysis { ka: 0.0, kb: 0.0, kn, theta: 1.03 }),
                oxidation: enabled[1].then_some(Oxidation { kox, theta: 1.05 }),
                photolysis: enabled[2].then_some(Photolysis {
                    absorption: std::array::from_fn(|band| 0.5 + band as f64 * 0.1),
                    quantum_yield: phi,
                    theta: 1.02,
                    scale: 1.0 / 24.0,
                }),
                volatilization: enabled[3].then_some(Volatilization { cfgas: 0.3 }),
                biodegradation: enabled[4].then_some(Biodegradation { biocon: 0.01, theta: 1.07 }),
                generic: enabled[5].then_some(GenericDecay { rate: fst, theta: 1.07 }),
            };
            let light = std::array::from_fn(|band| level / (1.0 + band as f64));
            let c = DecayConditions {
                temperature_offset: tw20,
                ph: 7.0,
                oxidant: 1.0,
                light: &light,
                reaeration: rea,
                biomass: bio,
                diurnal,
            };
            let d = k.decay(&c, conc, vol);
            let sum = d.by_process.sum();
            prop_assert!((sum - d.total).abs() <= 1e-9 * d.total.abs().max(1.0));
            prop_assert!(d.total <= conc * vol + 1e-9);
            for (process, loss) in d.by_process.iter() {
                prop_assert!(loss >= 0.0);
                if !k.simulates(process) {
                    prop_assert_eq!(loss, 0.0);
                }
            }
        }
    }
}
