//! Photolysis light model: the solar light table and per-band attenuation.
//!
//! The table holds relative light intensity for eighteen wavelength bands,
//! four seasons and five latitude buckets (10° wide, centred on 0°, 10°,
//! 20°, 30° and 40°+).

use reachqual_core::constants::LIGHT_BANDS;
use reachqual_core::units::FT_PER_M;
use thiserror::Error;

/// Latitude outside the range covered by the light table.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LightTableError {
    /// `|latitude|` falls beyond the last latitude bucket.
    #[error("latitude {latitude} is outside the light table (|latitude| < 55)")]
    LatitudeOutOfRange {
        /// Offending latitude in degrees.
        latitude: f64,
    },
}

/// Season used to select a column of the light table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Season {
    /// March through May in the northern hemisphere.
    Spring,
    /// June through August in the northern hemisphere.
    Summer,
    /// September through November in the northern hemisphere.
    Fall,
    /// December through February in the northern hemisphere.
    Winter,
}

impl Season {
    const NORTHERN: [Season; 12] = [
        Season::Winter,
        Season::Winter,
        Season::Spring,
        Season::Spring,
        Season::Spring,
        Season::Summer,
        Season::Summer,
        Season::Summer,
        Season::Fall,
        Season::Fall,
        Season::Fall,
        Season::Winter,
    ];

    /// Season for a calendar month (1-12) at `latitude`.
    ///
    /// The southern hemisphere is two seasons out of phase.
    pub fn for_month(month: u32, latitude: f64) -> Self {
        let slot = (month.clamp(1, 12) - 1) as usize;
        let season = Self::NORTHERN[slot];
        if latitude < 0.0 {
            season.opposite()
        } else {
            season
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Spring => Self::Fall,
            Self::Summer => Self::Winter,
            Self::Fall => Self::Spring,
            Self::Winter => Self::Summer,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// One of the five latitude rows of the light table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LatitudeBucket(u8);

impl LatitudeBucket {
    /// Number of latitude buckets.
    pub const COUNT: u8 = 5;

    fn raw(latitude: f64) -> u32 {
        // Nearest multiple of ten; the equator bucket also covers |lat| < 5.
        (((latitude.abs() + 5.0) / 10.0).floor() as u32).max(1)
    }

    /// Bucket for `latitude`, rejecting latitudes beyond the table.
    pub fn for_latitude(latitude: f64) -> Result<Self, LightTableError> {
        let raw = Self::raw(latitude);
        if !latitude.is_finite() || raw > u32::from(Self::COUNT) {
            return Err(LightTableError::LatitudeOutOfRange { latitude });
        }
        Ok(Self(raw as u8))
    }

    /// Bucket for `latitude`, clamping latitudes beyond the table to the
    /// last bucket.
    pub fn clamped(latitude: f64) -> Self {
        match Self::for_latitude(latitude) {
            Ok(bucket) => bucket,
            Err(err) => {
                log::warn!("{err}; using the 40° light row");
                Self(Self::COUNT)
            }
        }
    }

    /// One-based bucket number (1..=5).
    pub fn number(self) -> u8 {
        self.0
    }
}

/// Relative light intensity for `band` (0-based) in `season` and `bucket`.
pub fn light_intensity(band: usize, season: Season, bucket: LatitudeBucket) -> f64 {
    SOLAR_LIGHT[usize::from(bucket.0 - 1)][season.index()][band]
}

/// Constituent-specific extinction and cloud coefficients, one per band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightExtinction {
    /// Base extinction of clear water.
    pub alpha: [f64; LIGHT_BANDS],
    /// Extinction per unit sediment concentration.
    pub gamma: [f64; LIGHT_BANDS],
    /// Extinction per unit phytoplankton.
    pub delta: [f64; LIGHT_BANDS],
    /// Cloud-cover attenuation factor.
    pub cloud_factor: [f64; LIGHT_BANDS],
}

/// Water-column state that attenuates light during one interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightConditions {
    /// Average depth (ft).
    pub depth_ft: f64,
    /// Total suspended sediment concentration.
    pub sediment_concentration: f64,
    /// Phytoplankton concentration.
    pub phytoplankton: f64,
    /// Cloud cover, tenths (0-10).
    pub cloud_cover: f64,
    /// Season for the light table.
    pub season: Season,
    /// Latitude row for the light table.
    pub bucket: LatitudeBucket,
}

/// Depth-averaged light available in each band, after cloud and
/// water-column attenuation.
pub fn attenuation_factors(
    extinction: &LightExtinction,
    conditions: &LightConditions,
) -> [f64; LIGHT_BANDS] {
    let depth_m = conditions.depth_ft / FT_PER_M;
    std::array::from_fn(|band| {
        let kl = extinction.alpha[band]
            + extinction.gamma[band] * conditions.sediment_concentration
            + extinction.delta[band] * conditions.phytoplankton;
        let exponent = (2.76 * kl * depth_m * 100.0).clamp(-20.0, 20.0);
        let cloud = (10.0 - conditions.cloud_cover * extinction.cloud_factor[band]) / 10.0;
        let column = if exponent.abs() < 1.0e-12 {
            1.0
        } else {
            (1.0 - (-exponent).exp()) / exponent
        };
        cloud * light_intensity(band, conditions.season, conditions.bucket) * column
    })
}

#[rustfmt::skip]
static SOLAR_LIGHT: [[[f64; LIGHT_BANDS]; 4]; 5] = [
    // latitude bucket 1
    [
        [
            0.0102, 0.0178, 0.0285, 0.0327, 0.0418, 0.0370,
            0.339, 0.433, 0.840, 1.16, 1.47, 1.50,
            2.74, 2.90, 2.90, 2.80, 2.70, 3.00,
        ],
        [
            0.000466, 0.00316, 0.00937, 0.0190, 0.0291, 0.0265,
            0.329, 0.438, 0.837, 1.17, 1.47, 1.50,
            2.69, 2.79, 2.80, 2.80, 2.70, 2.50,
        ],
        [
            0.000419, 0.00287, 0.00851, 0.00173, 0.0266, 0.0291,
            0.299, 0.385, 0.764, 1.07, 1.36, 1.37,
            2.46, 2.52, 2.60, 2.60, 2.50, 2.30,
        ],
        [
            0.000320, 0.00239, 0.00726, 0.0151, 0.0238, 0.0236,
            0.0292, 0.344, 0.696, 0.980, 1.23, 1.27,
            2.26, 2.35, 2.43, 2.30, 2.40, 2.10,
        ],
    ],
    // latitude bucket 2
    [
        [
            0.000351, 0.00251, 0.00809, 0.0181, 0.0282, 0.0283,
            0.329, 0.424, 0.841, 1.17, 1.47, 1.50,
            2.68, 2.80, 2.80, 2.80, 2.76, 2.50,
        ],
        [
            0.000444, 0.00315, 0.00961, 0.0197, 0.0302, 0.0303,
            0.347, 0.447, 0.883, 1.23, 1.55, 1.58,
            2.81, 2.96, 2.90, 3.00, 2.80, 2.70,
        ],
        [
            0.000274, 0.00220, 0.00689, 0.0148, 0.0233, 0.0233,
            0.268, 0.345, 0.696, 0.980, 1.24, 1.26,
            2.30, 2.35, 2.42, 2.40, 2.20, 2.26,
        ],
        [
            0.000147, 0.00147, 0.00534, 0.0115, 0.0188, 0.0188,
            0.221, 0.286, 0.597, 0.840, 1.06, 1.09,
            1.95, 2.03, 2.07, 2.10, 2.36, 1.60,
        ],
    ],
    // latitude bucket 3
    [
        [
            0.000230, 0.00213, 0.00726, 0.0165, 0.0264, 0.0269,
            0.320, 0.414, 0.827, 1.15, 1.45, 1.48,
            2.64, 2.74, 2.76, 2.80, 2.70, 2.50,
        ],
        [
            0.000365, 0.00232, 0.00902, 0.0192, 0.0302, 0.0304,
            0.374, 0.437, 0.907, 1.34, 1.59, 1.62,
            2.89, 3.03, 3.00, 3.00, 2.90, 2.80,
        ],
        [
            0.000135, 0.00144, 0.00484, 0.0116, 0.0189, 0.0230,
            0.223, 0.284, 0.623, 0.850, 1.09, 1.11,
            2.00, 2.07, 2.09, 2.10, 2.10, 1.90,
        ],
        [
            0.0000410, 0.000650, 0.00276, 0.00755, 0.0131, 0.0134,
            0.170, 0.219, 0.475, 0.669, 0.850, 0.880,
            1.57, 1.63, 1.67, 1.73, 1.63, 1.60,
        ],
    ],
    // latitude bucket 4
    [
        [
            0.000109, 0.00137, 0.00296, 0.00799, 0.0138, 0.0142,
            0.178, 0.230, 0.526, 0.676, 0.890, 0.923,
            1.69, 1.73, 1.78, 1.50, 1.70, 1.60,
        ],
        [
            0.000249, 0.00232, 0.00793, 0.0181, 0.0291, 0.0297,
            0.354, 0.458, 0.971, 1.28, 1.43, 1.63,
            2.92, 3.05, 3.00, 3.10, 2.90, 2.90,
        ],
        [
            0.000109, 0.00137, 0.00535, 0.0138, 0.02319, 0.0239,
            0.108, 0.384, 0.791, 1.11, 1.39, 1.42,
            2.52, 2.62, 2.60, 4.70, 2.60, 2.50,
        ],
        [
            0.0000054, 0.000156, 0.00102, 0.00379, 0.00753, 0.00810,
            0.0752, 0.147, 0.338, 0.480, 0.610, 0.620,
            1.12, 1.16, 1.19, 1.39, 1.20, 1.16,
        ],
    ],
    // latitude bucket 5
    [
        [
            0.0000371, 0.000710, 0.00355, 0.00730, 0.00184, 0.0196,
            0.266, 0.348, 0.724, 1.02, 1.29, 1.32,
            2.34, 2.40, 2.44, 2.50, 2.50, 2.30,
        ],
        [
            0.0000079, 0.00175, 0.00653, 0.0163, 0.0267, 0.0277,
            0.343, 0.444, 0.904, 1.26, 1.60, 1.63,
            2.90, 3.04, 3.00, 3.10, 2.90, 2.90,
        ],
        [
            0.000152, 0.000225, 0.00129, 0.00439, 0.00864, 0.00920,
            0.124, 0.166, 0.365, 0.517, 0.660, 0.680,
            1.22, 1.25, 1.31, 1.34, 1.31, 1.24,
        ],
        [
            0.0000004, 0.0000157, 0.000178, 0.00120, 0.00293, 0.00368,
            0.0629, 0.0821, 0.196, 0.275, 0.351, 0.355,
            0.630, 0.640, 0.690, 0.710, 0.710, 0.690,
        ],
    ],
];
