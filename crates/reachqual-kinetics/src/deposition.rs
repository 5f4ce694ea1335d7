//! Atmospheric deposition onto the reach surface.

/// Mass deposited during one interval (qty · conv units).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Deposition {
    /// Dry deposition.
    pub dry: f64,
    /// Wet deposition carried by precipitation.
    pub wet: f64,
}

impl Deposition {
    /// Dry plus wet.
    pub fn total(&self) -> f64 {
        self.dry + self.wet
    }
}

/// Deposition over a surface of `area_ft2` during one interval.
///
/// `dry_flux` is qty per ft² per interval and is converted to mass with
/// `conv`; `wet_concentration` is already a concentration, so the rain
/// volume `precipitation_ft · area_ft2` carries mass directly.
pub fn atmospheric_deposition(
    area_ft2: f64,
    precipitation_ft: f64,
    conv: f64,
    dry_flux: f64,
    wet_concentration: f64,
) -> Deposition {
    Deposition {
        dry: area_ft2 * conv * dry_flux,
        wet: precipitation_ft * area_ft2 * wet_concentration,
    }
}
