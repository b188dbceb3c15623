//! Derived quantities produced by the estimator
//!
//! Quantities that depend on a division are `None` when the divisor is zero
//! (no BHO mass, no oil), and serialize as `null`.

use serde::Serialize;

/// A low/high pair derived from the THC variance heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Full result of one estimation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorOutputs {
    pub total_thc_g: f64,
    pub bho_mass_g: f64,
    pub thc_in_bho_g: f64,
    /// THC share of the extract in percent. Can exceed 100 for unrealistic yields.
    pub estimated_bho_purity_percent: Option<f64>,
    pub thc_concentration_mg_per_ml: Option<f64>,
    pub dose_mg_per_drop: Option<f64>,
    pub dose_mg_per_reference_volume: Option<f64>,
    /// `thc_percent * (1 ± variance)` as entered on the certificate
    pub thc_percent_band: Band,
    /// Concentration band propagated from `thc_percent_band`
    pub thc_concentration_band: Option<Band>,
}

impl CalculatorOutputs {
    /// Whether every defined quantity is a finite number
    ///
    /// False when finite inputs overflowed somewhere in the chain.
    pub fn is_finite(&self) -> bool {
        let band_finite = |b: &Band| b.min.is_finite() && b.max.is_finite();

        [self.total_thc_g, self.bho_mass_g, self.thc_in_bho_g]
            .iter()
            .chain(self.estimated_bho_purity_percent.iter())
            .chain(self.thc_concentration_mg_per_ml.iter())
            .chain(self.dose_mg_per_drop.iter())
            .chain(self.dose_mg_per_reference_volume.iter())
            .all(|v| v.is_finite())
            && band_finite(&self.thc_percent_band)
            && self.thc_concentration_band.as_ref().map_or(true, band_finite)
    }
}
