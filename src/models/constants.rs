//! Fixed calculation constants
//!
//! The assumptions every estimate is made under. Not user-editable.

use serde::Serialize;

/// Assumptions applied to every estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculatorConstants {
    /// Fraction of the flower's THC that ends up in the extract
    pub extraction_efficiency: f64,
    /// Symmetric uncertainty of lab-certified THC percentages
    pub thc_variance_fraction: f64,
    pub drops_per_ml: f64,
    /// Volume of one reference dose (a teaspoon)
    pub reference_dose_volume_ml: f64,
}

impl CalculatorConstants {
    pub const STANDARD: CalculatorConstants = CalculatorConstants {
        extraction_efficiency: 0.75,
        thc_variance_fraction: 0.10,
        drops_per_ml: 20.0,
        reference_dose_volume_ml: 5.0,
    };

    /// Volume of a single drop in ml
    pub fn drop_volume_ml(&self) -> f64 {
        1.0 / self.drops_per_ml
    }
}

impl Default for CalculatorConstants {
    fn default() -> Self {
        Self::STANDARD
    }
}
