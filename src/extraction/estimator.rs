//! THC estimation
//!
//! Closed-form chain from flower weight and THC content to the concentration
//! of the infused oil. Recomputed in full on every call.

use crate::error::{InputError, InputResult};
use crate::models::{Band, CalculatorConstants, CalculatorInputs, CalculatorOutputs};

/// Milligrams per gram
const MG_PER_G: f64 = 1000.0;

/// Divide, returning `None` when the divisor is zero or the result is not finite
fn checked_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Grams of THC that end up in the extract for a given THC percentage
fn thc_in_extract_g(flower_weight_g: f64, thc_percent: f64, efficiency: f64) -> f64 {
    let total_thc_g = flower_weight_g * thc_percent / 100.0;
    total_thc_g * efficiency
}

/// THC concentration of the oil in mg/ml for a given THC percentage
fn concentration_mg_per_ml(inputs: &CalculatorInputs, thc_percent: f64, efficiency: f64) -> Option<f64> {
    let thc_mg = thc_in_extract_g(inputs.flower_weight_g, thc_percent, efficiency) * MG_PER_G;
    checked_div(thc_mg, inputs.oil_volume_ml)
}

/// Estimate every derived quantity for `inputs`
///
/// The concentration band is propagated from the THC percentage band through
/// the same chain rather than applied to the final concentration. Negative
/// inputs are not rejected and produce negative quantities.
pub fn estimate(inputs: &CalculatorInputs, constants: &CalculatorConstants) -> CalculatorOutputs {
    let efficiency = constants.extraction_efficiency;

    let total_thc_g = inputs.flower_weight_g * inputs.thc_percent / 100.0;
    let bho_mass_g = inputs.flower_weight_g * inputs.bho_yield_percent / 100.0;
    let thc_in_bho_g = total_thc_g * efficiency;
    let estimated_bho_purity_percent = checked_div(thc_in_bho_g, bho_mass_g).map(|ratio| ratio * 100.0);

    let thc_concentration_mg_per_ml = checked_div(thc_in_bho_g * MG_PER_G, inputs.oil_volume_ml);
    let dose_mg_per_drop = thc_concentration_mg_per_ml.and_then(|c| checked_div(c, constants.drops_per_ml));
    let dose_mg_per_reference_volume =
        thc_concentration_mg_per_ml.map(|c| c * constants.reference_dose_volume_ml);

    let thc_percent_band = Band {
        min: inputs.thc_percent * (1.0 - constants.thc_variance_fraction),
        max: inputs.thc_percent * (1.0 + constants.thc_variance_fraction),
    };
    let thc_concentration_band = match (
        concentration_mg_per_ml(inputs, thc_percent_band.min, efficiency),
        concentration_mg_per_ml(inputs, thc_percent_band.max, efficiency),
    ) {
        (Some(min), Some(max)) => Some(Band { min, max }),
        _ => None,
    };

    CalculatorOutputs {
        total_thc_g,
        bho_mass_g,
        thc_in_bho_g,
        estimated_bho_purity_percent,
        thc_concentration_mg_per_ml,
        dose_mg_per_drop,
        dose_mg_per_reference_volume,
        thc_percent_band,
        thc_concentration_band,
    }
}

/// Estimate, rejecting inputs so large that a derived value overflows
pub fn estimate_finite(inputs: &CalculatorInputs, constants: &CalculatorConstants) -> InputResult<CalculatorOutputs> {
    let outputs = estimate(inputs, constants);
    if outputs.is_finite() {
        Ok(outputs)
    } else {
        Err(InputError::OutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn defaults() -> CalculatorOutputs {
        estimate(&CalculatorInputs::default(), &CalculatorConstants::STANDARD)
    }

    #[test]
    fn test_default_scenario() {
        let out = defaults();
        assert!((out.total_thc_g - 11.2).abs() < TOL);
        assert!((out.bho_mass_g - 7.0).abs() < TOL);
        assert!((out.thc_in_bho_g - 8.4).abs() < TOL);
        assert!((out.estimated_bho_purity_percent.unwrap() - 120.0).abs() < TOL);
        assert!((out.thc_concentration_mg_per_ml.unwrap() - 16.8).abs() < TOL);
        assert!((out.dose_mg_per_drop.unwrap() - 0.84).abs() < TOL);
        assert!((out.dose_mg_per_reference_volume.unwrap() - 84.0).abs() < TOL);
    }

    #[test]
    fn test_default_variance_band() {
        let out = defaults();
        assert!((out.thc_percent_band.min - 28.8).abs() < TOL);
        assert!((out.thc_percent_band.max - 35.2).abs() < TOL);

        let band = out.thc_concentration_band.unwrap();
        assert!((band.min - 15.12).abs() < TOL);
        assert!((band.max - 18.48).abs() < TOL);
    }

    #[test]
    fn test_total_thc_formula() {
        let inputs = CalculatorInputs::new(12.5, 18.3, 15.0, 100.0);
        let out = estimate(&inputs, &CalculatorConstants::STANDARD);
        assert!((out.total_thc_g - 12.5 * 18.3 / 100.0).abs() < TOL);
    }

    #[test]
    fn test_purity_formula() {
        let inputs = CalculatorInputs::new(10.0, 25.0, 18.0, 50.0);
        let out = estimate(&inputs, &CalculatorConstants::STANDARD);
        let expected = out.thc_in_bho_g / out.bho_mass_g * 100.0;
        assert!((out.estimated_bho_purity_percent.unwrap() - expected).abs() < TOL);
    }

    #[test]
    fn test_deterministic() {
        let inputs = CalculatorInputs::new(7.3, 21.9, 12.4, 33.0);
        let a = estimate(&inputs, &CalculatorConstants::STANDARD);
        let b = estimate(&inputs, &CalculatorConstants::STANDARD);
        assert_eq!(a, b);
    }

    #[test]
    fn test_band_contains_concentration() {
        for thc in [0.5, 5.0, 18.0, 32.0, 99.0] {
            let inputs = CalculatorInputs::new(35.0, thc, 20.0, 500.0);
            let out = estimate(&inputs, &CalculatorConstants::STANDARD);
            let band = out.thc_concentration_band.unwrap();
            assert!(band.contains(out.thc_concentration_mg_per_ml.unwrap()));
            assert!(band.min < band.max);
        }
    }

    #[test]
    fn test_band_matches_scaled_concentration_for_linear_chain() {
        // Propagated from THC%, equal to thc_per_ml * (1 ± 0.1) because the chain is linear
        let out = defaults();
        let band = out.thc_concentration_band.unwrap();
        let thc_per_ml = out.thc_concentration_mg_per_ml.unwrap();
        assert!((band.min - thc_per_ml * 0.9).abs() < 1e-6);
        assert!((band.max - thc_per_ml * 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_zero_oil_volume_is_undefined() {
        let inputs = CalculatorInputs::new(35.0, 32.0, 20.0, 0.0);
        let out = estimate(&inputs, &CalculatorConstants::STANDARD);
        assert_eq!(out.thc_concentration_mg_per_ml, None);
        assert_eq!(out.dose_mg_per_drop, None);
        assert_eq!(out.dose_mg_per_reference_volume, None);
        assert_eq!(out.thc_concentration_band, None);
        // unaffected by the oil volume
        assert!((out.estimated_bho_purity_percent.unwrap() - 120.0).abs() < TOL);
    }

    #[test]
    fn test_zero_yield_purity_is_undefined() {
        let inputs = CalculatorInputs::new(35.0, 32.0, 0.0, 500.0);
        let out = estimate(&inputs, &CalculatorConstants::STANDARD);
        assert_eq!(out.bho_mass_g, 0.0);
        assert_eq!(out.estimated_bho_purity_percent, None);
        assert!((out.thc_concentration_mg_per_ml.unwrap() - 16.8).abs() < TOL);
    }

    #[test]
    fn test_zero_weight_purity_is_undefined() {
        let inputs = CalculatorInputs::new(0.0, 32.0, 20.0, 500.0);
        let out = estimate(&inputs, &CalculatorConstants::STANDARD);
        assert_eq!(out.estimated_bho_purity_percent, None);
        assert_eq!(out.thc_concentration_mg_per_ml, Some(0.0));
    }

    #[test]
    fn test_negative_inputs_propagate() {
        let inputs = CalculatorInputs::new(35.0, 32.0, 20.0, -500.0);
        let out = estimate(&inputs, &CalculatorConstants::STANDARD);
        assert!((out.thc_concentration_mg_per_ml.unwrap() + 16.8).abs() < TOL);
    }

    #[test]
    fn test_overflow_is_not_finite() {
        let inputs = CalculatorInputs::new(1e308, 32.0, 20.0, 500.0);
        let out = estimate(&inputs, &CalculatorConstants::STANDARD);
        assert!(out.total_thc_g.is_infinite());
        assert_eq!(out.thc_concentration_mg_per_ml, None);
        assert!(!out.is_finite());
        assert!(defaults().is_finite());

        assert_eq!(estimate_finite(&inputs, &CalculatorConstants::STANDARD), Err(InputError::OutOfRange));
        assert!(estimate_finite(&CalculatorInputs::default(), &CalculatorConstants::STANDARD).is_ok());
    }
}
