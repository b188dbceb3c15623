//! Text rendering of estimates
//!
//! The downloadable report, the result lines shown after each recompute and
//! the assumptions disclaimer. Output carries no timestamp, so identical
//! inputs always render byte-identical text.

use crate::models::{Band, CalculatorConstants, CalculatorInputs, CalculatorOutputs};

/// Default file name for exported reports
pub const REPORT_FILE_NAME: &str = "BHO-THC-Rechner.txt";

pub const REPORT_TITLE: &str = "BHO THC Rechner";

/// Shown in place of a value whose divisor was zero or that overflowed
pub const UNDEFINED_TEXT: &str = "nicht definiert";

/// Two decimals, never "-0.00"
fn fixed(value: f64) -> String {
    let scaled = (value * 100.0).round();
    let rounded = if scaled.is_finite() { scaled / 100.0 } else { value };
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.2}", rounded)
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{} {}", fixed(v), unit),
        None => UNDEFINED_TEXT.to_string(),
    }
}

fn band_text(band: Option<Band>, unit_each: &str, unit_after: &str) -> String {
    match band.filter(|b| b.min.is_finite() && b.max.is_finite()) {
        Some(b) => format!("{}{} - {}{}", fixed(b.min), unit_each, fixed(b.max), unit_after),
        None => UNDEFINED_TEXT.to_string(),
    }
}

fn efficiency_percent(constants: &CalculatorConstants) -> String {
    format!("{:.0}", constants.extraction_efficiency * 100.0)
}

/// Multi-line plain-text report for export
pub fn format_report(
    inputs: &CalculatorInputs,
    outputs: &CalculatorOutputs,
    constants: &CalculatorConstants,
) -> String {
    let lines = [
        REPORT_TITLE.to_string(),
        String::new(),
        format!("Blütenmenge: {}", with_unit(Some(inputs.flower_weight_g), "g")),
        format!(
            "THC-Gehalt der Blüten: {} (Varianz: {})",
            with_unit(Some(inputs.thc_percent), "%"),
            band_text(Some(outputs.thc_percent_band), " %", " %")
        ),
        format!("BHO-Ausbeute: {}", with_unit(Some(inputs.bho_yield_percent), "%")),
        format!(
            "Geschätzter THC-Gehalt im BHO: {}",
            with_unit(outputs.estimated_bho_purity_percent, "%")
        ),
        format!("Ölmenge: {}", with_unit(Some(inputs.oil_volume_ml), "ml")),
        String::new(),
        format!(
            "Verfügbares THC für Ölansatz (geschätzt): {} (bei {}% Effizienz)",
            with_unit(Some(outputs.thc_in_bho_g), "g"),
            efficiency_percent(constants)
        ),
        format!("BHO-Menge: {}", with_unit(Some(outputs.bho_mass_g), "g")),
        format!(
            "THC pro ml Öl: {} (Varianz: {})",
            with_unit(outputs.thc_concentration_mg_per_ml, "mg"),
            band_text(outputs.thc_concentration_band, "", " mg/ml")
        ),
        format!("THC pro Tropfen: {}", with_unit(outputs.dose_mg_per_drop, "mg")),
        format!(
            "THC pro {} ml Dosis: {}",
            constants.reference_dose_volume_ml,
            with_unit(outputs.dose_mg_per_reference_volume, "mg")
        ),
    ];

    lines.join("\n")
}

/// Result lines displayed after every recompute
pub fn format_results(outputs: &CalculatorOutputs, constants: &CalculatorConstants) -> Vec<String> {
    vec![
        format!(
            "Gesamtes THC in Blüten: {} (vor Extraktion)",
            with_unit(Some(outputs.total_thc_g), "g")
        ),
        format!("BHO-Menge: {}", with_unit(Some(outputs.bho_mass_g), "g")),
        format!(
            "Verfügbares THC für Ölansatz (geschätzt): {} (bei {}% Effizienz)",
            with_unit(Some(outputs.thc_in_bho_g), "g"),
            efficiency_percent(constants)
        ),
        format!(
            "Geschätzter THC-Gehalt im BHO: {}",
            with_unit(outputs.estimated_bho_purity_percent, "%")
        ),
        format!(
            "THC-Gehalt pro ml Öl: {} (Varianz: {})",
            with_unit(outputs.thc_concentration_mg_per_ml, "mg"),
            band_text(outputs.thc_concentration_band, "", " mg/ml")
        ),
        format!(
            "THC-Gehalt pro Tropfen (ca. {} ml): {}",
            fixed(constants.drop_volume_ml()),
            with_unit(outputs.dose_mg_per_drop, "mg")
        ),
        format!(
            "THC in {} ml (z. B. Teelöffel): {}",
            constants.reference_dose_volume_ml,
            with_unit(outputs.dose_mg_per_reference_volume, "mg")
        ),
    ]
}

/// Fixed sentence listing the assumptions behind every estimate
pub fn assumptions_disclaimer(constants: &CalculatorConstants) -> String {
    format!(
        "Die Berechnung basiert auf folgenden Annahmen: {} % Extraktionseffizienz, \
         ±{:.0} % Schwankung des THC-Gehalts laut Analysezertifikaten und Standardwerten \
         für Tropfenmenge ({} Tropfen ≈ 1 ml). Alle Angaben sind Schätzungen.",
        efficiency_percent(constants),
        constants.thc_variance_fraction * 100.0,
        constants.drops_per_ml
    )
}
