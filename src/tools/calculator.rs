//! Calculator tools
//!
//! Tool functions behind the MCP server. Each works on the shared session
//! and returns a serializable response.

use serde::Serialize;

use crate::export::FileSaver;
use crate::extraction;
use crate::models::{CalculatorConstants, CalculatorInputs, CalculatorOutputs, InputField};
use crate::session::{CalculatorSession, ExportOutcome};

// ============================================================================
// Response Types
// ============================================================================

/// Inputs, derived values and the display lines for one recompute
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub inputs: CalculatorInputs,
    pub outputs: CalculatorOutputs,
    pub results: Vec<String>,
}

impl EstimateResponse {
    fn new(inputs: CalculatorInputs, outputs: CalculatorOutputs, constants: &CalculatorConstants) -> Self {
        let results = extraction::format_results(&outputs, constants);
        Self {
            inputs,
            outputs,
            results,
        }
    }

    fn from_session(session: &CalculatorSession, outputs: CalculatorOutputs) -> Self {
        Self::new(*session.inputs(), outputs, session.constants())
    }
}

#[derive(Debug, Serialize)]
pub struct FieldValue {
    pub field: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct InputsResponse {
    pub fields: Vec<FieldValue>,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<String>,
    pub disclaimer: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: String,
    pub suggested_file_name: String,
}

/// Optional values for a batch edit, in form order
#[derive(Debug, Default, Clone, Copy)]
pub struct InputEdits {
    pub flower_weight_g: Option<f64>,
    pub thc_percent: Option<f64>,
    pub bho_yield_percent: Option<f64>,
    pub oil_volume_ml: Option<f64>,
}

impl InputEdits {
    fn into_pairs(self) -> Vec<(InputField, f64)> {
        [
            (InputField::FlowerWeight, self.flower_weight_g),
            (InputField::ThcPercent, self.thc_percent),
            (InputField::BhoYieldPercent, self.bho_yield_percent),
            (InputField::OilVolume, self.oil_volume_ml),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

// ============================================================================
// Tool Functions
// ============================================================================

/// Current values of all four fields
pub fn get_inputs(session: &CalculatorSession) -> InputsResponse {
    let inputs = session.inputs();
    let fields = InputField::ALL
        .into_iter()
        .map(|field| FieldValue {
            field: field.as_str(),
            label: field.label(),
            unit: field.unit(),
            value: inputs.get(field),
        })
        .collect();

    InputsResponse { fields }
}

/// Set one field from a number in g / % / ml
pub fn set_input_number(session: &mut CalculatorSession, field: &str, value: f64) -> Result<EstimateResponse, String> {
    let field = field.parse::<InputField>().map_err(|e| e.to_string())?;
    let outputs = session.update(field, value).map_err(|e| e.to_string())?;
    Ok(EstimateResponse::from_session(session, outputs))
}

/// Set one field from text as typed into the form
pub fn set_input_text(session: &mut CalculatorSession, field: &str, raw: &str) -> Result<EstimateResponse, String> {
    let field = field.parse::<InputField>().map_err(|e| e.to_string())?;
    let outputs = session.update_text(field, raw).map_err(|e| e.to_string())?;
    Ok(EstimateResponse::from_session(session, outputs))
}

/// Set several fields at once; nothing changes if any value is invalid
pub fn set_inputs(session: &mut CalculatorSession, edits: InputEdits) -> Result<EstimateResponse, String> {
    let pairs = edits.into_pairs();
    if pairs.is_empty() {
        return Err("No input values provided".to_string());
    }
    let outputs = session.update_many(&pairs).map_err(|e| e.to_string())?;
    Ok(EstimateResponse::from_session(session, outputs))
}

pub fn reset_inputs(session: &mut CalculatorSession) -> EstimateResponse {
    let outputs = session.reset();
    EstimateResponse::from_session(session, outputs)
}

/// Re-run the estimator on the current inputs
pub fn calculate(session: &CalculatorSession) -> EstimateResponse {
    EstimateResponse::from_session(session, session.outputs())
}

/// Estimate arbitrary inputs without touching the session
pub fn calculate_for(inputs: CalculatorInputs) -> Result<EstimateResponse, String> {
    for field in InputField::ALL {
        extraction::ensure_finite(field, inputs.get(field)).map_err(|e| e.to_string())?;
    }
    let constants = CalculatorConstants::STANDARD;
    let outputs = extraction::estimate_finite(&inputs, &constants).map_err(|e| e.to_string())?;
    Ok(EstimateResponse::new(inputs, outputs, &constants))
}

pub fn get_results(session: &CalculatorSession) -> ResultsResponse {
    ResultsResponse {
        results: session.results(),
        disclaimer: session.disclaimer(),
    }
}

pub fn get_report(session: &CalculatorSession, suggested_file_name: &str) -> ReportResponse {
    ReportResponse {
        report: session.report(),
        suggested_file_name: suggested_file_name.to_string(),
    }
}

pub fn export_report(session: &CalculatorSession, saver: &dyn FileSaver, file_name: &str) -> ExportOutcome {
    session.export(saver, file_name)
}

pub fn get_constants(session: &CalculatorSession) -> CalculatorConstants {
    *session.constants()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::DirectorySaver;

    #[test]
    fn test_get_inputs_lists_fields_in_form_order() {
        let session = CalculatorSession::new();
        let response = get_inputs(&session);
        let names: Vec<_> = response.fields.iter().map(|f| f.field).collect();
        assert_eq!(names, vec!["flower_weight", "thc_percent", "bho_yield_percent", "oil_volume"]);
        assert_eq!(response.fields[3].unit, "ml");
        assert_eq!(response.fields[3].value, 500.0);
    }

    #[test]
    fn test_set_input_number_by_alias() {
        let mut session = CalculatorSession::new();
        let response = set_input_number(&mut session, "oil", 1000.0).unwrap();
        assert_eq!(response.inputs.oil_volume_ml, 1000.0);
        assert!((response.outputs.thc_concentration_mg_per_ml.unwrap() - 8.4).abs() < 1e-9);
    }

    #[test]
    fn test_set_input_unknown_field() {
        let mut session = CalculatorSession::new();
        let err = set_input_number(&mut session, "density", 1.0).unwrap_err();
        assert_eq!(err, "Unknown input field: density");
    }

    #[test]
    fn test_set_input_text_rejects_and_keeps_state() {
        let mut session = CalculatorSession::new();
        let err = set_input_text(&mut session, "thc", "zweiunddreißig").unwrap_err();
        assert!(err.contains("thc_percent"));
        assert_eq!(session.inputs().thc_percent, 32.0);
    }

    #[test]
    fn test_set_input_text_decimal_comma() {
        let mut session = CalculatorSession::new();
        set_input_text(&mut session, "weight", "3,5").unwrap();
        assert!((session.inputs().flower_weight_g - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_set_input_overflow_rejected() {
        let mut session = CalculatorSession::new();
        let err = set_input_number(&mut session, "weight", 1e308).unwrap_err();
        assert_eq!(err, "Input values are too large to estimate");
        assert_eq!(session.inputs().flower_weight_g, 35.0);
    }

    #[test]
    fn test_set_inputs_requires_a_value() {
        let mut session = CalculatorSession::new();
        assert!(set_inputs(&mut session, InputEdits::default()).is_err());

        let response = set_inputs(
            &mut session,
            InputEdits {
                bho_yield_percent: Some(0.0),
                ..InputEdits::default()
            },
        )
        .unwrap();
        assert_eq!(response.outputs.estimated_bho_purity_percent, None);
        assert!(response.results[3].ends_with("nicht definiert"));
    }

    #[test]
    fn test_calculate_for_leaves_session_alone() {
        let session = CalculatorSession::new();
        let response = calculate_for(CalculatorInputs::new(10.0, 20.0, 15.0, 100.0)).unwrap();
        assert!((response.outputs.total_thc_g - 2.0).abs() < 1e-9);
        assert_eq!(session.inputs(), &CalculatorInputs::default());
    }

    #[test]
    fn test_calculate_for_rejects_nan() {
        assert!(calculate_for(CalculatorInputs::new(f64::NAN, 20.0, 15.0, 100.0)).is_err());
    }

    #[test]
    fn test_calculate_for_rejects_overflow() {
        let err = calculate_for(CalculatorInputs::new(1e308, 32.0, 20.0, 500.0)).unwrap_err();
        assert_eq!(err, "Input values are too large to estimate");
    }

    #[test]
    fn test_outputs_serialize_undefined_as_null() {
        let response = calculate_for(CalculatorInputs::new(35.0, 32.0, 20.0, 0.0)).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["outputs"]["thc_concentration_mg_per_ml"].is_null());
        assert!(json["outputs"]["thc_concentration_band"].is_null());
        assert_eq!(json["outputs"]["bho_mass_g"], 7.0);
    }

    #[test]
    fn test_export_report_to_directory() {
        let dir = std::env::temp_dir().join(format!("bhocalc-tools-{}", std::process::id()));
        let session = CalculatorSession::new();
        let saver = DirectorySaver::new(&dir);

        let outcome = export_report(&session, &saver, "BHO-THC-Rechner.txt");
        assert!(outcome.success);

        let written = std::fs::read_to_string(dir.join("BHO-THC-Rechner.txt")).unwrap();
        assert_eq!(written, get_report(&session, "BHO-THC-Rechner.txt").report);

        std::fs::remove_dir_all(&dir).ok();
    }
}
