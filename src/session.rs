//! Calculator session
//!
//! Owns the current input values. Every edit re-runs the estimator on the
//! full input record; nothing derived is cached between edits.

use serde::Serialize;

use crate::error::InputResult;
use crate::export::FileSaver;
use crate::extraction;
use crate::models::{CalculatorConstants, CalculatorInputs, CalculatorOutputs, InputField};

/// Result of handing a report to the file saver
///
/// Export failures are reported here instead of as errors; the session is
/// left untouched either way.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    pub success: bool,
    pub file_name: String,
    pub path: Option<String>,
    pub message: String,
}

/// Interaction state of one calculator
#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    inputs: CalculatorInputs,
    constants: CalculatorConstants,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(inputs: CalculatorInputs) -> Self {
        Self {
            inputs,
            constants: CalculatorConstants::STANDARD,
        }
    }

    pub fn inputs(&self) -> &CalculatorInputs {
        &self.inputs
    }

    pub fn constants(&self) -> &CalculatorConstants {
        &self.constants
    }

    /// Estimate for the current inputs
    pub fn outputs(&self) -> CalculatorOutputs {
        let outputs = extraction::estimate(&self.inputs, &self.constants);
        tracing::debug!(inputs = ?self.inputs, "recomputed estimate");
        outputs
    }

    /// Set one field and recompute
    ///
    /// Non-finite values, and values that make an estimate overflow, are
    /// rejected and the previous value is kept.
    pub fn update(&mut self, field: InputField, value: f64) -> InputResult<CalculatorOutputs> {
        let value = extraction::ensure_finite(field, value).inspect_err(|e| {
            tracing::warn!(field = %field, value, "rejected input: {}", e);
        })?;
        self.apply(&[(field, value)])
    }

    /// Set one field from form text such as "35" or "0,5"
    pub fn update_text(&mut self, field: InputField, raw: &str) -> InputResult<CalculatorOutputs> {
        let value = extraction::parse_number(field, raw).inspect_err(|e| {
            tracing::warn!(field = %field, raw, "rejected input: {}", e);
        })?;
        self.apply(&[(field, value)])
    }

    /// Apply several edits at once; if any is invalid none are applied
    pub fn update_many(&mut self, edits: &[(InputField, f64)]) -> InputResult<CalculatorOutputs> {
        for &(field, value) in edits {
            extraction::ensure_finite(field, value).inspect_err(|e| {
                tracing::warn!(field = %field, value, "rejected input: {}", e);
            })?;
        }
        self.apply(edits)
    }

    fn apply(&mut self, edits: &[(InputField, f64)]) -> InputResult<CalculatorOutputs> {
        let mut staged = self.inputs;
        for &(field, value) in edits {
            staged.set(field, value);
        }
        let outputs = extraction::estimate_finite(&staged, &self.constants).inspect_err(|e| {
            tracing::warn!(inputs = ?staged, "rejected input: {}", e);
        })?;
        self.inputs = staged;
        tracing::debug!(inputs = ?self.inputs, "recomputed estimate");
        Ok(outputs)
    }

    /// Restore the default inputs
    pub fn reset(&mut self) -> CalculatorOutputs {
        self.inputs = CalculatorInputs::default();
        self.outputs()
    }

    pub fn report(&self) -> String {
        extraction::format_report(&self.inputs, &self.outputs(), &self.constants)
    }

    pub fn results(&self) -> Vec<String> {
        extraction::format_results(&self.outputs(), &self.constants)
    }

    pub fn disclaimer(&self) -> String {
        extraction::assumptions_disclaimer(&self.constants)
    }

    /// Format the report and pass it to `saver`
    pub fn export(&self, saver: &dyn FileSaver, file_name: &str) -> ExportOutcome {
        let content = self.report();

        match saver.save_text_file(file_name, &content) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "exported report");
                ExportOutcome {
                    success: true,
                    file_name: file_name.to_string(),
                    path: Some(path.display().to_string()),
                    message: format!("Report saved to {}", path.display()),
                }
            }
            Err(e) => {
                tracing::warn!(file_name, "report export failed: {}", e);
                ExportOutcome {
                    success: false,
                    file_name: file_name.to_string(),
                    path: None,
                    message: format!("Report could not be saved: {}", e),
                }
            }
        }
    }
}
