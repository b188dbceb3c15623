//! bhocalc MCP Server Implementation
//!
//! Exposes the calculator session as MCP tools.

use std::sync::{Arc, MutexGuard};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::export::{DirectorySaver, FileSaver};
use crate::models::CalculatorInputs;
use crate::session::CalculatorSession;
use crate::tools::calculator::{self, InputEdits};
use crate::tools::status::StatusTracker;

/// bhocalc MCP Service
#[derive(Clone)]
pub struct BhoCalcService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    session: Arc<std::sync::Mutex<CalculatorSession>>,
    saver: Arc<dyn FileSaver>,
    report_file_name: String,
    tool_router: ToolRouter<BhoCalcService>,
}

impl BhoCalcService {
    pub fn new(config: Config) -> Self {
        let saver = Arc::new(DirectorySaver::new(&config.export_dir));
        Self::with_saver(config, saver)
    }

    /// Build the service around a custom file saver
    pub fn with_saver(config: Config, saver: Arc<dyn FileSaver>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config.export_dir))),
            session: Arc::new(std::sync::Mutex::new(CalculatorSession::new())),
            saver,
            report_file_name: config.report_file_name,
            tool_router: Self::tool_router(),
        }
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, CalculatorSession>, McpError> {
        self.session
            .lock()
            .map_err(|_| McpError::internal_error("Calculator session lock poisoned", None))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// A number, or text as typed into the form ("0,5")
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetInputParams {
    /// Field: flower_weight, thc_percent, bho_yield_percent or oil_volume
    pub field: String,
    /// New value in g / % / ml (number or text)
    pub value: InputValue,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetInputsParams {
    /// Flower weight in grams
    pub flower_weight_g: Option<f64>,
    /// THC content of the flower in percent
    pub thc_percent: Option<f64>,
    /// BHO yield in percent of flower weight
    pub bho_yield_percent: Option<f64>,
    /// Oil volume in ml
    pub oil_volume_ml: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateForParams {
    /// Flower weight in grams
    pub flower_weight_g: f64,
    /// THC content of the flower in percent
    pub thc_percent: f64,
    /// BHO yield in percent of flower weight
    pub bho_yield_percent: f64,
    /// Oil volume in ml
    pub oil_volume_ml: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportReportParams {
    /// File name inside the export directory (default BHO-THC-Rechner.txt)
    pub file_name: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl BhoCalcService {
    // --- Status ---

    #[tool(description = "Get the current status of the bhocalc service including build info, export directory, and process information")]
    async fn bhocalc_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for using the BHO THC calculator. Call this when starting a session or when unsure how to use the calculator tools.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Inputs ---

    #[tool(description = "Get the current calculator inputs (flower weight, THC %, BHO yield %, oil volume)")]
    fn get_inputs(&self) -> Result<CallToolResult, McpError> {
        let session = self.lock_session()?;
        json_result(&calculator::get_inputs(&session))
    }

    #[tool(description = "Set one calculator input and return the recomputed estimate. Invalid values are rejected and the previous value is kept.")]
    fn set_input(&self, Parameters(p): Parameters<SetInputParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_session()?;
        let result = match &p.value {
            InputValue::Number(value) => calculator::set_input_number(&mut session, &p.field, *value),
            InputValue::Text(raw) => calculator::set_input_text(&mut session, &p.field, raw),
        }
        .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Set several calculator inputs at once (values in g / % / ml). Nothing changes if any value is invalid.")]
    fn set_inputs(&self, Parameters(p): Parameters<SetInputsParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_session()?;
        let edits = InputEdits {
            flower_weight_g: p.flower_weight_g,
            thc_percent: p.thc_percent,
            bho_yield_percent: p.bho_yield_percent,
            oil_volume_ml: p.oil_volume_ml,
        };
        let result = calculator::set_inputs(&mut session, edits)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Reset all inputs to the defaults (35 g, 32 %, 20 %, 500 ml)")]
    fn reset_inputs(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_session()?;
        json_result(&calculator::reset_inputs(&mut session))
    }

    // --- Results ---

    #[tool(description = "Recalculate the estimate for the current inputs")]
    fn calculate(&self) -> Result<CallToolResult, McpError> {
        let session = self.lock_session()?;
        json_result(&calculator::calculate(&session))
    }

    #[tool(description = "Calculate an estimate for the given inputs without changing the current session")]
    fn calculate_for(&self, Parameters(p): Parameters<CalculateForParams>) -> Result<CallToolResult, McpError> {
        let inputs = CalculatorInputs::new(p.flower_weight_g, p.thc_percent, p.bho_yield_percent, p.oil_volume_ml);
        let result = calculator::calculate_for(inputs).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the result lines for the current inputs together with the assumptions disclaimer")]
    fn get_results(&self) -> Result<CallToolResult, McpError> {
        let session = self.lock_session()?;
        json_result(&calculator::get_results(&session))
    }

    #[tool(description = "Get the fixed calculation constants (extraction efficiency, THC variance, drops per ml, reference dose volume)")]
    fn get_constants(&self) -> Result<CallToolResult, McpError> {
        let session = self.lock_session()?;
        json_result(&calculator::get_constants(&session))
    }

    // --- Report ---

    #[tool(description = "Get the plain-text report for the current inputs without saving it")]
    fn get_report(&self) -> Result<CallToolResult, McpError> {
        let session = self.lock_session()?;
        json_result(&calculator::get_report(&session, &self.report_file_name))
    }

    #[tool(description = "Save the plain-text report into the export directory. A failed save is reported but leaves the inputs unchanged.")]
    fn export_report(&self, Parameters(p): Parameters<ExportReportParams>) -> Result<CallToolResult, McpError> {
        let session = self.lock_session()?;
        let file_name = p.file_name.as_deref().unwrap_or(&self.report_file_name);
        let outcome = calculator::export_report(&session, self.saver.as_ref(), file_name);

        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        if outcome.success {
            Ok(CallToolResult::success(vec![Content::text(json)]))
        } else {
            Ok(CallToolResult::error(vec![Content::text(json)]))
        }
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for BhoCalcService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bhocalc".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("BHO THC Rechner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "BHO THC Rechner - estimates THC in BHO extracts and infused oils. \
                 Call calculator_instructions first. \
                 Inputs: get_inputs, set_input, set_inputs, reset_inputs. \
                 Results: calculate, calculate_for, get_results, get_constants. \
                 Report: get_report, export_report."
                    .into(),
            ),
        }
    }
}
