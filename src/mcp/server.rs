//! Glycemic MCP Server Implementation
//!
//! Exposes the glycemic calculator, chart and report tools over MCP.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::glycemic::{GlError, DEFAULT_SERVING_SIZE_G};
use crate::models::GlycemicMeasure;
use crate::tools::glycemic;
use crate::tools::reports::ReportError;
use crate::tools::status::StatusTracker;

/// Glycemic MCP Service
#[derive(Clone)]
pub struct GlycemicService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    /// Where charts and reports go when no explicit path is given
    output_dir: PathBuf,
    tool_router: ToolRouter<GlycemicService>,
}

impl GlycemicService {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(output_dir.clone()))),
            output_dir,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

fn default_serving_size() -> f64 { DEFAULT_SERVING_SIZE_G }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFoodsParams {
    /// Only list foods of this category (case-insensitive)
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetFoodParams {
    /// Food name as listed by list_foods
    pub name: String,
    /// Serving size in grams (default 100)
    #[serde(default = "default_serving_size")]
    pub serving_size_g: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateGlycemicLoadParams {
    /// Serving size in grams (default 100, typical range 50-500)
    #[serde(default = "default_serving_size")]
    pub serving_size_g: f64,
    /// Categories to include. Omit for all categories; an empty list selects nothing.
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassifyGlycemicValueParams {
    /// "gi" for glycemic index or "gl" for glycemic load
    pub kind: String,
    pub value: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateChartParams {
    /// Serving size in grams (default 100)
    #[serde(default = "default_serving_size")]
    pub serving_size_g: f64,
    /// Categories to include. Omit for all categories.
    pub categories: Option<Vec<String>>,
    /// PNG output path (default: generated name in the output directory)
    pub output_path: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateReportParams {
    /// Serving size in grams (default 100)
    #[serde(default = "default_serving_size")]
    pub serving_size_g: f64,
    /// Categories to include. Omit for all categories.
    pub categories: Option<Vec<String>>,
    /// PDF output path (default: generated name in the output directory)
    pub output_path: Option<String>,
    /// Free-text notes printed on the chart page
    pub notes: Option<Vec<String>>,
}

/// Returned instead of a file when the selection holds no foods
#[derive(Debug, Serialize)]
struct EmptySelectionResponse {
    success: bool,
    empty: bool,
    reason: crate::glycemic::EmptyReason,
    message: String,
}

// ============================================================================
// Helpers
// ============================================================================

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn gl_error(e: GlError) -> McpError {
    McpError::invalid_params(e.to_string(), None)
}

/// Map a chart/report outcome onto a tool result
fn report_result<T: Serialize>(result: Result<T, ReportError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(response) => to_json(&response),
        Err(ReportError::EmptySelection(reason)) => to_json(&EmptySelectionResponse {
            success: false,
            empty: true,
            reason,
            message: reason.message().to_string(),
        }),
        Err(ReportError::Calculation(e)) => Err(gl_error(e)),
        Err(e) => Err(McpError::internal_error(e.to_string(), None)),
    }
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl GlycemicService {
    // --- Status ---

    #[tool(description = "Get the current status of the glycemic service including build info, output directory, catalog size, and process information")]
    async fn glycemic_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Explain glycemic index and glycemic load, their low/medium/high thresholds, and how to use these tools. Call this first when unsure how to interpret results.")]
    fn glycemic_guide(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::GLYCEMIC_GUIDE;
        Ok(CallToolResult::success(vec![Content::text(GLYCEMIC_GUIDE)]))
    }

    // --- Catalog ---

    #[tool(description = "List the food categories with the number of foods in each")]
    fn list_categories(&self) -> Result<CallToolResult, McpError> {
        to_json(&glycemic::list_categories())
    }

    #[tool(description = "List catalog foods with glycemic index, carbs per 100g, and GI band, optionally for one category")]
    fn list_foods(&self, Parameters(p): Parameters<ListFoodsParams>) -> Result<CallToolResult, McpError> {
        to_json(&glycemic::list_foods(p.category.as_deref()))
    }

    #[tool(description = "Look up one food by name and compute its carbohydrates, glycemic load and GI/GL bands for a serving size")]
    fn get_food(&self, Parameters(p): Parameters<GetFoodParams>) -> Result<CallToolResult, McpError> {
        let result = glycemic::get_food(&p.name, p.serving_size_g).map_err(gl_error)?;
        to_json(&result)
    }

    // --- Calculation ---

    #[tool(description = "Calculate carbohydrates and glycemic load for a serving size, with GI/GL bands, sorted from lowest to highest glycemic load. An empty category list returns an explicit empty result.")]
    fn calculate_glycemic_load(&self, Parameters(p): Parameters<CalculateGlycemicLoadParams>) -> Result<CallToolResult, McpError> {
        debug!(serving_size_g = p.serving_size_g, categories = ?p.categories, "calculate_glycemic_load");
        let result = glycemic::calculate_glycemic_load(p.serving_size_g, p.categories).map_err(gl_error)?;
        to_json(&result)
    }

    #[tool(description = "Classify a glycemic index (kind \"gi\") or glycemic load (kind \"gl\") value as low, medium, or high")]
    fn classify_glycemic_value(&self, Parameters(p): Parameters<ClassifyGlycemicValueParams>) -> Result<CallToolResult, McpError> {
        let measure = GlycemicMeasure::from_str(&p.kind).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown kind '{}': expected \"gi\" or \"gl\"", p.kind), None)
        })?;
        let result = glycemic::classify_glycemic_value(measure, p.value).map_err(gl_error)?;
        to_json(&result)
    }

    // --- Outputs ---

    #[tool(description = "Render the carbs-vs-glycemic-index scatter chart (points colored by glycemic load, high-load region shaded) to a PNG file")]
    fn generate_glycemic_chart(&self, Parameters(p): Parameters<GenerateChartParams>) -> Result<CallToolResult, McpError> {
        report_result(glycemic::generate_glycemic_chart(
            &self.output_dir,
            p.serving_size_g,
            p.categories,
            p.output_path,
        ))
    }

    #[tool(description = "Generate a PDF report with the sorted food table, band summary, and the scatter chart")]
    fn generate_glycemic_report(&self, Parameters(p): Parameters<GenerateReportParams>) -> Result<CallToolResult, McpError> {
        report_result(glycemic::generate_report(
            &self.output_dir,
            p.serving_size_g,
            p.categories,
            p.output_path,
            p.notes,
        ))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for GlycemicService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "glycemic-load".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Glycemic Load Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Glycemic Load Calculator - glycemic index (GI) and glycemic load (GL) of common foods \
                 scaled to a serving size in grams. Call glycemic_guide for the thresholds. \
                 Catalog: list_categories, list_foods, get_food. \
                 Calculation: calculate_glycemic_load (serving_size_g, optional categories), classify_glycemic_value. \
                 Outputs: generate_glycemic_chart (PNG), generate_glycemic_report (PDF). \
                 Status: glycemic_status."
                    .into(),
            ),
        }
    }
}
