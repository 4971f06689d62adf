//! Error handling utilities for MCP server

use rmcp::ErrorData;
use trellis_core::PlannerError;

/// Helper to convert planner errors to MCP errors
///
/// Bad parameters and missing resources are reported as invalid-params so
/// clients can distinguish caller mistakes from server faults.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    match error {
        PlannerError::InvalidInput { .. }
        | PlannerError::PlanNotFound { .. }
        | PlannerError::StepNotFound { .. } => {
            ErrorData::invalid_params(format!("{message}: {error}"), None)
        }
        _ => ErrorData::internal_error(format!("{message}: {error}"), None),
    }
}
