//! Error handling utilities for MCP server

use relay_core::RelayError;
use rmcp::ErrorData;

/// Maps core errors to MCP errors.
///
/// Errors caused by the caller's arguments become `invalid_params`; anything
/// else is reported as an internal error.
pub fn to_mcp_error(message: &str, error: &RelayError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        RelayError::UnknownStep { .. }
        | RelayError::UnknownField { .. }
        | RelayError::InvalidInput { .. }
        | RelayError::Configuration { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_user_errors_are_invalid_params() {
        let error = RelayError::UnknownStep {
            id: "nine".to_string(),
        };
        let mapped = to_mcp_error("Failed to jump", &error);
        assert_eq!(mapped.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(mapped.message, "Failed to jump: Step 'nine' not found");
    }

    #[test]
    fn test_other_errors_are_internal() {
        let error = RelayError::UnknownTemplate {
            id: "outline".to_string(),
        };
        let mapped = to_mcp_error("Failed to render prompt", &error);
        assert_eq!(mapped.code, ErrorCode::INTERNAL_ERROR);
    }
}
