//! Mapping from tool outcomes to MCP `tools/call` results.

use rmcp::model::{CallToolResult, Content};

use crate::state::ToolOutcome;

/// Content items keep their order; `toolResult` becomes the structured content.
pub fn into_call_tool_result(outcome: ToolOutcome) -> CallToolResult {
    let is_error = outcome.is_error();
    let content = outcome
        .content()
        .iter()
        .map(|item| Content::text(item.text.clone()))
        .collect();
    CallToolResult {
        content,
        structured_content: outcome.into_tool_result(),
        is_error: Some(is_error),
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use solana_sandbox_core::ToolResult;

    #[test]
    fn test_error_outcome() {
        let outcome = ToolResult::error("Invalid public key: x").with_text("second");
        let result = into_call_tool_result(outcome);
        assert!(result.structured_content.is_none());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isError"], true);
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Invalid public key: x");
        assert_eq!(json["content"][1]["text"], "second");
    }

    #[test]
    fn test_success_outcome_with_result() {
        let outcome = ToolResult::success_with_result("ok", json!({ "count": 1 }));
        let result = into_call_tool_result(outcome);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content, Some(json!({ "count": 1 })));
        assert_eq!(result.content.len(), 1);
    }
}
