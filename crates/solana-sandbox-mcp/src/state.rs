use crate::logging::{redact_sensitive, LevelReload, LogConfig, LogRecord, McpLogger};
use chrono::Utc;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use solana_sandbox_core::shared::{ToolMeta, ToolResult};

/// Result type shared by every tool, with the value erased to JSON.
pub type ToolOutcome = ToolResult<Value>;

/// Tools answered by [`ToolDispatcher::dispatch`].
pub const TOOL_NAMES: &[&str] = &[
    "validate_public_key",
    "inspect_public_key",
    "validate_public_keys",
    "get_state",
    "configure",
];

pub struct ToolDispatcher {
    logger: McpLogger,
    level_reload: Option<Box<dyn LevelReload>>,
}

impl Default for ToolDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolDispatcher {
    pub fn new() -> Self {
        Self::with_log_config(LogConfig::default())
    }

    /// The log directory is created lazily on the first record, so a bad
    /// path only costs the audit log, never the tools.
    pub fn with_log_config(config: LogConfig) -> Self {
        Self {
            logger: McpLogger::new(config),
            level_reload: None,
        }
    }

    /// Let the `configure` tool change the level of a running subscriber.
    pub fn with_level_reload(mut self, reload: impl LevelReload + 'static) -> Self {
        self.level_reload = Some(Box::new(reload));
        self
    }

    pub fn logger(&self) -> &McpLogger {
        &self.logger
    }

    pub(crate) fn level_reload(&self) -> Option<&dyn LevelReload> {
        self.level_reload.as_deref()
    }

    pub fn dispatch(&self, tool: &str, input: Value) -> ToolOutcome {
        let (meta, clean_input) = ToolMeta::extract(&input);
        let request_id = meta
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let start = Instant::now();

        let result = self.dispatch_inner(tool, clean_input.clone());

        let duration_ms = start.elapsed().as_millis();
        debug!(
            tool,
            request_id = %request_id,
            is_error = result.is_error(),
            "tool call finished"
        );

        let record = LogRecord {
            ts: Utc::now().to_rfc3339(),
            request_id,
            tool: tool.to_string(),
            input: redact_sensitive(&clean_input),
            output: redact_sensitive(&result.to_json()),
            duration_ms,
            success: !result.is_error(),
            error: result.is_error().then(|| result.message().to_string()),
            llm_reason: meta.reason,
            tags: meta.tags,
        };
        if let Err(e) = self.logger.log_tool_call(&record) {
            warn!(tool, error = %e, "failed to write tool call log");
        }

        result
    }

    fn dispatch_inner(&self, tool: &str, input: Value) -> ToolOutcome {
        match tool {
            "validate_public_key" => self.validate_public_key(input),
            "inspect_public_key" => self.inspect_public_key(input),
            "validate_public_keys" => self.validate_public_keys(input),
            "get_state" => self.get_state(input),
            "configure" => self.configure(input),
            _ => ToolResult::error(format!("Unknown tool: {}", tool)),
        }
    }
}
