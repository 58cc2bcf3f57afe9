//! MCP tool handler implementations.

use anyhow::Context;
use serde::Serialize;
use serde_json::{json, Value};

use solana_sandbox_core::shared::{
    extract_input, parse_pubkey, validate_pubkey, Pubkey, ToolResult,
};

use super::inputs::{ConfigureInput, LogSettingsInput, PublicKeyInput, PublicKeysInput};
use crate::logging::{ensure_dir, LogConfig};
use crate::state::{ToolDispatcher, ToolOutcome, TOOL_NAMES};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Structured view of a public key returned by `inspect_public_key`.
#[derive(Debug, Clone, Serialize)]
pub struct PublicKeyInfo {
    pub base58: Pubkey,
    pub hex: String,
    pub is_default: bool,
}

impl From<Pubkey> for PublicKeyInfo {
    fn from(key: Pubkey) -> Self {
        Self {
            base58: key,
            hex: key.to_hex(),
            is_default: key.is_default(),
        }
    }
}

impl ToolDispatcher {
    pub(crate) fn validate_public_key(&self, input: Value) -> ToolOutcome {
        let parsed: PublicKeyInput = match extract_input(input) {
            Ok(v) => v,
            Err(e) => return e,
        };
        let key = match validate_pubkey(&parsed.public_key) {
            Ok(key) => key,
            Err(resp) => return resp,
        };
        ToolResult::success(format!("Valid public key: {}", key))
    }

    pub(crate) fn inspect_public_key(&self, input: Value) -> ToolOutcome {
        let parsed: PublicKeyInput = match extract_input(input) {
            Ok(v) => v,
            Err(e) => return e,
        };
        let key = match validate_pubkey(&parsed.public_key) {
            Ok(key) => key,
            Err(resp) => return resp,
        };
        ToolResult::success_with_result(format!("Public key {}", key), PublicKeyInfo::from(key))
            .into_json()
    }

    /// Reports every invalid key, in input order, rather than only the first.
    pub(crate) fn validate_public_keys(&self, input: Value) -> ToolOutcome {
        let parsed: PublicKeysInput = match extract_input(input) {
            Ok(v) => v,
            Err(e) => return e,
        };
        if parsed.public_keys.is_empty() {
            return ToolResult::error("No public keys provided");
        }

        let failures: Vec<String> = parsed
            .public_keys
            .iter()
            .filter_map(|key| parse_pubkey(key).err())
            .map(|failure| failure.to_string())
            .collect();

        match failures.split_first() {
            None => {
                let count = parsed.public_keys.len();
                ToolResult::success_with_result(
                    format!("All {} public keys are valid", count),
                    json!({ "count": count }),
                )
            }
            Some((first, rest)) => rest
                .iter()
                .fold(ToolResult::error(first.clone()), |resp, msg| {
                    resp.with_text(msg.clone())
                }),
        }
    }

    pub(crate) fn get_state(&self, _input: Value) -> ToolOutcome {
        let logging = match logging_json(&self.logger().config()) {
            Ok(value) => value,
            Err(e) => return ToolResult::from_error(&e),
        };
        ToolResult::success_with_result(
            "Sandbox state",
            json!({ "tools": TOOL_NAMES, "logging": logging }),
        )
    }

    pub(crate) fn configure(&self, input: Value) -> ToolOutcome {
        let parsed: ConfigureInput = match extract_input(input) {
            Ok(v) => v,
            Err(e) => return e,
        };
        let Some(settings) = parsed.logging else {
            return match logging_json(&self.logger().config()) {
                Ok(logging) => {
                    ToolResult::success_with_result("No changes", json!({ "logging": logging }))
                }
                Err(e) => ToolResult::from_error(&e),
            };
        };

        let level_changed = settings.level.is_some();
        let config = match apply_log_settings(self.logger().config(), settings) {
            Ok(config) => config,
            Err(e) => return ToolResult::from_error(&e),
        };
        let logging = match logging_json(&config) {
            Ok(value) => value,
            Err(e) => return ToolResult::from_error(&e),
        };
        if level_changed {
            if let Some(reload) = self.level_reload() {
                if let Err(e) = reload.reload_level(&config.level) {
                    return ToolResult::from_error(&e);
                }
            }
        }
        self.logger().update_config(config);
        ToolResult::success_with_result("Configuration updated", json!({ "logging": logging }))
    }
}

fn logging_json(config: &LogConfig) -> anyhow::Result<Value> {
    serde_json::to_value(config).context("Failed to serialize logging config")
}

fn apply_log_settings(
    mut config: LogConfig,
    settings: LogSettingsInput,
) -> anyhow::Result<LogConfig> {
    if let Some(level) = settings.level {
        let level = level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!("Invalid log level: {}", level);
        }
        config.level = level;
    }
    if let Some(path) = settings.path {
        ensure_dir(&path)?;
        config.path = path;
    }
    if let Some(enabled) = settings.enabled {
        config.enabled = enabled;
    }
    if let Some(rotation_mb) = settings.rotation_mb {
        config.rotation_mb = rotation_mb;
    }
    Ok(config)
}
