//! Input structs for MCP tool handlers.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct PublicKeyInput {
    pub public_key: String,
}

#[derive(Debug, Deserialize)]
pub struct PublicKeysInput {
    pub public_keys: Vec<String>,
}

/// Partial update of the tool call log settings. Absent fields keep their value.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LogSettingsInput {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub rotation_mb: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigureInput {
    #[serde(default)]
    pub logging: Option<LogSettingsInput>,
}
