//! JSONL audit log of MCP tool calls.

use anyhow::{Context, Result};
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, Subscriber};
use tracing_subscriber::{reload, EnvFilter};

use crate::paths::default_paths;

const REDACTED: &str = "***redacted***";

/// Field-name fragments whose values never reach the log.
const SENSITIVE_FRAGMENTS: &[&str] = &[
    "secret", "private", "password", "token", "seed", "mnemonic",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub level: String,
    pub rotation_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_paths().logs_dir(),
            level: "info".to_string(),
            rotation_mb: 50,
        }
    }
}

#[derive(Debug)]
pub struct McpLogger {
    config: Mutex<LogConfig>,
    file: Mutex<Option<File>>,
    file_path: Mutex<Option<PathBuf>>,
}

impl McpLogger {
    pub fn new(config: LogConfig) -> Self {
        Self {
            config: Mutex::new(config),
            file: Mutex::new(None),
            file_path: Mutex::new(None),
        }
    }

    pub fn config(&self) -> LogConfig {
        self.config.lock().clone()
    }

    /// Replace the config. The next record opens a fresh file.
    pub fn update_config(&self, new_config: LogConfig) {
        *self.config.lock() = new_config;
        *self.file.lock() = None;
        *self.file_path.lock() = None;
    }

    /// Path of the file currently being appended to, if one is open.
    pub fn current_file(&self) -> Option<PathBuf> {
        self.file_path.lock().clone()
    }

    pub fn log_tool_call(&self, record: &LogRecord) -> Result<()> {
        let config = self.config.lock().clone();
        if !config.enabled {
            return Ok(());
        }

        ensure_dir(&config.path)?;
        self.rotate_if_needed(&config);

        let mut file_guard = self.file.lock();
        if file_guard.is_none() {
            let file_path = current_log_path(&config);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&file_path)
                .with_context(|| format!("Failed to open log file: {}", file_path.display()))?;
            debug!(path = %file_path.display(), "opened tool call log");
            *file_guard = Some(file);
            *self.file_path.lock() = Some(file_path);
        }

        if let Some(file) = file_guard.as_mut() {
            let line = serde_json::to_string(record)?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    fn rotate_if_needed(&self, config: &LogConfig) {
        let current = self.file_path.lock().clone();
        if let Some(path) = current {
            if let Ok(metadata) = fs::metadata(&path) {
                let size_mb = metadata.len() / (1024 * 1024);
                if size_mb >= config.rotation_mb {
                    debug!(path = %path.display(), size_mb, "rotating tool call log");
                    *self.file.lock() = None;
                    *self.file_path.lock() = None;
                }
            }
        }
    }
}

/// Applies a new diagnostic log level to a running subscriber.
pub trait LevelReload: Send + Sync {
    fn reload_level(&self, level: &str) -> Result<()>;
}

impl<S> LevelReload for reload::Handle<EnvFilter, S>
where
    S: Subscriber + 'static,
{
    fn reload_level(&self, level: &str) -> Result<()> {
        let filter = EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log filter: {}", level))?;
        self.reload(filter).context("Failed to reload log filter")?;
        Ok(())
    }
}

/// Wrap `filter` so its level can be changed after the subscriber is installed.
pub fn reloadable_filter<S>(
    filter: EnvFilter,
) -> (reload::Layer<EnvFilter, S>, reload::Handle<EnvFilter, S>)
where
    S: Subscriber,
{
    reload::Layer::new(filter)
}

fn current_log_path(config: &LogConfig) -> PathBuf {
    let ts = Utc::now().format("%Y%m%d-%H%M%S");
    config.path.join(format!("mcp-{}.jsonl", ts))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub ts: String,
    pub request_id: String,
    pub tool: String,
    pub input: Value,
    pub output: Value,
    pub duration_ms: u128,
    pub success: bool,
    pub error: Option<String>,
    pub llm_reason: Option<String>,
    pub tags: Option<Vec<String>>,
}

fn is_sensitive(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_FRAGMENTS.iter().any(|frag| key.contains(frag))
}

/// Mask values stored under secret-looking keys. Public keys pass through.
pub fn redact_sensitive(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = if is_sensitive(k) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact_sensitive(v)
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(arr) => Value::Array(arr.iter().map(redact_sensitive).collect()),
        _ => value.clone(),
    }
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create log dir: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(tool: &str) -> LogRecord {
        LogRecord {
            ts: Utc::now().to_rfc3339(),
            request_id: "req-1".to_string(),
            tool: tool.to_string(),
            input: json!({}),
            output: json!({}),
            duration_ms: 0,
            success: true,
            error: None,
            llm_reason: None,
            tags: None,
        }
    }

    #[test]
    fn test_redact_keeps_public_keys() {
        let input = json!({
            "public_key": "11111111111111111111111111111111",
            "secret_key": "abc",
            "nested": [{ "Mnemonic": "words", "owner": "x" }]
        });
        let redacted = redact_sensitive(&input);
        assert_eq!(redacted["public_key"], "11111111111111111111111111111111");
        assert_eq!(redacted["secret_key"], REDACTED);
        assert_eq!(redacted["nested"][0]["Mnemonic"], REDACTED);
        assert_eq!(redacted["nested"][0]["owner"], "x");
    }

    #[test]
    fn test_log_tool_call_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let logger = McpLogger::new(LogConfig {
            path: dir.path().to_path_buf(),
            ..LogConfig::default()
        });

        logger.log_tool_call(&record("a")).unwrap();
        logger.log_tool_call(&record("b")).unwrap();

        let path = logger.current_file().unwrap();
        let contents = fs::read_to_string(path).unwrap();
        let tools: Vec<String> = contents
            .lines()
            .map(|l| serde_json::from_str::<LogRecord>(l).unwrap().tool)
            .collect();
        assert_eq!(tools, vec!["a", "b"]);
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let logger = McpLogger::new(LogConfig {
            enabled: false,
            path: logs.clone(),
            ..LogConfig::default()
        });

        logger.log_tool_call(&record("a")).unwrap();
        assert!(logger.current_file().is_none());
        assert!(!logs.exists());
    }

    #[test]
    fn test_update_config_resets_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = McpLogger::new(LogConfig {
            path: dir.path().join("first"),
            ..LogConfig::default()
        });
        logger.log_tool_call(&record("a")).unwrap();
        assert!(logger.current_file().is_some());

        let second = dir.path().join("second");
        logger.update_config(LogConfig {
            path: second.clone(),
            ..logger.config()
        });
        assert!(logger.current_file().is_none());

        logger.log_tool_call(&record("b")).unwrap();
        assert!(logger.current_file().unwrap().starts_with(&second));
    }

    #[test]
    fn test_reload_level_replaces_filter() {
        let (layer, handle) =
            reloadable_filter::<tracing_subscriber::Registry>(EnvFilter::new("info"));

        handle.reload_level("debug").unwrap();
        let current = handle.with_current(|f| f.to_string()).unwrap();
        assert!(current.contains("debug"), "filter was {}", current);

        // the handle only works while the layer is alive
        drop(layer);
        assert!(handle.reload_level("warn").is_err());
    }

    #[test]
    fn test_zero_rotation_opens_new_file_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let logger = McpLogger::new(LogConfig {
            path: dir.path().to_path_buf(),
            rotation_mb: 0,
            ..LogConfig::default()
        });
        logger.log_tool_call(&record("a")).unwrap();
        // a 0 MB limit is always reached, so the handle is dropped before the next write
        logger.rotate_if_needed(&logger.config());
        assert!(logger.current_file().is_none());
    }
}
