use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use solana_sandbox_mcp::{ToolDispatcher, ToolOutcome};

#[derive(Parser, Debug)]
pub struct ToolCmd {
    /// Tool name (e.g., validate_public_key)
    pub name: String,

    /// JSON input string
    #[arg(long)]
    pub input: Option<String>,

    /// JSON input file path ("-" for stdin)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ToolCmd {
    pub fn execute(&self) -> Result<ToolOutcome> {
        let input_value = self.read_input()?;
        let dispatcher = ToolDispatcher::new();
        Ok(dispatcher.dispatch(&self.name, input_value))
    }

    fn read_input(&self) -> Result<Value> {
        let json_str = if let Some(file) = &self.file {
            if file.as_os_str() == "-" {
                use std::io::Read;
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(file)
                    .with_context(|| format!("Failed to read file: {}", file.display()))?
            }
        } else if let Some(input) = &self.input {
            input.clone()
        } else {
            return Ok(Value::Object(Default::default()));
        };

        let value: Value =
            serde_json::from_str(&json_str).with_context(|| "Failed to parse JSON input")?;
        Ok(value)
    }
}
