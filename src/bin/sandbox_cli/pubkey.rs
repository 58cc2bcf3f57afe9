use clap::{Args, Subcommand};
use serde_json::json;

use solana_sandbox_mcp::{ToolDispatcher, ToolOutcome};

#[derive(Args, Debug)]
pub struct PubkeyCmd {
    #[command(subcommand)]
    pub command: PubkeyCommand,
}

#[derive(Subcommand, Debug)]
pub enum PubkeyCommand {
    /// Check that every key is valid base58 of 32 bytes
    Validate {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Decode a key and show its raw bytes
    Inspect { key: String },
}

impl PubkeyCmd {
    /// Runs through the same dispatcher the MCP server uses, audit log included.
    pub fn execute(&self) -> ToolOutcome {
        let dispatcher = ToolDispatcher::new();
        match &self.command {
            PubkeyCommand::Validate { keys } => match keys.as_slice() {
                [key] => dispatcher.dispatch("validate_public_key", json!({ "public_key": key })),
                _ => dispatcher.dispatch("validate_public_keys", json!({ "public_keys": keys })),
            },
            PubkeyCommand::Inspect { key } => {
                dispatcher.dispatch("inspect_public_key", json!({ "public_key": key }))
            }
        }
    }
}
