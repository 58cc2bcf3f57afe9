//! solana-sandbox: a developer CLI for Solana public keys
//!
//! Runs the same helpers the MCP server exposes, from the shell.
//!
//! ## Example Usage
//!
//! ```bash
//! # Validate one or more keys
//! solana-sandbox pubkey validate 11111111111111111111111111111111
//!
//! # Show the raw bytes of a key
//! solana-sandbox --json pubkey inspect TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA
//!
//! # Call any MCP tool with a JSON input
//! solana-sandbox tool validate_public_keys --input '{"public_keys": ["..."]}'
//! ```
//!
//! The process exits with status 1 whenever the result is an error.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod sandbox_cli;

use sandbox_cli::{pubkey::PubkeyCmd, tool::ToolCmd};

#[derive(Parser)]
#[command(
    name = "solana-sandbox",
    author,
    version,
    about = "Solana public key tooling",
    long_about = "Validate and inspect base58 public keys, or invoke the MCP tools directly."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output the result envelope as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate or inspect public keys
    Pubkey(PubkeyCmd),

    /// Invoke an MCP tool by name
    Tool(ToolCmd),
}

fn main() -> Result<()> {
    let Cli { command, json } = Cli::parse();

    let (outcome, pretty) = match command {
        Commands::Pubkey(cmd) => (cmd.execute(), false),
        Commands::Tool(cmd) => {
            let pretty = cmd.pretty;
            (cmd.execute()?, pretty)
        }
    };

    sandbox_cli::output::print_outcome(&outcome, json, pretty)?;
    if outcome.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
