//! Subcommands of the solana-sandbox CLI.

pub mod output;
pub mod pubkey;
pub mod tool;
