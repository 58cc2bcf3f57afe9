//! Core helpers for Solana tool handlers.
//!
//! - **Public keys**: parse base58 strings into [`Pubkey`] values, reporting
//!   failures as data rather than panics
//! - **Tool results**: the [`ToolResult`] envelope every tool returns to the
//!   protocol layer
//!
//! See [`shared`] for the individual helpers.

pub mod shared;

pub use shared::pubkey::{parse_pubkey, validate_pubkey, ParseFailure, Pubkey};
pub use shared::response::{ContentItem, ContentKind, ToolMeta, ToolResult};
