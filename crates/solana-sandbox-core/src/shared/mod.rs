//! Shared helpers for tool handlers.
//!
//! # Modules
//!
//! - [`pubkey`] - Base58 public key parsing
//! - [`response`] - Uniform success/error envelopes for tool results

pub mod pubkey;
pub mod response;

pub use pubkey::*;
pub use response::*;
