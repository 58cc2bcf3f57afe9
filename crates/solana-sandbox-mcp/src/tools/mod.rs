//! MCP tool implementations, split into logical modules.
//!
//! - `inputs`: Input structs accepted by the tools
//! - `handlers`: Tool handler implementations

pub(crate) mod handlers;
pub mod inputs;

pub use handlers::PublicKeyInfo;
pub use inputs::{ConfigureInput, LogSettingsInput, PublicKeyInput, PublicKeysInput};
