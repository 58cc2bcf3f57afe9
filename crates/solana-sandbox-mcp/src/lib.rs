pub mod logging;
pub mod paths;
pub mod protocol;
pub mod state;
pub mod tools;

pub use paths::SandboxPaths;
pub use protocol::into_call_tool_result;
pub use state::{ToolDispatcher, ToolOutcome};
