use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServiceExt,
};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use solana_sandbox_mcp::logging::{reloadable_filter, LogConfig};
use solana_sandbox_mcp::{into_call_tool_result, ToolDispatcher};
use std::sync::Arc;

#[derive(Clone)]
struct SandboxMcpServer {
    dispatcher: Arc<ToolDispatcher>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SandboxMcpServer {
    fn new(dispatcher: ToolDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            tool_router: Self::tool_router(),
        }
    }

    fn dispatch_tool(
        &self,
        name: &str,
        params: Parameters<Value>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.dispatcher.dispatch(name, params.0);
        Ok(into_call_tool_result(outcome))
    }

    #[tool(
        name = "validate_public_key",
        description = "Check that a string is a valid base58 public key"
    )]
    async fn validate_public_key(
        &self,
        params: Parameters<Value>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch_tool("validate_public_key", params)
    }

    #[tool(
        name = "inspect_public_key",
        description = "Decode a public key and report its raw bytes"
    )]
    async fn inspect_public_key(
        &self,
        params: Parameters<Value>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch_tool("inspect_public_key", params)
    }

    #[tool(
        name = "validate_public_keys",
        description = "Validate a list of public keys, reporting every invalid one"
    )]
    async fn validate_public_keys(
        &self,
        params: Parameters<Value>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch_tool("validate_public_keys", params)
    }

    #[tool(name = "get_state", description = "Get server state summary")]
    async fn get_state(&self, params: Parameters<Value>) -> Result<CallToolResult, McpError> {
        self.dispatch_tool("get_state", params)
    }

    #[tool(name = "configure", description = "Configure tool call logging")]
    async fn configure(&self, params: Parameters<Value>) -> Result<CallToolResult, McpError> {
        self.dispatch_tool("configure", params)
    }
}

#[tool_handler]
impl rmcp::ServerHandler for SandboxMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "solana-sandbox MCP server. Use validate_public_key or inspect_public_key \
                 to check account keys."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_config = LogConfig::default();

    // stdout carries the MCP transport
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_config.level));
    let (filter, level_handle) = reloadable_filter(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();

    let dispatcher = ToolDispatcher::with_log_config(log_config).with_level_reload(level_handle);
    info!(
        logs = %dispatcher.logger().config().path.display(),
        "starting solana-sandbox MCP server"
    );
    let server = SandboxMcpServer::new(dispatcher);
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}
