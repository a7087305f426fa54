//! MCP server surface
//!
//! Bridges [`ToolSystem`] to the MCP protocol via `rmcp`. Bad arguments and
//! unknown tools become JSON-RPC `invalid_params` errors; failures while
//! talking to Giphy become tool results flagged `isError` whose text is the
//! sanitized error message.

use crate::config::GiphyConfig;
use crate::error::{sanitize_error_message, GatewayResult};
use crate::gateway::RequestGateway;
use crate::tools::{ToolDescription, ToolSystem};
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;

/// Name reported to clients during initialize
pub const SERVER_NAME: &str = "mcp-giphy";

/// MCP handler exposing the Giphy tools
#[derive(Clone)]
pub struct GiphyServer {
    tools: Arc<ToolSystem>,
}

impl GiphyServer {
    pub fn new(tools: ToolSystem) -> Self {
        Self {
            tools: Arc::new(tools),
        }
    }

    /// Server with the five Giphy tools over a fresh gateway
    pub fn from_config(config: &GiphyConfig) -> GatewayResult<Self> {
        let gateway = Arc::new(RequestGateway::new(config)?);
        Ok(Self::new(ToolSystem::giphy(gateway)))
    }

    pub fn tool_system(&self) -> &ToolSystem {
        &self.tools
    }

    /// Tool list as advertised over MCP
    pub fn mcp_tools(&self) -> Vec<McpTool> {
        self.tools.describe_all().into_iter().map(to_mcp_tool).collect()
    }

    /// Run one tool call and map the outcome to MCP
    pub async fn invoke(&self, name: &str, arguments: &Value) -> Result<CallToolResult, McpError> {
        match self.tools.call_tool(name, arguments).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) if e.is_invalid_params() => Err(McpError::invalid_params(
                sanitize_error_message(&e.to_string()),
                None,
            )),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(
                sanitize_error_message(&e.to_string()),
            )])),
        }
    }
}

fn to_mcp_tool(description: ToolDescription) -> McpTool {
    let schema = match description.parameters {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    McpTool::new(description.name, description.description, Arc::new(schema))
}

impl ServerHandler for GiphyServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = SERVER_NAME.to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(
                "Search Giphy for GIFs and stickers. Requires GIPHY_API_KEY in the server environment."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.mcp_tools(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = Value::Object(request.arguments.unwrap_or_default());
        self.invoke(&request.name, &arguments).await
    }
}
