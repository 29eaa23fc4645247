//! MCP server exposing a [`ToolRegistry`] through the `rmcp` service runtime.

use net_analysis_tools::ToolRegistry;
use rmcp::model::{
    self, CallToolRequestParam, CallToolResult, Content, ErrorData, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler, ServiceExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{info, warn};

use crate::error::{McpError, McpResult};
use crate::protocol::{error_result, tool_from_descriptor};

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "net-analysis-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Network analysis tools over the Model Context Protocol".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
}

impl McpServer {
    /// `registry` must be fully populated; the server never mutates it.
    pub fn new(registry: Arc<ToolRegistry>, info: ServerInfo) -> Self {
        Self { registry, info }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Registered tools in protocol form, ordered by name.
    pub fn tools(&self) -> Vec<model::Tool> {
        info!("Listing tools...");
        self.registry
            .list()
            .into_iter()
            .map(tool_from_descriptor)
            .collect()
    }

    /// Runs a tool. Tool failures are folded into the result, never returned.
    pub async fn run_tool(&self, name: &str, arguments: Value) -> CallToolResult {
        info!("Calling tool: {} with arguments: {}", name, arguments);

        match self.registry.dispatch(name, arguments).await {
            Ok(output) => CallToolResult::success(vec![Content::text(output)]),
            Err(e) => {
                warn!(tool = %name, kind = e.kind(), error = %e, "Tool call failed");
                error_result(&e)
            }
        }
    }

    /// Runs one MCP session over `reader`/`writer` until the peer disconnects.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> McpResult<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        info!(name = %self.info.name, version = %self.info.version, "MCP server ready");

        let running = ServiceExt::serve(self, (reader, writer))
            .await
            .map_err(|e| McpError::Initialize(e.to_string()))?;
        let reason = running
            .waiting()
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;

        info!(reason = ?reason, "MCP session ended");
        Ok(())
    }

    pub async fn serve_stdio(self) -> McpResult<()> {
        let (stdin, stdout) = rmcp::transport::stdio();
        self.serve(stdin, stdout).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> model::ServerInfo {
        let mut info = model::ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = self.info.name.clone();
        info.server_info.version = self.info.version.clone();
        if !self.info.description.is_empty() {
            info.instructions = Some(self.info.description.clone());
        }
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = Value::Object(request.arguments.unwrap_or_default());
        Ok(self.run_tool(&request.name, arguments).await)
    }
}
