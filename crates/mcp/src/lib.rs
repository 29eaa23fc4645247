//! # Net-Analysis MCP
//!
//! Model Context Protocol server for the network-analysis tool registry.
//!
//! [`McpServer`] implements `rmcp::ServerHandler` and answers `tools/list`
//! and `tools/call`; the session handshake and framing belong to `rmcp`.
//! Tool failures are returned as `isError` results carrying
//! `{"error": {"kind", "message"}}`; only transport problems end a session.
//!
//! ```rust,no_run
//! use net_analysis_mcp::{McpServer, ServerInfo};
//! use net_analysis_tools::{CommandRunner, ToolContext, ToolRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = ToolContext::new(Arc::new(CommandRunner::new()));
//!     let registry = Arc::new(ToolRegistry::with_known_tools(&ctx)?);
//!
//!     McpServer::new(registry, ServerInfo::default())
//!         .serve_stdio()
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod protocol;
pub mod server;

pub use error::{McpError, McpResult};
pub use protocol::{error_result, tool_from_descriptor, ErrorDetail, ErrorPayload};
pub use server::{McpServer, ServerInfo};
