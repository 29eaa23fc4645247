use net_analysis_mcp::McpError;
use net_analysis_tools::ToolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Logger is not configured; pass a configuration on first use")]
    LoggerNotConfigured,

    #[error("Logger setup failed: {0}")]
    Logger(String),

    #[error("Tool registration failed: {0}")]
    Registry(#[from] ToolError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Mcp(#[from] McpError),
}
