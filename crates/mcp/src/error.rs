use thiserror::Error;

pub type McpResult<T> = Result<T, McpError>;

/// Session-level failures. Tool errors are reported inside results and
/// never surface here.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Session initialization failed: {0}")]
    Initialize(String),

    #[error("Transport error: {0}")]
    Transport(String),
}
