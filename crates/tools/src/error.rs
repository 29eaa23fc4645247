use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Command timed out after {timeout_s}s: {command}")]
    ExecutionTimeout { command: String, timeout_s: u64 },

    #[error("Command failed{}: {command}: {detail}", exit_suffix(.exit_code))]
    ExecutionFailed {
        command: String,
        exit_code: Option<i32>,
        detail: String,
    },
}

fn exit_suffix(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!(" with exit code {code}"),
        None => String::new(),
    }
}

impl ToolError {
    /// Stable kind name reported to protocol clients.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::InvalidValue(_) => "InvalidValue",
            ToolError::InvalidArguments(_) => "InvalidArguments",
            ToolError::ToolNotFound(_) => "ToolNotFound",
            ToolError::DuplicateTool(_) => "DuplicateTool",
            ToolError::ExecutionTimeout { .. } => "ExecutionTimeout",
            ToolError::ExecutionFailed { .. } => "ExecutionFailed",
        }
    }
}
