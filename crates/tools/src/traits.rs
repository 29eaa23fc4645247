use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// Metadata advertised for a tool without executing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name, used as the registry key.
    fn name(&self) -> &str;

    /// Static metadata. Must return the same value on every call.
    fn descriptor(&self) -> ToolDescriptor;

    /// Validates `arguments` and performs the tool's action.
    async fn execute(&self, arguments: serde_json::Value) -> Result<String, ToolError>;
}
