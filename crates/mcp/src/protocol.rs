//! Mapping between registry types and MCP model types.

use net_analysis_tools::{ToolDescriptor, ToolError};
use rmcp::model::{CallToolResult, Content, IntoContents, JsonObject, Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Protocol form of a registry descriptor.
pub fn tool_from_descriptor(descriptor: ToolDescriptor) -> Tool {
    let schema = match descriptor.input_schema {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(descriptor.name, descriptor.description, Arc::new(schema))
}

/// Error text carried by a failed `tools/call` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: String,
    pub message: String,
}

impl From<&ToolError> for ErrorPayload {
    fn from(error: &ToolError) -> Self {
        Self {
            error: ErrorDetail {
                kind: error.kind().to_string(),
                message: error.to_string(),
            },
        }
    }
}

impl IntoContents for ErrorPayload {
    fn into_contents(self) -> Vec<Content> {
        let text = serde_json::to_string(&self).unwrap_or_else(|_| self.error.message.clone());
        vec![Content::text(text)]
    }
}

/// `isError` result for a failed tool call.
pub fn error_result(error: &ToolError) -> CallToolResult {
    CallToolResult::error(ErrorPayload::from(error).into_contents())
}
