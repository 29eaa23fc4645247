use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::error::ToolError;
use crate::runner::{ProcessRunner, DEFAULT_TIMEOUT_SECS};
use crate::traits::{Tool, ToolDescriptor};
use crate::values::{CidrNetwork, Timeout};

pub const PING_SWEEP_TOOL_NAME: &str = "PingSweepTool";
pub const DEFAULT_SCANNER_BINARY: &str = "nmap";

#[derive(Deserialize)]
struct PingSweepInput {
    ip_cidr: String,
    timeout_s: i64,
}

/// Host discovery over a network range with an ICMP echo ping sweep.
///
/// Returns the scanner's XML report untouched.
pub struct PingSweepTool {
    runner: Arc<dyn ProcessRunner>,
    binary: String,
    exec_timeout_s: u64,
}

impl PingSweepTool {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            binary: DEFAULT_SCANNER_BINARY.to_string(),
            exec_timeout_s: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Upper bound on the scanner process lifetime.
    pub fn with_exec_timeout(mut self, timeout: Timeout) -> Self {
        self.exec_timeout_s = timeout.as_secs();
        self
    }

    pub fn build_command(&self, cidr: &CidrNetwork, host_timeout: &Timeout) -> Vec<String> {
        vec![
            self.binary.clone(),
            "-oX".into(),
            "-".into(),
            "-sn".into(),
            "-PE".into(),
            "--max-retries".into(),
            "0".into(),
            "--host-timeout".into(),
            format!("{host_timeout}s"),
            cidr.to_string(),
        ]
    }
}

#[async_trait]
impl Tool for PingSweepTool {
    fn name(&self) -> &str {
        PING_SWEEP_TOOL_NAME
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: "Perform a ping sweep on the specified network using nmap.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ip_cidr": {
                        "type": "string",
                        "description": "CIDR notation of the IP range to scan (e.g., 192.168.0.0/24)."
                    },
                    "timeout_s": {
                        "type": "integer",
                        "description": "Host timeout in seconds (e.g., 10), between 1 and 3600."
                    }
                },
                "required": ["ip_cidr", "timeout_s"]
            }),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<String, ToolError> {
        if !arguments.is_object() {
            return Err(ToolError::InvalidArguments(
                "arguments must be a JSON object".into(),
            ));
        }
        let input: PingSweepInput = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let cidr = CidrNetwork::parse(&input.ip_cidr)
            .map_err(|e| ToolError::InvalidArguments(format!("ip_cidr: {e}")))?;
        let host_timeout = Timeout::new(input.timeout_s)
            .map_err(|e| ToolError::InvalidArguments(format!("timeout_s: {e}")))?;

        info!(
            "Starting ping sweep for {} with host timeout {}s",
            cidr, host_timeout
        );

        let command = self.build_command(&cidr, &host_timeout);
        self.runner.execute(&command, self.exec_timeout_s).await
    }
}
