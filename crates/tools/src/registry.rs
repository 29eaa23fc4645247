use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ToolError;
use crate::ping_sweep::{PingSweepTool, DEFAULT_SCANNER_BINARY};
use crate::runner::ProcessRunner;
use crate::traits::{Tool, ToolDescriptor};
use crate::values::Timeout;

/// Shared dependencies handed to every tool constructor.
#[derive(Clone)]
pub struct ToolContext {
    pub runner: Arc<dyn ProcessRunner>,
    pub scanner_binary: String,
    pub exec_timeout: Timeout,
}

impl ToolContext {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            scanner_binary: DEFAULT_SCANNER_BINARY.to_string(),
            exec_timeout: Timeout::default(),
        }
    }
}

pub type ToolConstructor = fn(&ToolContext) -> Arc<dyn Tool>;

/// Every tool this crate ships, in registration order.
pub const KNOWN_TOOLS: &[ToolConstructor] = &[ping_sweep];

fn ping_sweep(ctx: &ToolContext) -> Arc<dyn Tool> {
    Arc::new(
        PingSweepTool::new(ctx.runner.clone())
            .with_binary(ctx.scanner_binary.clone())
            .with_exec_timeout(ctx.exec_timeout),
    )
}

/// Name-keyed tool catalog.
///
/// Populate it once at startup, then share it behind an `Arc`; lookups take
/// `&self` only.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Registry holding every entry of [`KNOWN_TOOLS`].
    pub fn with_known_tools(ctx: &ToolContext) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        registry.register_all_known(ctx)?;
        Ok(registry)
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<&mut Self, ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        debug!("Registering tool: {}", name);
        self.tools.insert(name, tool);
        Ok(self)
    }

    /// Registers [`KNOWN_TOOLS`]. Does nothing once the registry holds any tool.
    pub fn register_all_known(&mut self, ctx: &ToolContext) -> Result<(), ToolError> {
        if !self.tools.is_empty() {
            return Ok(());
        }
        for constructor in KNOWN_TOOLS {
            self.register(constructor(ctx))?;
        }
        info!("Registered {} tool(s)", self.tools.len());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Descriptors ordered by tool name.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|tool| tool.descriptor()).collect()
    }

    pub async fn dispatch(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<String, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;

        debug!("Dispatching tool: {}", name);
        tool.execute(arguments).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
