//! Wires configuration, logging, tools and the protocol server together.

use net_analysis_mcp::{McpServer, ServerInfo};
use net_analysis_tools::{CommandRunner, ProcessRunner, ToolContext, ToolRegistry};
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::logging::LoggerFactory;

pub fn server_info(config: &Config) -> ServerInfo {
    ServerInfo {
        name: config.mcp.name.clone(),
        version: config.mcp.version.clone(),
        description: config.mcp.description.clone(),
    }
}

pub fn tool_context(config: &Config, runner: Arc<dyn ProcessRunner>) -> ToolContext {
    ToolContext {
        runner,
        scanner_binary: config.scanner.binary.clone(),
        exec_timeout: config.scanner.exec_timeout(),
    }
}

/// Registers every known tool. The registry is read-only afterwards.
pub fn build_registry(
    config: &Config,
    runner: Arc<dyn ProcessRunner>,
) -> Result<ToolRegistry, AppError> {
    let ctx = tool_context(config, runner);
    let mut registry = ToolRegistry::new();
    registry.register_all_known(&ctx)?;
    Ok(registry)
}

pub fn build_server(
    config: &Config,
    runner: Arc<dyn ProcessRunner>,
) -> Result<McpServer, AppError> {
    let registry = build_registry(config, runner)?;
    Ok(McpServer::new(Arc::new(registry), server_info(config)))
}

/// Runs the server on stdio until the client closes its end.
pub async fn run(config: Config) -> Result<(), AppError> {
    let logger = LoggerFactory::get(Some(&config))?;
    logger.install()?;
    logger.info("Starting the application.");

    let result = match build_server(&config, Arc::new(CommandRunner::new())) {
        Ok(server) => server.serve_stdio().await.map_err(AppError::from),
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        logger.critical(format!("An error occurred: {}", e));
    }
    logger.info("Shutting down the application.");
    logger.shutdown();

    result
}
