use anyhow::{Context, Result};
use clap::Parser;
use net_analysis_app::Config;
use std::path::PathBuf;
use std::process::ExitCode;

/// Network analysis tools served over the Model Context Protocol (stdio).
#[derive(Parser, Debug)]
#[command(name = "net-analysis", version, about)]
struct Cli {
    /// Configuration file [env: MCP_NET_ANALYSIS_CONFIG_PATH, default: config/config.yaml]
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("An error occurred: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn start() -> Result<()> {
    let cli = Cli::parse();

    let path = Config::resolve_path(cli.config);
    let config = Config::load(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    net_analysis_app::run(config).await?;
    Ok(())
}
