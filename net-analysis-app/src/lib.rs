//! Network analysis MCP server application.
//!
//! Loads the YAML configuration, sets up logging, registers the network
//! tools and serves them over stdio.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;

pub use bootstrap::run;
pub use config::Config;
pub use error::AppError;
pub use logging::{Logger, LoggerFactory};
