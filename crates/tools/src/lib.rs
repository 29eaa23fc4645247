//! Tool registry and network-discovery tools.
//!
//! A [`Tool`] declares a [`ToolDescriptor`] and executes JSON arguments.
//! The [`ToolRegistry`] maps tool names to instances and dispatches calls.
//! External commands run through a [`ProcessRunner`], fed only with values
//! that already passed the containers in [`values`].

pub mod error;
pub mod ping_sweep;
pub mod registry;
pub mod runner;
pub mod traits;
pub mod values;

pub use error::ToolError;
pub use ping_sweep::{PingSweepTool, PING_SWEEP_TOOL_NAME};
pub use registry::{ToolConstructor, ToolContext, ToolRegistry, KNOWN_TOOLS};
pub use runner::{CommandRunner, ProcessRunner, DEFAULT_TIMEOUT_SECS};
pub use traits::{Tool, ToolDescriptor};
pub use values::{CidrNetwork, Timeout};
