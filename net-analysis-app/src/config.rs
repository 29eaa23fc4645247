//! YAML configuration loader.

use net_analysis_tools::{Timeout, DEFAULT_TIMEOUT_SECS};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "MCP_NET_ANALYSIS_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

pub const DEFAULT_LOG_FORMAT: &str = "%(asctime)s - %(name)s - %(levelname)s - %(message)s";
pub const DEFAULT_MAX_SIZE_MB: u64 = 10;
pub const DEFAULT_BACKUP_COUNT: u32 = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub mcp: McpConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct McpConfig {
    pub name: String,
    pub version: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerKind {
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub name: String,
    pub level: LogLevel,
    #[serde(rename = "type")]
    pub kind: LoggerKind,
    #[serde(default)]
    pub console: Option<ConsoleConfig>,
    pub file: FileConfig,
}

impl LoggingConfig {
    /// Configured log file, or `logs/<name>.log`.
    pub fn file_path(&self) -> PathBuf {
        self.file
            .path
            .clone()
            .unwrap_or_else(|| Path::new("logs").join(format!("{}.log", self.name)))
    }

    pub fn file_format(&self) -> &str {
        self.file.format.as_deref().unwrap_or(DEFAULT_LOG_FORMAT)
    }

    /// Console line pattern, falling back to the file pattern.
    pub fn console_format(&self) -> &str {
        self.console
            .as_ref()
            .and_then(|c| c.format.as_deref())
            .unwrap_or_else(|| self.file_format())
    }

    pub fn console_enabled(&self) -> bool {
        self.console.as_ref().is_some_and(|c| c.enabled)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    pub enabled: bool,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub enabled: bool,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,
    #[serde(default = "default_backup_count")]
    pub backup_count: u32,
    #[serde(default)]
    pub format: Option<String>,
}

impl FileConfig {
    pub fn max_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}

fn default_max_size_mb() -> u64 {
    DEFAULT_MAX_SIZE_MB
}

fn default_backup_count() -> u32 {
    DEFAULT_BACKUP_COUNT
}

/// External scanner settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScannerConfig {
    #[serde(default = "default_scanner_binary")]
    pub binary: String,
    #[serde(default = "default_exec_timeout_s")]
    pub exec_timeout_s: i64,
}

impl ScannerConfig {
    /// Validated on load, so the fallback is never taken for a loaded config.
    pub fn exec_timeout(&self) -> Timeout {
        Timeout::new(self.exec_timeout_s).unwrap_or_default()
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            binary: default_scanner_binary(),
            exec_timeout_s: default_exec_timeout_s(),
        }
    }
}

fn default_scanner_binary() -> String {
    net_analysis_tools::ping_sweep::DEFAULT_SCANNER_BINARY.to_string()
}

fn default_exec_timeout_s() -> i64 {
    DEFAULT_TIMEOUT_SECS as i64
}

impl Config {
    /// Picks the configuration file: explicit path, then `CONFIG_PATH_ENV`,
    /// then `DEFAULT_CONFIG_PATH`.
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        resolve_path_from(explicit, std::env::var_os(CONFIG_PATH_ENV))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AppError::ConfigInvalid(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigInvalid(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::ConfigInvalid("Config file is empty".to_string()));
        }

        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| AppError::ConfigInvalid(format!("Invalid YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty("mcp.name", &self.mcp.name)?;
        require_non_empty("mcp.version", &self.mcp.version)?;
        require_non_empty("logging.name", &self.logging.name)?;

        if let Some(console) = &self.logging.console {
            if let Some(format) = &console.format {
                require_non_empty("logging.console.format", format)?;
            }
        }

        let file = &self.logging.file;
        if let Some(path) = &file.path {
            if path.as_os_str().is_empty() {
                return Err(AppError::ConfigInvalid(
                    "logging.file.path must not be empty".to_string(),
                ));
            }
        }
        if let Some(format) = &file.format {
            require_non_empty("logging.file.format", format)?;
        }
        if file.max_size_mb == 0 {
            return Err(AppError::ConfigInvalid(
                "logging.file.max_size_mb must be greater than 0".to_string(),
            ));
        }

        require_non_empty("scanner.binary", &self.scanner.binary)?;
        Timeout::new(self.scanner.exec_timeout_s)
            .map_err(|e| AppError::ConfigInvalid(format!("scanner.exec_timeout_s: {}", e)))?;

        Ok(())
    }
}

fn resolve_path_from(explicit: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    explicit
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ConfigInvalid(format!("{} must not be empty", field)));
    }
    Ok(())
}
