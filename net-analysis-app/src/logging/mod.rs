//! Configuration-driven logging.
//!
//! A [`Logger`] owns a `tracing` dispatcher wired to a size-rotating log
//! file and, optionally, to stderr. Stdout is never written: it carries
//! the protocol stream.

mod format;
mod rotate;

pub use format::{event_level, render, LogRecord, PatternFormat, CRITICAL_TARGET};
pub use rotate::SizeRotatingWriter;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::dispatcher::{self, Dispatch};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{filter_fn, FilterFn};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::{Config, LogLevel, LoggerKind, LoggingConfig};
use crate::error::AppError;

/// Target of events emitted through the [`Logger`] methods.
pub const LOG_TARGET: &str = "net_analysis";

fn level_filter(threshold: LogLevel) -> FilterFn<impl Fn(&tracing::Metadata<'_>) -> bool> {
    filter_fn(move |meta| event_level(meta) >= threshold)
}

pub struct Logger {
    name: String,
    level: LogLevel,
    file_path: PathBuf,
    dispatch: Dispatch,
    guard: Mutex<Option<WorkerGuard>>,
}

impl Logger {
    pub fn from_config(config: &LoggingConfig) -> Result<Self, AppError> {
        match config.kind {
            LoggerKind::File => Self::file_logger(config),
        }
    }

    fn file_logger(config: &LoggingConfig) -> Result<Self, AppError> {
        if !config.file.enabled {
            return Err(AppError::Logger(
                "File logging is disabled in the configuration".to_string(),
            ));
        }

        let file_path = config.file_path();
        let writer = SizeRotatingWriter::open(
            &file_path,
            config.file.max_bytes(),
            config.file.backup_count,
        )
        .map_err(|e| {
            AppError::Logger(format!(
                "Cannot open log file {}: {}",
                file_path.display(),
                e
            ))
        })?;
        let (file_writer, guard) = tracing_appender::non_blocking(writer);

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(file_writer)
            .event_format(PatternFormat::new(config.file_format(), &config.name))
            .with_filter(level_filter(config.level));

        let console_layer = config.console_enabled().then(|| {
            fmt::layer()
                .with_ansi(false)
                .with_writer(std::io::stderr)
                .event_format(PatternFormat::new(config.console_format(), &config.name))
                .with_filter(level_filter(config.level))
        });

        let subscriber = tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer);

        Ok(Self {
            name: config.name.clone(),
            level: config.level,
            file_path,
            dispatch: Dispatch::new(subscriber),
            guard: Mutex::new(Some(guard)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Routes every `tracing` event in the process to this logger.
    pub fn install(&self) -> Result<(), AppError> {
        dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|e| AppError::Logger(e.to_string()))
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Debug, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Info, message.as_ref());
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Warning, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Error, message.as_ref());
    }

    pub fn critical(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Critical, message.as_ref());
    }

    fn emit(&self, level: LogLevel, message: &str) {
        dispatcher::with_default(&self.dispatch, || match level {
            LogLevel::Debug => tracing::debug!(target: LOG_TARGET, "{}", message),
            LogLevel::Info => tracing::info!(target: LOG_TARGET, "{}", message),
            LogLevel::Warning => tracing::warn!(target: LOG_TARGET, "{}", message),
            LogLevel::Error => tracing::error!(target: LOG_TARGET, "{}", message),
            LogLevel::Critical => tracing::error!(target: CRITICAL_TARGET, "{}", message),
        });
    }

    /// Flushes pending lines and stops the file writer. Later events are dropped.
    pub fn shutdown(&self) {
        if let Ok(mut guard) = self.guard.lock() {
            guard.take();
        }
    }
}

static LOGGER: OnceLock<Arc<Logger>> = OnceLock::new();

/// Process-wide logger access.
pub struct LoggerFactory;

impl LoggerFactory {
    /// The first call must carry a configuration; the logger built from it is
    /// returned by every later call, whatever configuration they pass.
    pub fn get(config: Option<&Config>) -> Result<Arc<Logger>, AppError> {
        if let Some(logger) = LOGGER.get() {
            return Ok(logger.clone());
        }

        let config = config.ok_or(AppError::LoggerNotConfigured)?;
        let logger = Arc::new(Logger::from_config(&config.logging)?);
        Ok(LOGGER.get_or_init(|| logger).clone())
    }
}
