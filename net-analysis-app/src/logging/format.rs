use chrono::Local;
use std::fmt::{self, Write as _};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::config::LogLevel;

/// Target of events emitted through `Logger::critical`.
pub const CRITICAL_TARGET: &str = "net_analysis::critical";

const ASCTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Maps an event onto the configured level scale. `ERROR` events on
/// [`CRITICAL_TARGET`] count as `CRITICAL`.
pub fn event_level(meta: &Metadata<'_>) -> LogLevel {
    match *meta.level() {
        Level::TRACE | Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warning,
        Level::ERROR if meta.target() == CRITICAL_TARGET => LogLevel::Critical,
        _ => LogLevel::Error,
    }
}

fn level_name(meta: &Metadata<'_>) -> &'static str {
    if *meta.level() == Level::TRACE {
        "TRACE"
    } else {
        event_level(meta).as_str()
    }
}

/// Fields available to a line pattern.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub asctime: &'a str,
    pub name: &'a str,
    pub levelname: &'a str,
    pub message: &'a str,
}

impl<'a> LogRecord<'a> {
    fn field(&self, key: &str) -> Option<&'a str> {
        match key {
            "asctime" => Some(self.asctime),
            "name" => Some(self.name),
            "levelname" => Some(self.levelname),
            "message" => Some(self.message),
            _ => None,
        }
    }
}

/// Expands `%(key)s` tokens in `pattern`. Unknown tokens are kept verbatim.
pub fn render(pattern: &str, record: &LogRecord<'_>) -> String {
    let mut out = String::with_capacity(pattern.len() + record.message.len());
    let mut rest = pattern;

    while let Some(start) = rest.find("%(") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find(")s") {
            Some(end) => {
                match record.field(&after[..end]) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[start..start + end + 4]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Event formatter driven by a `%(field)s` line pattern.
#[derive(Debug, Clone)]
pub struct PatternFormat {
    pattern: String,
    name: String,
}

impl PatternFormat {
    pub fn new(pattern: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            name: name.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for PatternFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;

        let asctime = Local::now().format(ASCTIME_FORMAT).to_string();
        let record = LogRecord {
            asctime: &asctime,
            name: &self.name,
            levelname: level_name(event.metadata()),
            message: &message,
        };

        writeln!(writer, "{}", render(&self.pattern, &record))
    }
}
