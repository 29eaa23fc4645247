use std::fmt;
use std::time::Duration;

use crate::error::ToolError;
use crate::runner::DEFAULT_TIMEOUT_SECS;

pub const TIMEOUT_MIN_SECS: i64 = 1;
pub const TIMEOUT_MAX_SECS: i64 = 3600;

/// A timeout in whole seconds, bounded to `[min, max]` at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timeout {
    secs: u64,
}

impl Timeout {
    pub fn new(secs: i64) -> Result<Self, ToolError> {
        Self::with_bounds(secs, TIMEOUT_MIN_SECS, TIMEOUT_MAX_SECS)
    }

    pub fn with_bounds(secs: i64, min: i64, max: i64) -> Result<Self, ToolError> {
        if secs < min || secs > max {
            return Err(ToolError::InvalidValue(format!(
                "Timeout value must be between {min}s and {max}s, got {secs}s"
            )));
        }
        let secs = u64::try_from(secs).map_err(|_| {
            ToolError::InvalidValue(format!("Timeout value must not be negative, got {secs}s"))
        })?;
        Ok(Self { secs })
    }

    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.secs)
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self {
            secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.secs)
    }
}

impl TryFrom<i64> for Timeout {
    type Error = ToolError;

    fn try_from(secs: i64) -> Result<Self, Self::Error> {
        Self::new(secs)
    }
}
