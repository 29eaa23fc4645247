//! Validated value containers.
//!
//! Caller-supplied values are converted into these types before they are
//! used to build a command line, so an invalid network or timeout never
//! reaches the process runner.

pub mod cidr;
pub mod timeout;

pub use cidr::CidrNetwork;
pub use timeout::{Timeout, TIMEOUT_MAX_SECS, TIMEOUT_MIN_SECS};
