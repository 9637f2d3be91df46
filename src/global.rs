//! Package-level default logger.
//!
//! The default is fixed the first time it is read. Call [`set_default`] at
//! process start, before any of the free functions below emit.

use std::sync::OnceLock;

use crate::logger::Log;

static DEFAULT: OnceLock<Log> = OnceLock::new();

/// Installs the default logger. Hands the value back if one is already set.
pub fn set_default(log: Log) -> Result<(), Log> {
    DEFAULT.set(log)
}

pub fn default_logger() -> &'static Log {
    DEFAULT.get_or_init(Log::default)
}

#[track_caller]
pub fn info(msg: impl AsRef<str>) {
    default_logger().info(msg);
}

#[track_caller]
pub fn debug(msg: impl AsRef<str>) {
    default_logger().debug(msg);
}

#[track_caller]
pub fn warn(msg: impl AsRef<str>) {
    default_logger().warn(msg);
}

#[track_caller]
pub fn error(msg: impl AsRef<str>) {
    default_logger().error(msg);
}
