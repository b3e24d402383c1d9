//! msglog's own diagnostic logger: write failures, config loading, created
//! directories. It is itself a msglog `Logger` writing to stderr, with its own
//! message table.
//!
//! Uses `OnceLock` so the logger is initialized exactly once, even if several
//! threads report at the same moment. The threshold comes from
//! `MSGLOG_INTERNAL_LEVEL` (default `WARN`).

use crate::detail::Detail;
use crate::level::Level;
use crate::logger::Logger;
use crate::message::IdFormatter;
use crate::output::WriterOutput;
use std::sync::OnceLock;

pub const CONFIG_LOADED: i64 = 1001;
pub const CONFIG_NOT_FOUND: i64 = 1002;
pub const DIRECTORY_CREATED: i64 = 1003;
pub const LOGGER_CONFIGURED: i64 = 1004;
pub const OUTPUT_WRITE_FAILED: i64 = 3001;
pub const OUTPUT_FLUSH_FAILED: i64 = 3002;

const ENV_LEVEL: &str = "MSGLOG_INTERNAL_LEVEL";

static INTERNAL_LOGGER: OnceLock<Option<Logger>> = OnceLock::new();

fn build_internal_logger() -> Option<Logger> {
    let level = std::env::var(ENV_LEVEL)
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Level::Warn);

    Logger::builder()
        .level(level)
        .id_formatter(IdFormatter::template("msglog-0001%04d"))
        .messages([
            (CONFIG_LOADED, "Loaded configuration from %s"),
            (CONFIG_NOT_FOUND, "No configuration file at %s, using defaults"),
            (DIRECTORY_CREATED, "Created directory %s"),
            (LOGGER_CONFIGURED, "Logger configured: level=%s, target=%s, outputs=%d"),
            (OUTPUT_WRITE_FAILED, "Output write failed"),
            (OUTPUT_FLUSH_FAILED, "Flushing outputs before exit failed"),
        ])
        .output(WriterOutput::stderr())
        .build()
        .ok()
}

/// Pre-init and failing writes silently vanish: the internal logger has
/// nowhere left to report its own problems.
pub fn log(message_number: i64, details: &[Detail]) {
    if let Some(logger) = INTERNAL_LOGGER.get_or_init(build_internal_logger) {
        let _ = logger.try_log(message_number, details);
    }
}

/// Whether internal messages at `level` are written; skips building details otherwise.
pub fn enabled(level: Level) -> bool {
    INTERNAL_LOGGER
        .get_or_init(build_internal_logger)
        .as_ref()
        .is_some_and(|logger| logger.is_enabled(level))
}
