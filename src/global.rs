//! Opt-in process-wide logger for code that cannot thread a `&Logger` through.
//!
//! Nothing is created until first use. `init` installs a logger once;
//! `logger` returns the installed one, or lazily builds a default
//! (Info, standard ranges, stderr) if `init` was never called. Both are safe to
//! call from any thread; the first initialization wins.

use crate::detail::Detail;
use crate::logger::Logger;
use crate::output::WriterOutput;
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs `logger` as the process-wide logger.
///
/// # Errors
/// Returns `logger` back when a global logger already exists.
pub fn init(logger: Logger) -> Result<(), Logger> {
    GLOBAL_LOGGER.set(logger)
}

/// The process-wide logger.
pub fn logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(|| {
        Logger::builder()
            .output(WriterOutput::stderr())
            .build()
            .unwrap_or_else(|_| unreachable!("default builder options are valid"))
    })
}

/// Logs through the process-wide logger.
#[track_caller]
pub fn log(message_number: i64, details: &[Detail]) {
    logger().log(message_number, details);
}
