//! `msglog` - message-number driven structured JSON logging.
//!
//! Callers log a message number plus details; the logger derives the level,
//! id, text, status, and a structured details/errors payload from tables keyed
//! by that number, and writes one JSON object per call:
//! - Levels by exact number, by number range (`2000..` is Info), or per call
//! - printf-style text templates filled from the details
//! - Status derived from embedded error codes
//! - Guards (`is_debug()` ...) to skip building expensive details
//! - Builder and TOML configuration
//!
//! # Example
//!
//! ```
//! use msglog::{details, Logger, MemoryOutput};
//!
//! let output = MemoryOutput::new();
//! let logger = Logger::builder()
//!     .messages([(2001, "%s works with %s")])
//!     .hide_timestamp(true)
//!     .without_field(msglog::Field::Location)
//!     .output(output.clone())
//!     .build()?;
//!
//! logger.log(2001, &details!["Bob", "Jane"]);
//! assert_eq!(
//!     output.lines()[0],
//!     r#"{"level":"INFO","id":"2001","text":"Bob works with Jane","details":{"1":"Bob","2":"Jane"}}"#
//! );
//!
//! if logger.is_debug() {
//!     logger.log(1001, &details![format!("{:?}", std::env::args())]);
//! }
//! # Ok::<(), msglog::Error>(())
//! ```

pub mod config;
pub mod detail;
mod error;
pub mod global;
pub mod internal;
pub mod level;
pub mod logger;
pub mod message;
pub mod output;

pub use config::Config;
pub use detail::{Classified, Detail, Override, Value};
pub use error::{Error, Unresolved};
pub use level::{Level, ParseLevelError};
pub use logger::{Logger, LoggerBuilder, MessageError};
pub use message::{
    ErrorCodes, Field, Fields, IdFormatter, LevelResolver, LevelTable, MessageRecord,
    OverridePolicy, RangeMap, StatusResolver, StatusTable, TextFormatter,
};
pub use output::{MemoryOutput, Output, WriterOutput};
