//! The logger: gate, pipeline, and outputs behind one `Send + Sync` handle.
//!
//! Everything except the level is fixed at build time. The level lives in an
//! atomic [`gate::Gate`], so `set_level` may race with logging calls freely.

mod builder;
mod from_config;
mod gate;

pub use builder::LoggerBuilder;

use crate::detail::{Classified, Detail};
use crate::error::Unresolved;
use crate::internal;
use crate::level::Level;
use crate::message::{Composer, MessageRecord};
use crate::output::Output;
use gate::Gate;
use std::fmt;
use std::panic::Location;

pub struct Logger {
    composer: Composer,
    gate: Gate,
    outputs: Vec<Box<dyn Output>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("composer", &self.composer)
            .field("outputs", &self.outputs.len())
            .finish()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Logs one message. Write failures are reported on the internal diagnostic
    /// channel (stderr) and otherwise dropped; use [`Self::try_log`] to handle them.
    ///
    /// A resolved level of `Fatal` exits the process after the record is
    /// written; `Panic` panics the calling thread.
    #[track_caller]
    pub fn log(&self, message_number: i64, details: &[Detail]) {
        if let Err(e) = self.dispatch(message_number, details, Location::caller()) {
            internal::log(internal::OUTPUT_WRITE_FAILED, &[Detail::from(e)]);
        }
    }

    /// Like [`Self::log`], but returns write failures. `Ok(false)` means the
    /// resolved level was below the configured one and nothing was written.
    ///
    /// # Errors
    /// The first output error.
    #[track_caller]
    pub fn try_log(&self, message_number: i64, details: &[Detail]) -> Result<bool, crate::Error> {
        self.dispatch(message_number, details, Location::caller())
    }

    fn dispatch(
        &self,
        message_number: i64,
        details: &[Detail],
        caller: &Location<'_>,
    ) -> Result<bool, crate::Error> {
        let classified = Classified::new(details);
        let level = self
            .composer
            .resolve_level(message_number, &classified)
            .unwrap_or_else(Unresolved::into_fallback);

        if !self.gate.allows(level) {
            return Ok(false);
        }

        let record = self
            .composer
            .compose(message_number, level, &classified, caller);
        let written = self.write(&record);

        match level {
            Level::Fatal => self.exit(),
            Level::Panic => panic!("{}", panic_message(message_number, &record)),
            _ => {}
        }

        written.map(|()| true)
    }

    fn write(&self, record: &MessageRecord) -> Result<(), crate::Error> {
        let mut first_error = None;
        for output in &self.outputs {
            if let Err(e) = output.write(record) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn exit(&self) -> ! {
        if let Err(e) = self.flush() {
            internal::log(internal::OUTPUT_FLUSH_FAILED, &[Detail::from(e)]);
        }
        std::process::exit(1)
    }

    /// The record as JSON, regardless of the configured level and without
    /// writing it or triggering Fatal/Panic behavior.
    ///
    /// # Errors
    /// Serialization failures.
    #[track_caller]
    pub fn message(&self, message_number: i64, details: &[Detail]) -> Result<String, crate::Error> {
        let (_, record) = self.compose_at(message_number, details, Location::caller());
        record.to_json()
    }

    /// The record that [`Self::message`] would serialize.
    #[must_use]
    #[track_caller]
    pub fn record(&self, message_number: i64, details: &[Detail]) -> MessageRecord {
        self.compose_at(message_number, details, Location::caller()).1
    }

    /// The rendered message wrapped as an error value.
    #[must_use]
    #[track_caller]
    pub fn new_error(&self, message_number: i64, details: &[Detail]) -> MessageError {
        let (level, record) = self.compose_at(message_number, details, Location::caller());
        MessageError {
            message_number,
            level,
            message: record.to_json().unwrap_or_else(|e| e.to_string()),
        }
    }

    fn compose_at(
        &self,
        message_number: i64,
        details: &[Detail],
        caller: &Location<'_>,
    ) -> (Level, MessageRecord) {
        let classified = Classified::new(details);
        let level = self
            .composer
            .resolve_level(message_number, &classified)
            .unwrap_or_else(Unresolved::into_fallback);
        let record = self
            .composer
            .compose(message_number, level, &classified, caller);
        (level, record)
    }

    /// Level the pipeline assigns to a message, with the resolution error when nothing applied.
    ///
    /// # Errors
    /// [`Unresolved`] carrying the level `log` would fall back to.
    pub fn resolve_level(
        &self,
        message_number: i64,
        details: &[Detail],
    ) -> Result<Level, Unresolved<Level>> {
        self.composer
            .resolve_level(message_number, &Classified::new(details))
    }

    pub fn set_level(&self, level: Level) {
        self.gate.set(level);
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.gate.level()
    }

    /// Unknown names set the level to `Panic`, silencing everything below it,
    /// and return an error.
    ///
    /// # Errors
    /// [`crate::Error::InvalidLevel`] for names outside `TRACE`..`PANIC`.
    pub fn set_level_from_str(&self, name: &str) -> Result<(), crate::Error> {
        match name.parse::<Level>() {
            Ok(level) => {
                self.set_level(level);
                Ok(())
            }
            Err(e) => {
                self.set_level(Level::Panic);
                Err(e.into())
            }
        }
    }

    #[must_use]
    pub fn level_as_str(&self) -> &'static str {
        self.level().as_str()
    }

    /// Whether a record at `level` would be written.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.gate.allows(level)
    }

    #[must_use]
    pub fn is_trace(&self) -> bool {
        self.gate.allows(Level::Trace)
    }

    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.gate.allows(Level::Debug)
    }

    #[must_use]
    pub fn is_info(&self) -> bool {
        self.gate.allows(Level::Info)
    }

    #[must_use]
    pub fn is_warn(&self) -> bool {
        self.gate.allows(Level::Warn)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.gate.allows(Level::Error)
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.gate.allows(Level::Fatal)
    }

    #[must_use]
    pub fn is_panic(&self) -> bool {
        self.gate.allows(Level::Panic)
    }

    /// Buffered outputs may lose tail data on abrupt exit without an explicit flush.
    ///
    /// # Errors
    /// The first I/O error encountered across all outputs.
    pub fn flush(&self) -> Result<(), crate::Error> {
        for output in &self.outputs {
            output.flush()?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn composer(&self) -> &Composer {
        &self.composer
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }
}

fn panic_message(message_number: i64, record: &MessageRecord) -> String {
    match &record.text {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(json) => json.to_string(),
        None => format!("message {message_number}"),
    }
}

/// A rendered message as an error. `Display` is the JSON record, so passing
/// it back into a log call nests the whole record in `errors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageError {
    message_number: i64,
    level: Level,
    message: String,
}

impl MessageError {
    #[must_use]
    pub const fn message_number(&self) -> i64 {
        self.message_number
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for MessageError {}
