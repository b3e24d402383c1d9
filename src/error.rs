//! Unified error type for all msglog operations.

use std::fmt;
use std::path::PathBuf;

/// Error type for msglog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from an output or a config file.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// No platform config directory could be determined.
    ConfigDirNotFound,
    /// A config file includes itself through `source` lines.
    CyclicInclude(PathBuf),
    /// Level name outside `TRACE`..`PANIC`.
    InvalidLevel(String),
    /// Component identifiers must lie in `1..=9999`.
    ComponentIdOutOfRange(i64),
    /// A config table key that is not an integer message number.
    InvalidMessageNumber(String),
    /// A field name that is not part of the record layout.
    UnknownField(String),
    /// A config setting with a value outside its accepted set.
    InvalidValue { key: &'static str, value: String },
    /// Serialization error.
    Format(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::CyclicInclude(p) => write!(f, "cyclic include: {}", p.display()),
            Self::InvalidLevel(name) => write!(f, "unknown log level: '{name}'"),
            Self::ComponentIdOutOfRange(id) => {
                write!(f, "component id {id} is outside the range 1..=9999")
            }
            Self::InvalidMessageNumber(key) => write!(f, "invalid message number: '{key}'"),
            Self::UnknownField(name) => write!(f, "unknown message field: '{name}'"),
            Self::InvalidValue { key, value } => write!(f, "invalid value for {key}: '{value}'"),
            Self::Format(s) => write!(f, "format error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(format!("JSON serialization failed: {e}"))
    }
}

impl From<crate::level::ParseLevelError> for Error {
    fn from(e: crate::level::ParseLevelError) -> Self {
        Self::InvalidLevel(e.name().to_string())
    }
}

/// A stage could not find any applicable entry. Carries the value the caller
/// may fall back to; ignoring the error and using `fallback` is always valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved<T> {
    pub message_number: i64,
    pub fallback: T,
}

impl<T> Unresolved<T> {
    /// Discards the error, keeping the best-effort value.
    pub fn into_fallback(self) -> T {
        self.fallback
    }
}

impl<T> fmt::Display for Unresolved<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no range found for message number {}", self.message_number)
    }
}

impl<T: fmt::Debug> std::error::Error for Unresolved<T> {}
