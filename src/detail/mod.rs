//! The values a caller hands to `Logger::log`.
//!
//! A detail is either an [`Override`], which replaces what one pipeline stage would
//! compute for this call, or an ordinary [`Value`] that is rendered into the text
//! and the `details`/`errors` payload. The two are told apart by variant only,
//! never by position in the list.

mod classify;

pub use classify::Classified;

use crate::level::Level;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// One argument of a log call.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Override(Override),
    Value(Value),
}

/// Per-call replacements for a stage's computed result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    Level(Level),
    Status(String),
    Code(String),
    Reason(String),
    Location(String),
    /// Replaces the templated text.
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Nanoseconds.
    Duration(i64),
    /// Extra stack frames to skip when computing `location`.
    CallerSkip(usize),
    /// Selects the text template of another message number.
    MessageNumber(i64),
}

/// Ordinary detail values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Message of an error; routed to `errors`, never to `details`.
    Error(String),
    /// Entries are merged into `details` under their own keys.
    Map(BTreeMap<String, String>),
    /// Display or debug rendering of any other value.
    Other(String),
}

impl Detail {
    /// Records an error's message so it lands in the `errors` array.
    #[must_use]
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::Value(Value::Error(err.to_string()))
    }

    /// Any `Display` value, rendered eagerly.
    #[must_use]
    pub fn display(value: impl fmt::Display) -> Self {
        Self::Value(Value::Other(value.to_string()))
    }

    /// Any `Debug` value, rendered eagerly.
    #[must_use]
    pub fn debug(value: impl fmt::Debug) -> Self {
        Self::Value(Value::Other(format!("{value:?}")))
    }

    /// A serde-serializable value, embedded into `details` as JSON.
    ///
    /// # Errors
    /// Serialization failures of `value`.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, crate::Error> {
        Ok(Self::Value(Value::Other(serde_json::to_string(value)?)))
    }

    #[must_use]
    pub fn status(status: impl Into<String>) -> Self {
        Self::Override(Override::Status(status.into()))
    }

    #[must_use]
    pub fn code(code: impl Into<String>) -> Self {
        Self::Override(Override::Code(code.into()))
    }

    #[must_use]
    pub fn reason(reason: impl Into<String>) -> Self {
        Self::Override(Override::Reason(reason.into()))
    }

    #[must_use]
    pub fn location(location: impl Into<String>) -> Self {
        Self::Override(Override::Location(location.into()))
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Override(Override::Text(text.into()))
    }

    #[must_use]
    pub const fn timestamp(at: DateTime<Utc>) -> Self {
        Self::Override(Override::Timestamp(at))
    }

    #[must_use]
    pub const fn duration_nanos(nanos: i64) -> Self {
        Self::Override(Override::Duration(nanos))
    }

    #[must_use]
    pub const fn caller_skip(frames: usize) -> Self {
        Self::Override(Override::CallerSkip(frames))
    }

    #[must_use]
    pub const fn message_number(number: i64) -> Self {
        Self::Override(Override::MessageNumber(number))
    }

    #[must_use]
    pub const fn is_override(&self) -> bool {
        matches!(self, Self::Override(_))
    }
}

impl From<Override> for Detail {
    fn from(o: Override) -> Self {
        Self::Override(o)
    }
}

impl From<Value> for Detail {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<Level> for Detail {
    fn from(level: Level) -> Self {
        Self::Override(Override::Level(level))
    }
}

impl From<DateTime<Utc>> for Detail {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Override(Override::Timestamp(at))
    }
}

impl From<std::time::Duration> for Detail {
    fn from(d: std::time::Duration) -> Self {
        Self::Override(Override::Duration(
            i64::try_from(d.as_nanos()).unwrap_or(i64::MAX),
        ))
    }
}

impl From<&str> for Detail {
    fn from(s: &str) -> Self {
        Self::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Detail {
    fn from(s: String) -> Self {
        Self::Value(Value::String(s))
    }
}

impl From<&String> for Detail {
    fn from(s: &String) -> Self {
        Self::Value(Value::String(s.clone()))
    }
}

impl From<bool> for Detail {
    fn from(b: bool) -> Self {
        Self::Value(Value::Bool(b))
    }
}

impl From<f64> for Detail {
    fn from(f: f64) -> Self {
        Self::Value(Value::Float(f))
    }
}

impl From<f32> for Detail {
    fn from(f: f32) -> Self {
        Self::Value(Value::Float(f64::from(f)))
    }
}

macro_rules! int_detail {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Detail {
                fn from(n: $t) -> Self {
                    Self::Value(Value::Int(i64::from(n)))
                }
            }
        )*
    };
}

int_detail!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Detail {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or_else(
            |_| Self::Value(Value::Other(n.to_string())),
            |n| Self::Value(Value::Int(n)),
        )
    }
}

impl From<usize> for Detail {
    fn from(n: usize) -> Self {
        Self::from(n as u64)
    }
}

impl<T: Into<Detail>> From<Option<T>> for Detail {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Value(Value::Nil), Into::into)
    }
}

impl From<BTreeMap<String, String>> for Detail {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::Value(Value::Map(map))
    }
}

impl<S: std::hash::BuildHasher> From<std::collections::HashMap<String, String, S>> for Detail {
    fn from(map: std::collections::HashMap<String, String, S>) -> Self {
        Self::Value(Value::Map(map.into_iter().collect()))
    }
}

impl From<crate::logger::MessageError> for Detail {
    fn from(err: crate::logger::MessageError) -> Self {
        Self::Value(Value::Error(err.to_string()))
    }
}

impl From<crate::Error> for Detail {
    fn from(err: crate::Error) -> Self {
        Self::Value(Value::Error(err.to_string()))
    }
}

impl From<std::io::Error> for Detail {
    fn from(err: std::io::Error) -> Self {
        Self::Value(Value::Error(err.to_string()))
    }
}

/// Builds a `[Detail; N]` from heterogeneous expressions via `Into<Detail>`.
///
/// ```
/// use msglog::{details, Level};
///
/// let d = details!["Bob", 42, Level::Warn];
/// assert_eq!(d.len(), 3);
/// ```
#[macro_export]
macro_rules! details {
    () => {{
        let empty: [$crate::Detail; 0] = [];
        empty
    }};
    ($($detail:expr),+ $(,)?) => {
        [$($crate::Detail::from($detail)),+]
    };
}
