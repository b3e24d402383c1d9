//! The composition pipeline: one stage per record field, each a small enum of
//! interchangeable strategies, combined by [`Composer`] into a [`MessageRecord`].

mod details;
mod id;
pub mod json;
mod level;
pub mod location;
pub mod printf;
mod range;
mod status;
mod text;

pub use details::{Aggregated, aggregate, error_entry};
pub use id::{IdFormatter, MAX_COMPONENT_ID};
pub use level::{LevelResolver, LevelTable, OverridePolicy};
pub use range::RangeMap;
pub use status::{ErrorCodes, StatusResolver, StatusTable};
pub use text::TextFormatter;

use crate::detail::Classified;
use crate::error::Unresolved;
use crate::level::Level;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::panic::Location;
use std::str::FromStr;

/// One log line. Field order here is the serialized order and must not change:
/// downstream parsers rely on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// A string, or embedded JSON when the text is a JSON object or array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Nanoseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<JsonValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, JsonValue>>,
}

impl MessageRecord {
    /// Single-line JSON.
    ///
    /// # Errors
    /// [`crate::Error::Format`] if serialization fails.
    pub fn to_json(&self) -> Result<String, crate::Error> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Record fields that can be switched off. A disabled field's stage is not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Time,
    Level,
    Id,
    Status,
    Text,
    Code,
    Reason,
    Duration,
    Location,
    Errors,
    Details,
}

impl Field {
    #[must_use]
    pub const fn all() -> [Self; 12] {
        [
            Self::Date,
            Self::Time,
            Self::Level,
            Self::Id,
            Self::Status,
            Self::Text,
            Self::Code,
            Self::Reason,
            Self::Duration,
            Self::Location,
            Self::Errors,
            Self::Details,
        ]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Level => "level",
            Self::Id => "id",
            Self::Status => "status",
            Self::Text => "text",
            Self::Code => "code",
            Self::Reason => "reason",
            Self::Duration => "duration",
            Self::Location => "location",
            Self::Errors => "errors",
            Self::Details => "details",
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| crate::Error::UnknownField(s.to_string()))
    }
}

/// Bit set of enabled [`Field`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields(u16);

impl Default for Fields {
    fn default() -> Self {
        Self::all()
    }
}

impl Fields {
    #[must_use]
    pub fn all() -> Self {
        Field::all().into_iter().collect()
    }

    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn contains(self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    #[must_use]
    pub const fn with(self, field: Field) -> Self {
        Self(self.0 | field.bit())
    }

    #[must_use]
    pub const fn without(self, field: Field) -> Self {
        Self(self.0 & !field.bit())
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

/// All stages of the pipeline plus the settings that shape the record.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    pub level: LevelResolver,
    pub status: StatusResolver,
    pub id: IdFormatter,
    pub text: TextFormatter,
    pub fields: Fields,
    /// Omits wall-clock `date`/`time`; an explicit timestamp override is still written.
    pub hide_timestamp: bool,
    /// Frames skipped for `location` on every call, added to any per-call skip.
    pub caller_skip: usize,
}

impl Composer {
    /// Resolved level for one call.
    ///
    /// # Errors
    /// [`Unresolved`] when the level stage finds nothing; the fallback is usable as is.
    pub fn resolve_level(
        &self,
        message_number: i64,
        details: &Classified<'_>,
    ) -> Result<Level, Unresolved<Level>> {
        self.level.resolve(message_number, details)
    }

    /// Runs every enabled stage for an already resolved level.
    #[must_use]
    pub fn compose(
        &self,
        message_number: i64,
        level: Level,
        details: &Classified<'_>,
        caller: &Location<'_>,
    ) -> MessageRecord {
        let on = |field| self.fields.contains(field);
        let mut record = MessageRecord::default();

        let timestamp = details
            .timestamp()
            .or_else(|| (!self.hide_timestamp).then(Utc::now));
        if let Some(at) = timestamp {
            record.date = on(Field::Date).then(|| format_date(&at));
            record.time = on(Field::Time).then(|| format_time(&at));
        }

        if on(Field::Level) {
            record.level = Some(level.as_str().to_string());
        }
        if on(Field::Id) {
            record.id = non_empty(self.id.format(message_number));
        }
        if on(Field::Status) {
            record.status = self
                .status
                .resolve(message_number, details)
                .and_then(non_empty);
        }
        if on(Field::Text) {
            record.text = self
                .text
                .format(message_number, details)
                .and_then(non_empty)
                .map(|text| json::embed_or_string(&text));
        }
        if on(Field::Code) {
            record.code = details.code().map(String::from);
        }
        if on(Field::Reason) {
            record.reason = details.reason().map(String::from);
        }
        if on(Field::Duration) {
            record.duration = details.duration();
        }
        if on(Field::Location) {
            record.location = Some(details.location().map_or_else(
                || {
                    let skip = self
                        .caller_skip
                        .saturating_add(details.caller_skip().unwrap_or(0));
                    location::locate(caller, skip)
                },
                String::from,
            ));
        }
        if on(Field::Errors) || on(Field::Details) {
            let aggregated = aggregate(details);
            if on(Field::Errors) {
                record.errors = aggregated.errors;
            }
            if on(Field::Details) {
                record.details = aggregated.details;
            }
        }

        record
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn format_time(at: &DateTime<Utc>) -> String {
    at.format("%H:%M:%S%.9f").to_string()
}
