//! Splits a detail list into overrides and ordinary values in a single pass.

use super::{Detail, Override, Value};
use crate::level::Level;
use chrono::{DateTime, Utc};

/// Borrowed view over one call's details, split by kind.
///
/// Overrides keep their input order so a stage can choose first-wins or
/// last-wins; ordinary values keep their 1-based position among ordinary values.
#[derive(Debug, Default)]
pub struct Classified<'a> {
    overrides: Vec<&'a Override>,
    values: Vec<(usize, &'a Value)>,
}

impl<'a> Classified<'a> {
    #[must_use]
    pub fn new(details: &'a [Detail]) -> Self {
        let mut classified = Self::default();
        for detail in details {
            match detail {
                Detail::Override(o) => classified.overrides.push(o),
                Detail::Value(v) => {
                    let position = classified.values.len() + 1;
                    classified.values.push((position, v));
                }
            }
        }
        classified
    }

    /// Ordinary values with their 1-based positions, in input order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = (usize, &'a Value)> + '_ {
        self.values.iter().copied()
    }

    /// Overrides in input order.
    pub fn overrides(&self) -> impl DoubleEndedIterator<Item = &'a Override> + '_ {
        self.overrides.iter().copied()
    }

    #[must_use]
    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }

    /// Last override of a kind, the default resolution for repeated overrides.
    fn last<T>(&self, pick: impl Fn(&'a Override) -> Option<T>) -> Option<T> {
        self.overrides().rev().find_map(pick)
    }

    #[must_use]
    pub fn level(&self) -> Option<Level> {
        self.last(|o| match o {
            Override::Level(level) => Some(*level),
            _ => None,
        })
    }

    /// Strict flavour: the first level override in input order.
    #[must_use]
    pub fn first_level(&self) -> Option<Level> {
        self.overrides().find_map(|o| match o {
            Override::Level(level) => Some(*level),
            _ => None,
        })
    }

    #[must_use]
    pub fn status(&self) -> Option<&'a str> {
        self.last(|o| match o {
            Override::Status(s) => Some(s.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn code(&self) -> Option<&'a str> {
        self.last(|o| match o {
            Override::Code(s) => Some(s.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn reason(&self) -> Option<&'a str> {
        self.last(|o| match o {
            Override::Reason(s) => Some(s.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn location(&self) -> Option<&'a str> {
        self.last(|o| match o {
            Override::Location(s) => Some(s.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn text(&self) -> Option<&'a str> {
        self.last(|o| match o {
            Override::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.last(|o| match o {
            Override::Timestamp(at) => Some(*at),
            _ => None,
        })
    }

    #[must_use]
    pub fn duration(&self) -> Option<i64> {
        self.last(|o| match o {
            Override::Duration(nanos) => Some(*nanos),
            _ => None,
        })
    }

    #[must_use]
    pub fn caller_skip(&self) -> Option<usize> {
        self.last(|o| match o {
            Override::CallerSkip(frames) => Some(*frames),
            _ => None,
        })
    }

    #[must_use]
    pub fn message_number(&self) -> Option<i64> {
        self.last(|o| match o {
            Override::MessageNumber(n) => Some(*n),
            _ => None,
        })
    }

    /// Messages of all `Value::Error` details, in input order.
    pub fn errors(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.values().filter_map(|(_, v)| match v {
            Value::Error(message) => Some(message.as_str()),
            _ => None,
        })
    }
}
