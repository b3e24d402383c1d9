//! Status stage: a short outcome label that is independent of severity.

use super::RangeMap;
use crate::detail::Classified;
use std::collections::HashMap;

/// Maps the code prefix of error messages (`"0033E|Timeout"`) to statuses, and
/// ranks statuses so that the most severe one wins when several errors match.
#[derive(Debug, Clone)]
pub struct ErrorCodes {
    codes: HashMap<String, String>,
    precedence: Vec<String>,
}

impl Default for ErrorCodes {
    fn default() -> Self {
        let codes = [
            ("0002E", "info"),
            ("0007E", "warning"),
            ("0019E", "retryable"),
            ("0023E", "error"),
            ("0024E", "error"),
            ("0033E", "retryable"),
            ("0048E", "fatal"),
            ("0054E", "error"),
            ("0063E", "debug"),
            ("0087E", "trace"),
        ]
        .into_iter()
        .map(|(code, status)| (code.to_string(), status.to_string()))
        .collect();

        Self {
            codes,
            precedence: Self::default_precedence(),
        }
    }
}

impl ErrorCodes {
    /// Most severe first.
    #[must_use]
    pub fn default_precedence() -> Vec<String> {
        ["fatal", "error", "retryable", "info", "warning", "debug", "trace"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// An empty table with the default precedence.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
            precedence: Self::default_precedence(),
        }
    }

    #[must_use]
    pub fn code(mut self, code: impl Into<String>, status: impl Into<String>) -> Self {
        self.codes.insert(code.into(), status.into());
        self
    }

    /// Replaces the ranking. Statuses missing from the list rank below all listed ones.
    #[must_use]
    pub fn precedence<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.precedence = order.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn status_for(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    fn rank(&self, status: &str) -> usize {
        self.precedence
            .iter()
            .position(|s| s == status)
            .unwrap_or(self.precedence.len())
    }

    /// Highest-ranked status among all error messages whose code is known.
    pub fn derive<'e>(&self, messages: impl Iterator<Item = &'e str>) -> Option<String> {
        messages
            .filter_map(|message| {
                let code = message.split('|').next().unwrap_or_default().trim();
                self.status_for(code)
            })
            .min_by_key(|status| self.rank(status))
            .map(String::from)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusTable {
    pub exact: HashMap<i64, String>,
    pub ranges: RangeMap<String>,
    pub error_codes: ErrorCodes,
}

#[derive(Debug, Clone)]
pub enum StatusResolver {
    Null,
    Static(String),
    Table(StatusTable),
}

impl Default for StatusResolver {
    fn default() -> Self {
        Self::Table(StatusTable::default())
    }
}

impl StatusResolver {
    /// `None` means unknown; it is not an error.
    #[must_use]
    pub fn resolve(&self, message_number: i64, details: &Classified<'_>) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Static(status) => Some(
                details
                    .status()
                    .map_or_else(|| status.clone(), String::from),
            ),
            Self::Table(table) => details
                .status()
                .map(String::from)
                .or_else(|| table.exact.get(&message_number).cloned())
                .or_else(|| table.ranges.get(message_number).cloned())
                .or_else(|| table.error_codes.derive(details.errors())),
        }
    }
}
