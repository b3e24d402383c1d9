//! Identifier stage: renders the `id` field from the message number.

use super::printf;
use crate::detail::Value;

/// Highest component id that still fits the four-digit component slot.
pub const MAX_COMPONENT_ID: i64 = 9999;

#[derive(Debug, Clone, Default)]
pub enum IdFormatter {
    /// No `id` field.
    Null,
    /// The message number in decimal.
    #[default]
    Plain,
    /// printf template with one integer conversion, e.g. `"APP-%04d"`.
    Template(String),
}

impl IdFormatter {
    #[must_use]
    pub fn template(template: impl Into<String>) -> Self {
        Self::Template(template.into())
    }

    /// `"{prefix}{component_id:04}%04d"`: component 42 with prefix `"app-"` formats 7 as `app-00420007`.
    ///
    /// # Errors
    /// [`crate::Error::ComponentIdOutOfRange`] unless `1 <= component_id <= 9999`.
    pub fn component(prefix: &str, component_id: i64) -> Result<Self, crate::Error> {
        if !(1..=MAX_COMPONENT_ID).contains(&component_id) {
            return Err(crate::Error::ComponentIdOutOfRange(component_id));
        }
        let prefix = prefix.replace('%', "%%");
        Ok(Self::Template(format!("{prefix}{component_id:04}%04d")))
    }

    #[must_use]
    pub fn format(&self, message_number: i64) -> String {
        match self {
            Self::Null => String::new(),
            Self::Plain => message_number.to_string(),
            Self::Template(template) => printf::sprintf(template, &[&Value::Int(message_number)]),
        }
    }
}
