//! Text stage: the human-readable sentence, from a per-message template filled with the ordinary details.

use super::printf;
use crate::detail::{Classified, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub enum TextFormatter {
    /// No text unless a text override is given.
    #[default]
    Null,
    /// The same template for every message number.
    Static(String),
    /// One template per message number; exact match only.
    Templated(HashMap<i64, String>),
}

impl TextFormatter {
    /// A text override wins; a message-number override redirects the template lookup.
    #[must_use]
    pub fn format(&self, message_number: i64, details: &Classified<'_>) -> Option<String> {
        if let Some(text) = details.text() {
            return Some(text.to_string());
        }

        let template = match self {
            Self::Null => return None,
            Self::Static(template) => template,
            Self::Templated(templates) => {
                let number = details.message_number().unwrap_or(message_number);
                templates.get(&number)?
            }
        };

        let args: Vec<&Value> = details.values().map(|(_, v)| v).collect();
        Some(printf::sprintf(template, &args))
    }
}
