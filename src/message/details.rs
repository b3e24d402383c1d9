//! Details stage: the keyed `details` object and the separate `errors` array.

use super::json::{embed_or_string, parse_embedded};
use super::printf;
use crate::detail::{Classified, Value};
use serde_json::{Map, Value as JsonValue, json};

/// Both payloads of one call; `None` when there is nothing to write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregated {
    pub details: Option<Map<String, JsonValue>>,
    pub errors: Option<Vec<JsonValue>>,
}

/// Positional values are keyed `"1"`, `"2"`, ... by their place among the
/// ordinary details. Map entries are merged after all positional values, so a
/// map key that collides with a positional key replaces it.
#[must_use]
pub fn aggregate(details: &Classified<'_>) -> Aggregated {
    let mut out = Map::new();
    let mut errors = Vec::new();
    let mut merged = Vec::new();

    for (position, value) in details.values() {
        let rendered = match value {
            Value::Nil => JsonValue::String("<nil>".to_string()),
            Value::String(s) | Value::Other(s) => embed_or_string(s),
            Value::Int(n) => JsonValue::from(*n),
            // JSON has no NaN or infinity; serde_json would write null.
            Value::Float(f) => printf::non_finite(*f)
                .map_or_else(|| JsonValue::from(*f), |text| JsonValue::String(text.to_string())),
            Value::Bool(b) => JsonValue::String(b.to_string()),
            Value::Error(message) => {
                errors.push(error_entry(message));
                continue;
            }
            Value::Map(map) => {
                merged.push(map);
                continue;
            }
        };
        out.insert(position.to_string(), rendered);
    }

    for map in merged {
        for (key, value) in map {
            out.insert(key.clone(), embed_or_string(value));
        }
    }

    Aggregated {
        details: (!out.is_empty()).then_some(out),
        errors: (!errors.is_empty()).then_some(errors),
    }
}

/// JSON error messages (such as a rendered `MessageError`) are nested as-is.
#[must_use]
pub fn error_entry(message: &str) -> JsonValue {
    parse_embedded(message).unwrap_or_else(|| json!({ "text": message }))
}
