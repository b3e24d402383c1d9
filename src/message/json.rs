//! Embedding JSON text as JSON, so a detail like `{"a": 1}` is not written out as an escaped string.

use serde_json::Value as JsonValue;

/// Parses `text` when it holds a JSON object or array.
///
/// A double-encoded document (`"{\"a\":1}"`, a JSON string whose content is
/// JSON) is unquoted first. Scalars do not count: `"42"` or `"true"` stay text.
#[must_use]
pub fn parse_embedded(text: &str) -> Option<JsonValue> {
    let trimmed = text.trim();
    let unquoted = if trimmed.starts_with('"') {
        serde_json::from_str::<String>(trimmed).ok()
    } else {
        None
    };
    let candidate = unquoted.as_deref().map_or(trimmed, str::trim);

    if !(candidate.starts_with('{') || candidate.starts_with('[')) {
        return None;
    }
    serde_json::from_str::<JsonValue>(candidate)
        .ok()
        .filter(|v| v.is_object() || v.is_array())
}

/// `text` as embedded JSON when possible, otherwise as a JSON string.
#[must_use]
pub fn embed_or_string(text: &str) -> JsonValue {
    parse_embedded(text).unwrap_or_else(|| JsonValue::String(text.to_string()))
}

/// Whether `text` would be embedded by [`parse_embedded`].
#[must_use]
pub fn is_json(text: &str) -> bool {
    parse_embedded(text).is_some()
}
