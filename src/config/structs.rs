//! Configuration struct definitions.
//!
//! Table keys are strings because TOML keys always are; message numbers are
//! parsed when a logger is built from the config.

use serde::Deserialize;
use std::collections::HashMap;

/// Settings that shape every record.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum level name.
    pub level: String,
    /// Level of messages not covered by `[levels]` or `[level_ranges]`.
    pub default_level: Option<String>,
    /// `"last-wins"` or `"first-wins"` for repeated level overrides.
    pub override_policy: String,
    /// Keep the standard 1000-wide level ranges underneath `[level_ranges]`.
    pub standard_ranges: bool,
    /// printf template for ids; ignored when `component_id` is set.
    pub id_template: Option<String>,
    /// Component id in `1..=9999`, rendered in front of the message number.
    pub component_id: Option<i64>,
    /// Text in front of the component id.
    pub id_prefix: String,
    /// Omit wall-clock date and time.
    pub hide_timestamp: bool,
    /// Extra stack frames to skip for `location`.
    pub caller_skip: usize,
    /// Record fields to write; all when absent.
    pub fields: Option<Vec<String>>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            default_level: None,
            override_policy: "last-wins".to_string(),
            standard_ranges: true,
            id_template: None,
            component_id: None,
            id_prefix: String::new(),
            hide_timestamp: false,
            caller_skip: 0,
            fields: None,
        }
    }
}

/// Where records are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// `"stderr"`, `"stdout"`, or a file path (appended to, `~` expanded).
    pub target: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            target: "stderr".to_string(),
        }
    }
}

/// Error-code prefixes and the ranking of the statuses they map to.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ErrorCodesConfig {
    /// Replace the built-in code table instead of extending it.
    pub replace: bool,
    pub codes: HashMap<String, String>,
    /// Most severe first.
    pub precedence: Option<Vec<String>>,
}
