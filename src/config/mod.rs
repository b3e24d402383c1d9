//! TOML configuration loading and `source = "..."` include resolution.
//!
//! Separated from struct definitions so that the loading logic (file I/O, cycle
//! detection, merge strategy) stays independent of the serde schema.
//!
//! ```toml
//! source = "~/.config/msglog/catalog.toml"
//!
//! [general]
//! level = "DEBUG"
//! component_id = 42
//! id_prefix = "app-"
//!
//! [output]
//! target = "~/.local/state/app/log.jsonl"
//!
//! [messages]
//! 2001 = "%s works with %s"
//!
//! [level_ranges]
//! 0 = "INFO"
//! ```

mod structs;

pub use structs::{ErrorCodesConfig, GeneralConfig, OutputConfig};

use crate::internal;
use crate::level::Level;
use crate::message::{Field, OverridePolicy, RangeMap};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

/// An empty file must still produce a working logger; `#[serde(default)]`
/// on every section makes zero-config work.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub output: OutputConfig,
    /// Text templates by message number.
    pub messages: HashMap<String, String>,
    /// Exact message number to level name.
    pub levels: HashMap<String, String>,
    /// Lower bound to level name.
    pub level_ranges: HashMap<String, String>,
    /// Exact message number to status.
    pub statuses: HashMap<String, String>,
    /// Lower bound to status.
    pub status_ranges: HashMap<String, String>,
    pub error_codes: ErrorCodesConfig,
}

/// Scans raw TOML for top-level `source = "..."` lines before deserialization,
/// since serde would reject the repeated key. Returns the paths and the
/// remaining TOML.
#[must_use]
pub fn extract_sources(content: &str) -> (Vec<String>, String) {
    let mut sources = Vec::new();
    let mut remaining = String::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(value) = trimmed
            .strip_prefix("source")
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('='))
        {
            let path = value.trim().trim_matches('"').trim_matches('\'');
            if !path.is_empty() {
                sources.push(path.to_string());
            }
            continue;
        }
        remaining.push_str(line);
        remaining.push('\n');
    }

    (sources, remaining)
}

impl Config {
    /// Loads `<config_dir>/msglog/config.toml`; a missing file yields defaults.
    ///
    /// # Errors
    /// Unreadable or unparsable files, cyclic includes, or no config directory.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// # Errors
    /// Unreadable or unparsable files and cyclic includes.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        Self::load_with_sources(path, &mut HashSet::new())
    }

    /// Parses TOML text. `source` lines are not followed.
    ///
    /// # Errors
    /// TOML syntax or type errors.
    pub fn from_toml(content: &str) -> Result<Self, crate::Error> {
        let (_, toml_content) = extract_sources(content);
        Ok(toml::from_str(&toml_content)?)
    }

    /// Recursive loader that expands `source = "..."` includes while tracking
    /// visited paths in `seen` to break include cycles.
    fn load_with_sources(path: &Path, seen: &mut HashSet<PathBuf>) -> Result<Self, crate::Error> {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        let path = Path::new(&expanded);

        if !path.exists() {
            internal::log(
                internal::CONFIG_NOT_FOUND,
                &[path.display().to_string().into()],
            );
            return Ok(Self::default());
        }

        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !seen.insert(canonical.clone()) {
            return Err(crate::Error::CyclicInclude(canonical));
        }

        let content = fs::read_to_string(path)?;
        let (sources, toml_content) = extract_sources(&content);
        let mut config: Self = toml::from_str(&toml_content)?;

        for source in sources {
            let source_path = resolve_relative(path, &source);
            let included = Self::load_with_sources(&source_path, seen)?;
            config.merge(included);
        }

        internal::log(
            internal::CONFIG_LOADED,
            &[path.display().to_string().into()],
        );
        Ok(config)
    }

    /// Tables from `other` fill in keys this config does not define; scalar
    /// settings of the including file always win.
    pub fn merge(&mut self, other: Self) {
        fn fill(into: &mut HashMap<String, String>, from: HashMap<String, String>) {
            for (key, value) in from {
                into.entry(key).or_insert(value);
            }
        }

        fill(&mut self.messages, other.messages);
        fill(&mut self.levels, other.levels);
        fill(&mut self.level_ranges, other.level_ranges);
        fill(&mut self.statuses, other.statuses);
        fill(&mut self.status_ranges, other.status_ranges);
        fill(&mut self.error_codes.codes, other.error_codes.codes);
    }

    /// `<config_dir>/msglog/config.toml` for the current platform.
    ///
    /// # Errors
    /// [`crate::Error::ConfigDirNotFound`] when no home directory is known.
    pub fn default_path() -> Result<PathBuf, crate::Error> {
        directories::ProjectDirs::from("", "", "msglog")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// # Errors
    /// [`crate::Error::InvalidLevel`] for an unknown name.
    pub fn parse_level(&self) -> Result<Level, crate::Error> {
        Ok(self.general.level.parse()?)
    }

    /// # Errors
    /// [`crate::Error::InvalidLevel`] for an unknown name.
    pub fn parse_default_level(&self) -> Result<Option<Level>, crate::Error> {
        self.general
            .default_level
            .as_deref()
            .map(str::parse::<Level>)
            .transpose()
            .map_err(crate::Error::from)
    }

    /// # Errors
    /// [`crate::Error::InvalidValue`] for anything but `last-wins`/`first-wins`.
    pub fn parse_override_policy(&self) -> Result<OverridePolicy, crate::Error> {
        match self.general.override_policy.trim().to_lowercase().as_str() {
            "last-wins" | "last" => Ok(OverridePolicy::LastWins),
            "first-wins" | "first" => Ok(OverridePolicy::FirstWins),
            other => Err(crate::Error::InvalidValue {
                key: "general.override_policy",
                value: other.to_string(),
            }),
        }
    }

    /// `None` when every field is enabled.
    ///
    /// # Errors
    /// [`crate::Error::UnknownField`] for names outside the record layout.
    pub fn parse_fields(&self) -> Result<Option<Vec<Field>>, crate::Error> {
        self.general
            .fields
            .as_ref()
            .map(|names| names.iter().map(|name| name.parse::<Field>()).collect())
            .transpose()
    }

    /// # Errors
    /// Non-numeric keys or unknown level names.
    pub fn parse_levels(&self) -> Result<HashMap<i64, Level>, crate::Error> {
        parse_table(&self.levels, |name| Ok(name.parse::<Level>()?))
    }

    /// Standard ranges (unless disabled) overlaid with `[level_ranges]`.
    ///
    /// # Errors
    /// Non-numeric keys or unknown level names.
    pub fn parse_level_ranges(&self) -> Result<RangeMap<Level>, crate::Error> {
        let mut ranges = if self.general.standard_ranges {
            crate::message::LevelTable::standard_ranges()
        } else {
            RangeMap::new()
        };
        for (bound, level) in parse_table(&self.level_ranges, |name| Ok(name.parse::<Level>()?))? {
            ranges.insert(bound, level);
        }
        Ok(ranges)
    }

    /// # Errors
    /// Non-numeric keys.
    pub fn parse_messages(&self) -> Result<HashMap<i64, String>, crate::Error> {
        parse_table(&self.messages, |text| Ok(text.to_string()))
    }

    /// # Errors
    /// Non-numeric keys.
    pub fn parse_statuses(&self) -> Result<HashMap<i64, String>, crate::Error> {
        parse_table(&self.statuses, |status| Ok(status.to_string()))
    }

    /// # Errors
    /// Non-numeric keys.
    pub fn parse_status_ranges(&self) -> Result<RangeMap<String>, crate::Error> {
        Ok(parse_table(&self.status_ranges, |status| Ok(status.to_string()))?
            .into_iter()
            .collect())
    }
}

fn parse_table<T>(
    table: &HashMap<String, String>,
    parse_value: impl Fn(&str) -> Result<T, crate::Error>,
) -> Result<HashMap<i64, T>, crate::Error> {
    table
        .iter()
        .map(|(key, value)| {
            let number = key
                .trim()
                .parse::<i64>()
                .map_err(|_| crate::Error::InvalidMessageNumber(key.clone()))?;
            Ok((number, parse_value(value)?))
        })
        .collect()
}

/// Relative `source` paths are relative to the including file.
fn resolve_relative(including: &Path, source: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(source).as_ref());
    if expanded.is_absolute() {
        return expanded;
    }
    including
        .parent()
        .map_or_else(|| expanded.clone(), |dir| dir.join(&expanded))
}
