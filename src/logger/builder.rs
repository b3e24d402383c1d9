//! Stepwise construction of a [`Logger`]. Every option is applied at build
//! time; invalid values (an unknown level name, a component id out of range)
//! are kept until `build` and returned from there.

use super::Logger;
use super::gate::Gate;
use crate::level::Level;
use crate::message::{
    Composer, ErrorCodes, Field, Fields, IdFormatter, LevelResolver, LevelTable, OverridePolicy,
    RangeMap, StatusResolver, StatusTable, TextFormatter,
};
use crate::output::{Output, WriterOutput};
use std::collections::HashMap;

pub struct LoggerBuilder {
    min_level: Level,
    level_table: LevelTable,
    level_resolver: Option<LevelResolver>,
    status_table: StatusTable,
    status_resolver: Option<StatusResolver>,
    id: IdFormatter,
    messages: HashMap<i64, String>,
    text: Option<TextFormatter>,
    fields: Fields,
    hide_timestamp: bool,
    caller_skip: usize,
    outputs: Vec<Box<dyn Output>>,
    error: Option<crate::Error>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Info minimum, standard level ranges, plain decimal ids, stderr output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Level::Info,
            level_table: LevelTable::standard(),
            level_resolver: None,
            status_table: StatusTable::default(),
            status_resolver: None,
            id: IdFormatter::Plain,
            messages: HashMap::new(),
            text: None,
            fields: Fields::all(),
            hide_timestamp: false,
            caller_skip: 0,
            outputs: Vec::new(),
            error: None,
        }
    }

    fn fail(mut self, error: crate::Error) -> Self {
        self.error.get_or_insert(error);
        self
    }

    /// Minimum level a record needs to be written.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Minimum level by name; an unknown name fails `build`.
    #[must_use]
    pub fn level_name(self, name: &str) -> Self {
        match name.parse() {
            Ok(level) => self.level(level),
            Err(e) => self.fail(crate::Error::from(e)),
        }
    }

    /// Exact message number to level entries.
    #[must_use]
    pub fn levels(mut self, entries: impl IntoIterator<Item = (i64, Level)>) -> Self {
        self.level_table.exact.extend(entries);
        self
    }

    /// Replaces the standard ranges with `ranges`.
    #[must_use]
    pub fn level_ranges(mut self, ranges: impl Into<RangeMap<Level>>) -> Self {
        self.level_table.ranges = ranges.into();
        self
    }

    /// Level of messages no exact entry or range covers.
    #[must_use]
    pub const fn level_default(mut self, level: Level) -> Self {
        self.level_table.default = Some(level);
        self
    }

    #[must_use]
    pub const fn override_policy(mut self, policy: OverridePolicy) -> Self {
        self.level_table.overrides = policy;
        self
    }

    /// Replaces the table-driven level stage entirely.
    #[must_use]
    pub fn level_resolver(mut self, resolver: LevelResolver) -> Self {
        self.level_resolver = Some(resolver);
        self
    }

    /// Exact message number to status entries.
    #[must_use]
    pub fn statuses<S: Into<String>>(mut self, entries: impl IntoIterator<Item = (i64, S)>) -> Self {
        self.status_table
            .exact
            .extend(entries.into_iter().map(|(n, s)| (n, s.into())));
        self
    }

    #[must_use]
    pub fn status_ranges(mut self, ranges: impl Into<RangeMap<String>>) -> Self {
        self.status_table.ranges = ranges.into();
        self
    }

    #[must_use]
    pub fn error_codes(mut self, codes: ErrorCodes) -> Self {
        self.status_table.error_codes = codes;
        self
    }

    /// Replaces the table-driven status stage entirely.
    #[must_use]
    pub fn status_resolver(mut self, resolver: StatusResolver) -> Self {
        self.status_resolver = Some(resolver);
        self
    }

    /// printf template for the `id` field, e.g. `"APP-%04d"`.
    #[must_use]
    pub fn id_template(mut self, template: impl Into<String>) -> Self {
        self.id = IdFormatter::template(template);
        self
    }

    /// Ids of the form `{prefix}{component:04}{number:04}`; the component must lie in `1..=9999`.
    #[must_use]
    pub fn component(mut self, prefix: &str, component_id: i64) -> Self {
        match IdFormatter::component(prefix, component_id) {
            Ok(id) => {
                self.id = id;
                self
            }
            Err(e) => self.fail(e),
        }
    }

    #[must_use]
    pub fn id_formatter(mut self, id: IdFormatter) -> Self {
        self.id = id;
        self
    }

    /// Text templates by message number.
    #[must_use]
    pub fn messages<S: Into<String>>(mut self, entries: impl IntoIterator<Item = (i64, S)>) -> Self {
        self.messages
            .extend(entries.into_iter().map(|(n, t)| (n, t.into())));
        self
    }

    /// Replaces the templated text stage entirely.
    #[must_use]
    pub fn text_formatter(mut self, text: TextFormatter) -> Self {
        self.text = Some(text);
        self
    }

    /// Only these fields are written.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn without_field(mut self, field: Field) -> Self {
        self.fields = self.fields.without(field);
        self
    }

    /// Drops wall-clock `date` and `time`, for reproducible output.
    #[must_use]
    pub const fn hide_timestamp(mut self, hide: bool) -> Self {
        self.hide_timestamp = hide;
        self
    }

    /// Frames between the caller and the logger that `location` should skip,
    /// for wrappers that are not `#[track_caller]`.
    #[must_use]
    pub const fn caller_skip(mut self, frames: usize) -> Self {
        self.caller_skip = frames;
        self
    }

    /// Adds a destination. Without any, records go to stderr.
    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.outputs.push(Box::new(output));
        self
    }

    /// # Errors
    /// The first invalid option given to this builder.
    pub fn build(self) -> Result<Logger, crate::Error> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let text = self.text.unwrap_or_else(|| {
            if self.messages.is_empty() {
                TextFormatter::Null
            } else {
                TextFormatter::Templated(self.messages)
            }
        });

        let composer = Composer {
            level: self
                .level_resolver
                .unwrap_or(LevelResolver::Table(self.level_table)),
            status: self
                .status_resolver
                .unwrap_or(StatusResolver::Table(self.status_table)),
            id: self.id,
            text,
            fields: self.fields,
            hide_timestamp: self.hide_timestamp,
            caller_skip: self.caller_skip,
        };

        let mut outputs = self.outputs;
        if outputs.is_empty() {
            outputs.push(Box::new(WriterOutput::stderr()));
        }

        Ok(Logger {
            composer,
            gate: Gate::new(self.min_level),
            outputs,
        })
    }
}
