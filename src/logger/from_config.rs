//! Logger construction from a [`Config`].

use super::{Logger, LoggerBuilder};
use crate::config::Config;
use crate::detail::Detail;
use crate::internal;
use crate::level::Level;
use crate::message::ErrorCodes;
use crate::output::WriterOutput;

impl Logger {
    /// Builds a logger from `<config_dir>/msglog/config.toml`, or from defaults
    /// when the file does not exist.
    ///
    /// # Errors
    /// Config loading errors and invalid settings.
    pub fn from_default_config() -> Result<Self, crate::Error> {
        Self::from_config(&Config::load()?)
    }

    /// # Errors
    /// Invalid level names, message numbers, field names, component ids, or an
    /// output file that cannot be opened.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        let builder = LoggerBuilder::from_config(config)?;
        let logger = builder.build()?;

        if internal::enabled(Level::Debug) {
            internal::log(
                internal::LOGGER_CONFIGURED,
                &[
                    Detail::from(logger.level_as_str()),
                    Detail::from(config.output.target.as_str()),
                    Detail::from(logger.output_count()),
                ],
            );
        }
        Ok(logger)
    }
}

impl LoggerBuilder {
    /// A builder preloaded with every setting of `config`, for further adjustment.
    ///
    /// # Errors
    /// Same as [`Logger::from_config`].
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        let general = &config.general;

        let mut builder = Self::new()
            .level(config.parse_level()?)
            .override_policy(config.parse_override_policy()?)
            .levels(config.parse_levels()?)
            .level_ranges(config.parse_level_ranges()?)
            .statuses(config.parse_statuses()?)
            .status_ranges(config.parse_status_ranges()?)
            .error_codes(error_codes(config))
            .messages(config.parse_messages()?)
            .hide_timestamp(general.hide_timestamp)
            .caller_skip(general.caller_skip);

        if let Some(level) = config.parse_default_level()? {
            builder = builder.level_default(level);
        }
        if let Some(fields) = config.parse_fields()? {
            builder = builder.fields(fields);
        }

        builder = match (general.component_id, general.id_template.as_deref()) {
            (Some(component_id), _) => builder.component(&general.id_prefix, component_id),
            (None, Some(template)) => builder.id_template(template),
            (None, None) => builder,
        };

        let output = match config.output.target.trim() {
            "" | "stderr" => WriterOutput::stderr(),
            "stdout" => WriterOutput::stdout(),
            path => WriterOutput::append(path)?,
        };

        Ok(builder.output(output))
    }
}

fn error_codes(config: &Config) -> ErrorCodes {
    let section = &config.error_codes;
    let mut codes = if section.replace {
        ErrorCodes::empty()
    } else {
        ErrorCodes::default()
    };
    for (code, status) in &section.codes {
        codes = codes.code(code.clone(), status.clone());
    }
    if let Some(order) = &section.precedence {
        codes = codes.precedence(order.iter().cloned());
    }
    codes
}
