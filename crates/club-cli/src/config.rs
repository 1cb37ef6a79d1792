//! Configuration loading and management.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use chrono::format::{Item, StrftimeItems};
use club_core::LineFormat;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid time format: {format:?}")]
    InvalidTimeFormat { format: String },

    #[error("{field} cannot be empty")]
    EmptySeparator { field: &'static str },

    #[error("channel_capacity must be at least 1")]
    ZeroCapacity,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// strftime pattern for every time in the log and the output.
    pub time_format: String,

    /// Separator between opening and closing time in the header.
    pub hours_separator: String,

    /// Separator between event fields.
    pub field_separator: String,

    /// Events buffered between the reader and the processor.
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: "%H:%M".to_string(),
            hours_separator: " ".to_string(),
            field_separator: " ".to_string(),
            channel_capacity: 10,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // CLUB_TIME_FORMAT, CLUB_FIELD_SEPARATOR, ...
        figment = figment.merge(Env::prefixed("CLUB_"));

        figment.extract()
    }

    /// Rejects values the parser or renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let format_is_valid = !self.time_format.is_empty()
            && !StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error))
            && formats_clock_time(&self.time_format);
        if !format_is_valid {
            return Err(ConfigError::InvalidTimeFormat {
                format: self.time_format.clone(),
            });
        }
        if self.hours_separator.is_empty() {
            return Err(ConfigError::EmptySeparator {
                field: "hours_separator",
            });
        }
        if self.field_separator.is_empty() {
            return Err(ConfigError::EmptySeparator {
                field: "field_separator",
            });
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Output format derived from this configuration.
    pub fn line_format(&self) -> LineFormat {
        LineFormat {
            time_format: self.time_format.clone(),
            separator: self.field_separator.clone(),
        }
    }
}

/// Date fields such as `%Y` parse fine but fail when a bare time is formatted.
fn formats_clock_time(format: &str) -> bool {
    let mut rendered = String::new();
    write!(rendered, "{}", NaiveTime::default().format(format)).is_ok()
}

/// Returns the platform-specific config directory for club.
///
/// On Linux: `~/.config/club`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("club"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.line_format(), LineFormat::default());
    }

    #[test]
    fn rejects_broken_time_format() {
        let config = Config {
            time_format: "%H:%".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimeFormat { .. })
        ));
    }

    #[test]
    fn rejects_date_fields_in_time_format() {
        for format in ["%H:%M %Y", "%d %H:%M"] {
            let config = Config {
                time_format: format.to_string(),
                ..Config::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidTimeFormat {
                    format: format.to_string()
                }),
                "format {format:?}"
            );
        }
    }

    #[test]
    fn accepts_other_clock_formats() {
        let config = Config {
            time_format: "%H.%M.%S".to_string(),
            ..Config::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_separators_and_zero_capacity() {
        let empty_fields = Config {
            field_separator: String::new(),
            ..Config::default()
        };
        assert_eq!(
            empty_fields.validate().unwrap_err().to_string(),
            "field_separator cannot be empty"
        );

        let zero = Config {
            channel_capacity: 0,
            ..Config::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"field_separator = ";""#).unwrap();
        writeln!(file, "channel_capacity = 3").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();

        assert_eq!(config.field_separator, ";");
        assert_eq!(config.channel_capacity, 3);
        assert_eq!(config.time_format, "%H:%M");
    }

    #[test]
    fn dirs_config_path_ends_with_club() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "club");
    }
}
