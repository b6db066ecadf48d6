//! Configuration for grblwire
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats; the default file lives in the
//! platform-specific configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Logging (filter directives, output format)
//! - Line stream (channel capacity, failure policy)
//! - Output (how decoded messages are rendered)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use grblwire_communication::{FailurePolicy, LineStreamConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config directory
pub const APP_DIR_NAME: &str = "grblwire";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Rendering of decoded messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One compact JSON object per line
    #[default]
    Json,
    /// Indented JSON
    JsonPretty,
    /// Short human-readable summary
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::JsonPretty => write!(f, "json-pretty"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, overridden by `RUST_LOG` when set
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Line stream settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    /// Capacity of the decoded-line channel
    pub channel_capacity: usize,
    /// Handling of undecodable lines
    pub failure_policy: FailurePolicy,
}

impl Default for StreamSettings {
    fn default() -> Self {
        let defaults = LineStreamConfig::default();
        Self {
            channel_capacity: defaults.channel_capacity,
            failure_policy: defaults.failure_policy,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Rendering of decoded messages
    pub format: OutputFormat,
}

/// Complete application configuration
///
/// Every section falls back to its defaults when missing from the file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingSettings,
    /// Line stream settings
    pub stream: StreamSettings,
    /// Output settings
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config_dir>/grblwire/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML, chosen by extension)
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::LoadError {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load the given file, or the default file if it exists, or defaults
    ///
    /// An explicit path must exist; a missing default file is not an error.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.stream.channel_capacity == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "stream.channel_capacity".to_string(),
                value: self.stream.channel_capacity.to_string(),
            });
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Empty("logging.filter".to_string()));
        }

        Ok(())
    }

    /// Line stream configuration derived from the stream section
    pub fn to_stream_config(&self) -> LineStreamConfig {
        LineStreamConfig {
            channel_capacity: self.stream.channel_capacity,
            failure_policy: self.stream.failure_policy,
        }
    }
}
