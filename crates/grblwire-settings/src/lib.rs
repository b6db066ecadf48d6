//! grblwire Settings Crate
//!
//! Handles application configuration: file loading, defaults and validation.

pub mod config;
pub mod error;

pub use config::{
    Config, LogFormat, LoggingSettings, OutputFormat, OutputSettings, StreamSettings,
    APP_DIR_NAME, CONFIG_FILE_NAME,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
