//! Configuration types for error construction and rendering.
//!
//! This module provides configuration structures that control which
//! formatter new errors are bound to and how tracking points are captured.
//! All types implement [`serde::Deserialize`] and can be loaded from TOML.
//!
//! # Overview
//!
//! - [`Config`] - Top-level configuration combining format and tracking settings.
//! - [`FormatConfig`] - Selects and configures the formatter.
//! - [`TrackingConfig`] - Controls location capture.
//!
//! # Example
//!
//! ```
//! # use trackerr::config::{Config, FormatStyle};
//! let config = Config::from_toml_str(
//!     r#"
//!     [format]
//!     style = "log_line"
//!     "#,
//! )
//! .expect("valid configuration");
//!
//! assert_eq!(config.format().style(), FormatStyle::LogLine);
//! assert!(config.tracking().capture());
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use trackerr_core::Formatter;

use crate::format::{DEFAULT_SEPARATOR, LogLineFormatter, StackFormatter, UNKNOWN_LOCATION};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

/// Top-level configuration combining format and tracking settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Formatter configuration section.
    #[serde(default)]
    format: FormatConfig,

    /// Tracking configuration section.
    #[serde(default)]
    tracking: TrackingConfig,
}

impl Config {
    /// Creates a new [`Config`] from its sections.
    pub fn new(format: FormatConfig, tracking: TrackingConfig) -> Self {
        Self { format, tracking }
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed or contains
    /// unknown values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File doesn't exist
    /// - File cannot be read
    /// - TOML parsing fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        info!(path = path.display().to_string(); "Loading error configuration");
        let content = fs::read_to_string(path)?;

        Self::from_toml_str(&content)
    }

    /// Returns the format configuration.
    pub fn format(&self) -> &FormatConfig {
        &self.format
    }

    /// Returns the tracking configuration.
    pub fn tracking(&self) -> TrackingConfig {
        self.tracking
    }

    /// Build the formatter described by this configuration.
    pub fn formatter(&self) -> Arc<dyn Formatter> {
        match self.format.style {
            FormatStyle::Stack => Arc::new(
                StackFormatter::new()
                    .with_separator(self.format.separator.as_str())
                    .with_placeholder(self.format.placeholder.as_str()),
            ),
            FormatStyle::LogLine => Arc::new(LogLineFormatter),
        }
    }
}

/// Which built-in formatter to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    /// [`StackFormatter`]: one line per chain node.
    #[default]
    Stack,

    /// [`LogLineFormatter`]: root cause message and merged arguments.
    LogLine,
}

/// Formatter selection and settings.
///
/// `separator` and `placeholder` only apply to [`FormatStyle::Stack`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    style: FormatStyle,
    separator: String,
    placeholder: String,
}

impl FormatConfig {
    /// Creates a new [`FormatConfig`] with the given style and default settings.
    pub fn new(style: FormatStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Returns the selected formatter style.
    pub fn style(&self) -> FormatStyle {
        self.style
    }

    /// Returns the line separator for the stack formatter.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the unknown location placeholder for the stack formatter.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            style: FormatStyle::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
            placeholder: UNKNOWN_LOCATION.to_string(),
        }
    }
}

/// Location capture settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Record caller locations at all.
    capture: bool,

    /// Rewrite absolute paths relative to the working directory.
    relative_paths: bool,
}

impl TrackingConfig {
    /// Creates a new [`TrackingConfig`].
    ///
    /// # Arguments
    ///
    /// * `capture` - Whether caller locations are recorded.
    /// * `relative_paths` - Whether absolute paths are shortened.
    pub fn new(capture: bool, relative_paths: bool) -> Self {
        Self {
            capture,
            relative_paths,
        }
    }

    /// Returns `true` if caller locations are recorded.
    pub fn capture(&self) -> bool {
        self.capture
    }

    /// Returns `true` if absolute paths are shortened.
    pub fn relative_paths(&self) -> bool {
        self.relative_paths
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            capture: true,
            relative_paths: true,
        }
    }
}
