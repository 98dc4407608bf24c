//! Pipeline configuration.
//!
//! Every field has a default, so an empty (or absent) config file yields the
//! stock run: `AAPL`, one year of daily data, outputs under `output/`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tickerlab_core::domain::{Interval, Period};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {field}")]
    Validation { field: String },
}

fn default_ticker() -> String {
    "AAPL".into()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/price_model.json")
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "text".into()
}

const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

/// Top-level configuration for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub pipeline: RunSection,
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// What to fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSection {
    #[serde(default = "default_ticker")]
    pub ticker: String,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub interval: Interval,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            ticker: default_ticker(),
            period: Period::default(),
            interval: Interval::default(),
        }
    }
}

/// Where run artifacts go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsSection {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            model_path: default_model_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// `EnvFilter` directive, e.g. `"info"` or `"tickerlab_runner=debug"`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Accepted values: `"text"` | `"json"`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Checks that serde cannot express. A ticker only has to be non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.ticker.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "pipeline.ticker must not be empty".into(),
            });
        }
        if !VALID_LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Validation {
                field: format!(
                    "logging.format \"{}\" is not one of {VALID_LOG_FORMATS:?}",
                    self.logging.format
                ),
            });
        }
        if self.paths.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                field: "paths.output_dir must not be empty".into(),
            });
        }
        if self.paths.model_path.file_name().is_none() {
            return Err(ConfigError::Validation {
                field: format!(
                    "paths.model_path \"{}\" has no file name",
                    self.paths.model_path.display()
                ),
            });
        }
        Ok(())
    }
}
