//! Application configuration.
//!
//! Every field has a default, so an absent or partial file is fine:
//!
//! ```toml
//! # evcharge.toml
//! artifact_path = "models/rf_ev_charging_demand.json"
//!
//! [form]
//! default_hour = 18
//!
//! [log]
//! filter = "evcharge_core=debug,info"
//! file = "evcharge.log"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::input::Hour;
use crate::model::DEFAULT_ARTIFACT_PATH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvChargeConfig {
    /// Model artifact, relative to the working directory unless absolute.
    pub artifact_path: PathBuf,

    pub form: FormConfig,

    pub log: LogConfig,
}

impl Default for EvChargeConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            form: FormConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Starting position of the hour slider.
    pub default_hour: u8,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_hour: Hour::default().get(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing-subscriber` env-filter directive.
    pub filter: String,
    /// Log destination. Without one, the interactive form logs nothing.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl EvChargeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Problems with the configured values; empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.artifact_path.as_os_str().is_empty() {
            errors.push("artifact_path must not be empty".to_string());
        }
        if Hour::new(i64::from(self.form.default_hour)).is_err() {
            errors.push(format!(
                "form.default_hour must be in 0..=23, got {}",
                self.form.default_hour
            ));
        }
        if self.log.filter.trim().is_empty() {
            errors.push("log.filter must not be empty".to_string());
        }

        errors
    }

    /// Slider start position; falls back to noon if out of range.
    #[must_use]
    pub fn default_hour(&self) -> Hour {
        Hour::new(i64::from(self.form.default_hour)).unwrap_or_default()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Toml(e) => write!(f, "config TOML error: {e}"),
            Self::Validation(errors) => {
                write!(f, "config validation failed: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
