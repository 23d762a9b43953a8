//! Run configuration loaded from JSON
//!
//! Every key is optional; anything missing falls back to the built-in
//! defaults so an empty `{}` file is a valid configuration.

use crate::export::DEFAULT_FILE_NAME;
use crate::input::{
    RawInput, DEFAULT_DIVIDEND_YIELD, DEFAULT_GROWTH_RATE, DEFAULT_INITIAL_SUM,
    DEFAULT_INSTRUMENT_NAME, DEFAULT_PERIOD,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Values pre-filled into the input fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDefaults {
    #[serde(default = "default_instrument_name")]
    pub instrument_name: String,

    /// Kept as text so locale formatted values like "7,5" work here too
    #[serde(default = "default_initial_sum")]
    pub initial_sum: String,

    #[serde(default = "default_period")]
    pub period_years: String,

    #[serde(default = "default_growth_rate")]
    pub growth_rate_percent: String,

    #[serde(default = "default_dividend_yield")]
    pub dividend_yield_percent: String,
}

fn default_instrument_name() -> String {
    DEFAULT_INSTRUMENT_NAME.to_string()
}

fn default_initial_sum() -> String {
    DEFAULT_INITIAL_SUM.to_string()
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

fn default_growth_rate() -> String {
    DEFAULT_GROWTH_RATE.to_string()
}

fn default_dividend_yield() -> String {
    DEFAULT_DIVIDEND_YIELD.to_string()
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            instrument_name: default_instrument_name(),
            initial_sum: default_initial_sum(),
            period_years: default_period(),
            growth_rate_percent: default_growth_rate(),
            dividend_yield_percent: default_dividend_yield(),
        }
    }
}

impl From<InputDefaults> for RawInput {
    fn from(defaults: InputDefaults) -> Self {
        RawInput {
            instrument_name: defaults.instrument_name,
            initial_sum: defaults.initial_sum,
            period_years: defaults.period_years,
            growth_rate_percent: defaults.growth_rate_percent,
            dividend_yield_percent: defaults.dividend_yield_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// File name suggested when saving results
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { file_name: default_file_name() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub defaults: InputDefaults,

    #[serde(default)]
    pub export: ExportOptions,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
