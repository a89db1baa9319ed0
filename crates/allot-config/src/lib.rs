//! Configuration for the allot supplier award optimiser.
//!
//! Two independent configuration surfaces live here:
//!
//! - [`RuleSet`] — which business rules a model enforces, each rule carrying
//!   its own validated payload. This replaces a null-means-inactive
//!   parameter list with an explicit, duplicate-rejecting registry.
//! - [`SolveSettings`] — backend tuning (worker count, time limit), loadable
//!   from TOML or YAML files so deployments can adjust them without code
//!   changes.
//!
//! # Examples
//!
//! Load settings from a TOML string:
//!
//! ```
//! use allot_config::SolveSettings;
//! use std::time::Duration;
//!
//! let settings = SolveSettings::from_toml_str(r#"
//!     search_workers = 4
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(settings.search_workers, 4);
//! assert_eq!(settings.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use defaults when no file is present:
//!
//! ```
//! use allot_config::SolveSettings;
//!
//! let settings = SolveSettings::load("solve.toml").unwrap_or_default();
//! assert_eq!(settings.search_workers, 8);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod rules;

pub use rules::{Rule, RuleSet};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Backend solve settings, fixed at model construction.
///
/// These are hints: a compiled backend that cannot honour a field ignores
/// it. The bundled pure-Rust backend is single-threaded and runs to
/// completion regardless of `seconds_spent_limit`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SolveSettings {
    /// Number of parallel search workers the backend may use.
    pub search_workers: usize,

    /// Wall-clock budget for one solve invocation, in seconds.
    pub seconds_spent_limit: Option<u64>,
}

impl Default for SolveSettings {
    fn default() -> Self {
        SolveSettings {
            search_workers: 8,
            seconds_spent_limit: None,
        }
    }
}

impl SolveSettings {
    /// Creates the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses settings from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(s)?;
        settings.validated()
    }

    /// Loads settings from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses settings from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_yaml::from_str(s)?;
        settings.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.search_workers == 0 {
            return Err(ConfigError::Invalid(
                "search_workers must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    /// Sets the worker count.
    pub fn with_search_workers(mut self, workers: usize) -> Self {
        self.search_workers = workers;
        self
    }

    /// Sets the solve time budget.
    pub fn with_seconds_spent_limit(mut self, seconds: u64) -> Self {
        self.seconds_spent_limit = Some(seconds);
        self
    }

    /// The time budget as a `Duration`, if one is configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.seconds_spent_limit.map(Duration::from_secs)
    }
}
