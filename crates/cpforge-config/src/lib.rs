//! Configuration system for CpForge.
//!
//! Load solver configuration from TOML or YAML files to control assertion
//! levels and assignment lookup behavior without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use cpforge_config::{EnvironmentMode, MissingElementPolicy, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!
//!     [assignment]
//!     missing_element = "insert"
//!     initial_capacity = 64
//! "#).unwrap();
//!
//! assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
//! assert_eq!(config.assignment.missing_element, MissingElementPolicy::Insert);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use cpforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

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

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Assignment (solution snapshot) configuration.
    #[serde(default)]
    pub assignment: AssignmentConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the policy for setters on variables an assignment does not track.
    pub fn with_missing_element_policy(mut self, policy: MissingElementPolicy) -> Self {
        self.assignment.missing_element = policy;
        self
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assignment.initial_capacity == Some(0) {
            return Err(ConfigError::Invalid(
                "assignment.initial_capacity must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Environment mode affecting solver behavior.
///
/// Nothing in the solver draws random numbers, so the two non-asserting
/// modes behave identically; both are accepted so that configuration files
/// shared with other solvers parse unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// No validation before restore.
    #[default]
    NonReproducible,

    /// Same as `NonReproducible`.
    Reproducible,

    /// Active elements are validated before restore.
    FastAssert,

    /// Every element, inactive ones and the objective included, is
    /// validated before restore.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true if captured state is validated before it is restored.
    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }

    /// Returns true if validation also covers elements that a restore skips.
    pub fn is_fully_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Assignment configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AssignmentConfig {
    /// What setters do when the variable is not tracked.
    #[serde(default)]
    pub missing_element: MissingElementPolicy,

    /// Capacity reserved in each container of a new assignment.
    #[serde(default)]
    pub initial_capacity: Option<usize>,
}

/// Behavior of mutable element lookups for variables never added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingElementPolicy {
    /// Fail with a "variable not tracked" error.
    #[default]
    Fail,

    /// Add a fresh element for the variable and mutate it.
    Insert,
}

#[cfg(test)]
mod tests;
