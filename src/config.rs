//! Registry configuration
//!
//! ```yaml
//! default_adapters: true
//! datetime_separator: "T"
//! ```

use crate::registry::{AdaptError, AdapterRegistry};
use crate::sql::register_default_adapters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or applying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("adapter registration failed: {0}")]
    Adapt(#[from] AdaptError),
}

/// Settings for building a ready-to-use registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Install the default date, UUID and JSON adapters
    pub default_adapters: bool,
    /// Separator between date and time when adapting `NaiveDateTime`
    pub datetime_separator: char,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_adapters: true,
            datetime_separator: ' ',
        }
    }
}

impl RegistryConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Install the configured adapters into an existing registry.
    pub fn apply(&self, registry: &AdapterRegistry) -> Result<(), ConfigError> {
        if self.default_adapters {
            register_default_adapters(registry, self.datetime_separator)?;
        }
        Ok(())
    }

    /// Build a new registry with this configuration applied.
    pub fn build(&self) -> Result<AdapterRegistry, ConfigError> {
        let registry = AdapterRegistry::new();
        self.apply(&registry)?;
        Ok(registry)
    }
}
