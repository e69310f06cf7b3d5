//! Store configuration
//!
//! Every field has a default, so a YAML file only needs to name the values
//! it overrides:
//!
//! ```yaml
//! closest_limit: 5
//! reject_reference_cycles: false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config text is not valid YAML for [`StoreConfig`]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is outside its allowed range
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Behaviour switches of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of affiliations returned by closest-to queries
    pub closest_limit: usize,

    /// Reject references that would make a publication its own ancestor
    pub reject_reference_cycles: bool,

    /// Decrement co-authorship weights when a publication is removed
    pub recompute_weights_on_removal: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            closest_limit: 3,
            reject_reference_cycles: true,
            recompute_weights_on_removal: true,
        }
    }
}

impl StoreConfig {
    /// Reference behaviour: no cycle check and weights never decremented
    pub fn legacy() -> Self {
        Self {
            reject_reference_cycles: false,
            recompute_weights_on_removal: false,
            ..Self::default()
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let config: StoreConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.closest_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "closest_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
