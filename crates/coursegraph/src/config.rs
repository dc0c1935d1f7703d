//! Engine configuration.
//!
//! Configuration is plain YAML with kebab-case keys. Every field has a
//! default, so an empty document is a valid configuration:
//!
//! ```yaml
//! credit-policy:
//!   min-credits: 12
//!   max-credits: 18
//! default-credit-hours: 3
//! partition:
//!   unlocks: none
//! ```

use crate::domain::DEFAULT_CREDIT_HOURS;
use crate::error::{Error, Result};
use crate::partition::PartitionOptions;
use crate::schedule::CreditPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "coursegraph.yaml";

/// Configuration for the course graph engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Credit-load thresholds for schedule checks
    pub credit_policy: CreditPolicy,

    /// Credit hours assigned to records without a usable value
    pub default_credit_hours: u32,

    /// Partition output options
    pub partition: PartitionOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            credit_policy: CreditPolicy::default(),
            default_credit_hours: DEFAULT_CREDIT_HOURS,
            partition: PartitionOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate configuration from a YAML string
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the YAML is malformed or fails
    /// [`validate`](Self::validate).
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Config`]
    /// if its content is malformed or invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails, or [`Error::Io`] if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject thresholds that cannot describe a real term.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `max-credits` is zero, `min-credits`
    /// exceeds `max-credits`, or `default-credit-hours` is zero.
    pub fn validate(&self) -> Result<()> {
        let policy = &self.credit_policy;
        if policy.max_credits == 0 {
            return Err(Error::Config("max-credits must be positive".to_string()));
        }
        if policy.min_credits > policy.max_credits {
            return Err(Error::Config(format!(
                "min-credits ({}) cannot exceed max-credits ({})",
                policy.min_credits, policy.max_credits
            )));
        }
        if self.default_credit_hours == 0 {
            return Err(Error::Config(
                "default-credit-hours must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
