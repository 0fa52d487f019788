//! Advisory layer configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{AdvisoryError, AdvisoryResult};

/// Report assembly configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Ask the explanation generator at all
    #[serde(default = "default_explanation_enabled")]
    pub explanation_enabled: bool,

    /// Upper bound on one explanation call, in milliseconds
    #[serde(default = "default_explanation_timeout_ms")]
    pub explanation_timeout_ms: u64,

    /// Text shown in place of a missing or blank advisory
    #[serde(default = "default_fallback_advisory")]
    pub fallback_advisory: String,
}

impl AdvisoryConfig {
    /// Get explanation timeout as Duration
    pub fn explanation_timeout(&self) -> Duration {
        Duration::from_millis(self.explanation_timeout_ms)
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> AdvisoryResult<Self> {
        let config: AdvisoryConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> AdvisoryResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    fn validate(&self) -> AdvisoryResult<()> {
        if self.explanation_enabled && self.explanation_timeout_ms == 0 {
            return Err(AdvisoryError::Config(
                "explanation_timeout_ms must be positive when explanations are enabled".to_string(),
            ));
        }
        Ok(())
    }
}

// Default value functions
fn default_explanation_enabled() -> bool {
    true
}

fn default_explanation_timeout_ms() -> u64 {
    15_000
}

fn default_fallback_advisory() -> String {
    "No advisory available".to_string()
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            explanation_enabled: default_explanation_enabled(),
            explanation_timeout_ms: default_explanation_timeout_ms(),
            fallback_advisory: default_fallback_advisory(),
        }
    }
}
