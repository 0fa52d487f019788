//! Error types for report assembly

use thiserror::Error;

use msme_risk::RiskError;

/// Result type for advisory operations
pub type AdvisoryResult<T> = Result<T, AdvisoryError>;

/// Advisory layer error types
#[derive(Debug, Error)]
pub enum AdvisoryError {
    /// Scoring rejected the applicant's data
    #[error("Risk engine error: {0}")]
    Risk(#[from] RiskError),

    /// Explanation generator failed
    #[error("Explanation generator error: {0}")]
    Explanation(String),

    /// Explanation generator did not answer in time
    #[error("Explanation timed out after {0} ms")]
    Timeout(u64),

    /// Report renderer failed
    #[error("Report rendering failed: {0}")]
    Render(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdvisoryError {
    /// Check if error came from the applicant's input rather than a collaborator
    pub fn is_input_error(&self) -> bool {
        matches!(self, AdvisoryError::Risk(e) if e.is_invalid_input())
    }

    /// Check if error came from the explanation collaborator
    pub fn is_explanation_failure(&self) -> bool {
        matches!(
            self,
            AdvisoryError::Explanation(_) | AdvisoryError::Timeout(_)
        )
    }
}
