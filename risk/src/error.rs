//! Error types for the scoring engine

use thiserror::Error;

/// Result type for scoring operations
pub type RiskResult<T> = std::result::Result<T, RiskError>;

/// Errors surfaced by the scoring engine
///
/// Every variant describes a caller-input or configuration problem. Nothing
/// here is transient, so nothing here is worth retrying.
#[derive(Error, Debug)]
pub enum RiskError {
    /// A field is missing, non-finite, negative where it cannot be,
    /// or not one of the recognized values
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput {
        /// Name of the offending field, as it appears in the payload
        field: String,
        /// Human-readable reason
        reason: String,
    },

    /// A divisor field is zero, leaving a ratio undefined
    #[error("Division by zero: `{field}` is zero")]
    DivisionByZero {
        /// Name of the zero-valued field
        field: String,
    },

    /// A scoring policy document failed to parse or is inconsistent
    #[error("Invalid scoring policy: {0}")]
    Policy(String),

    /// IO error while reading a policy file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RiskError {
    /// Build an `InvalidInput` error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RiskError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Build a `DivisionByZero` error
    pub fn division_by_zero(field: impl Into<String>) -> Self {
        RiskError::DivisionByZero {
            field: field.into(),
        }
    }

    /// Check if error is an invalid-input rejection (zero revenue included)
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            RiskError::InvalidInput { .. } | RiskError::DivisionByZero { .. }
        )
    }

    /// Check if error is the zero-divisor specialization
    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, RiskError::DivisionByZero { .. })
    }

    /// Name of the field that caused the error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            RiskError::InvalidInput { field, .. } | RiskError::DivisionByZero { field } => {
                Some(field)
            }
            RiskError::Policy(_) | RiskError::Io(_) => None,
        }
    }
}
