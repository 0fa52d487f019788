//! Explanation generator seam
//!
//! The generator turns a handful of numbers into advisory prose. Its output
//! is enrichment only: it never feeds back into scoring, and every report
//! is complete without it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use msme_risk::{FinancialProfile, RiskAssessment, Volatility};

use crate::error::AdvisoryResult;

/// Payload handed to the explanation generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRequest {
    pub score: u32,
    pub debt_ratio: f64,
    pub surplus: f64,
    pub volatility: Volatility,
}

impl ExplanationRequest {
    pub fn new(assessment: &RiskAssessment, profile: &FinancialProfile) -> Self {
        Self {
            score: assessment.score,
            debt_ratio: assessment.debt_ratio,
            surplus: assessment.surplus,
            volatility: profile.volatility(),
        }
    }
}

/// External explanation generator
///
/// Implementations typically call a hosted language model. They may fail
/// or stall; callers bound them with a timeout and treat any failure as
/// "no advisory".
#[async_trait]
pub trait ExplanationGenerator: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &str;

    /// Produce advisory text for a scored profile
    async fn explain(&self, request: &ExplanationRequest) -> AdvisoryResult<String>;
}
