//! Lender-facing view of an assessment

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::policy::{LenderPolicy, ScoringPolicy, MAX_SCORE};
use crate::RiskAssessment;

/// Full certainty, the ceiling confidence is measured down from
const FULL_CONFIDENCE: f64 = 100.0;

/// Debt ratio to percentage points
const RATIO_TO_PCT: f64 = 100.0;

/// Approval band for the lender view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Approval {
    Approve,
    ApproveWithConditions,
    ManualReview,
}

impl Approval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Approval::Approve => "Approve",
            Approval::ApproveWithConditions => "ApproveWithConditions",
            Approval::ManualReview => "ManualReview",
        }
    }
}

impl fmt::Display for Approval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default probability, approval band and confidence for one assessment
///
/// Values keep full precision; rounding is a presentation concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LenderInsight {
    /// Percentage, never below the policy floor
    pub probability_of_default: f64,

    pub approval: Approval,

    /// Peaks at the balanced debt ratio, never above the policy cap
    pub confidence_score: f64,
}

/// Maps assessments to lender insights
#[derive(Debug, Clone, Default)]
pub struct LenderInsightDeriver {
    policy: LenderPolicy,
}

impl LenderInsightDeriver {
    pub fn new(policy: LenderPolicy) -> Self {
        Self { policy }
    }

    /// Use the lender section of a full scoring policy
    pub fn from_policy(policy: &ScoringPolicy) -> Self {
        Self::new(policy.lender.clone())
    }

    /// Derive the lender view
    ///
    /// # Example
    ///
    /// ```
    /// use msme_risk::{Approval, LenderInsightDeriver, RiskAssessment, RiskTier};
    ///
    /// let assessment = RiskAssessment {
    ///     score: 40,
    ///     tier: RiskTier::High,
    ///     debt_ratio: 0.6,
    ///     surplus: -10_000.0,
    ///     recommended_loan: -60_000.0,
    /// };
    ///
    /// let insight = LenderInsightDeriver::default().derive(&assessment);
    /// assert_eq!(insight.probability_of_default, 60.0);
    /// assert_eq!(insight.approval, Approval::ManualReview);
    /// assert!((insight.confidence_score - 90.0).abs() < 1e-9);
    /// ```
    pub fn derive(&self, assessment: &RiskAssessment) -> LenderInsight {
        let score = f64::from(assessment.score);
        let probability_of_default = (f64::from(MAX_SCORE) - score).max(self.policy.pd_floor);

        let approval = if assessment.score >= self.policy.approve_at {
            Approval::Approve
        } else if assessment.score >= self.policy.conditional_approve_at {
            Approval::ApproveWithConditions
        } else {
            Approval::ManualReview
        };

        let distance = (assessment.debt_ratio * RATIO_TO_PCT - self.policy.balanced_debt_ratio_pct).abs();
        let confidence_score = (FULL_CONFIDENCE - distance).min(self.policy.confidence_cap);

        LenderInsight {
            probability_of_default,
            approval,
            confidence_score,
        }
    }
}
