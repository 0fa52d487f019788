//! # msme-risk: Deterministic MSME Credit Risk Engine
//!
//! This library scores micro, small and medium enterprises from a handful of
//! cashflow inputs. Everything here is a pure function of its inputs: the
//! same profile always yields bit-identical outputs, which is what makes the
//! score auditable.
//!
//! ## Core Components
//!
//! - **RiskScorer**: Fixed deduction rules producing a score, tier and loan size
//! - **ScenarioSimulator**: "What-if" re-scoring under percentage adjustments
//! - **LenderInsightDeriver**: Default probability, approval band and confidence
//! - **HealthMetricsCalculator**: Five-axis health vector for radar charts
//! - **ScoringPolicy**: Every numeric constant, loadable from YAML/JSON
//!
//! ## Example Usage
//!
//! ```rust
//! use msme_risk::{FinancialProfile, RiskScorer, RiskTier, ScenarioDelta, ScenarioSimulator, Volatility};
//!
//! let profile = FinancialProfile::new(100_000.0, 60_000.0, 40_000.0, 10_000.0, Volatility::Medium).unwrap();
//!
//! let scorer = RiskScorer::default();
//! let assessment = scorer.score(&profile).unwrap();
//! assert_eq!(assessment.score, 92);
//! assert_eq!(assessment.tier, RiskTier::Low);
//! assert_eq!(assessment.recommended_loan, 180_000.0);
//!
//! // Grow revenue 10% and trim expenses 10%
//! let simulator = ScenarioSimulator::new(&scorer);
//! let what_if = simulator
//!     .simulate(&profile, &ScenarioDelta::new(10.0, 10.0, 0.0))
//!     .unwrap();
//! assert_eq!(what_if.score, 92);
//! assert_eq!(what_if.surplus, 46_000.0);
//! ```

mod engine;
mod error;
mod health;
mod lender;
mod policy;
mod profile;
mod simulator;

pub use engine::{Deduction, RiskScorer, ScoreBreakdown, ScoringRule};
pub use error::{RiskError, RiskResult};
pub use health::{HealthMetricsCalculator, HealthVector, AXIS_LABELS};
pub use lender::{Approval, LenderInsight, LenderInsightDeriver};
pub use policy::{
    DeductionRules, HealthPolicy, LenderPolicy, LoanPolicy, ScoringPolicy, StabilityScores,
    TierThresholds,
};
pub use profile::{FinancialProfile, Volatility};
pub use simulator::{ScenarioComparison, ScenarioDelta, ScenarioSimulator};

/// Named defaults backing [`ScoringPolicy::default`]
pub mod constants {
    pub use crate::policy::{
        APPROVE_AT, AXIS_CAP, AXIS_FLOOR, BALANCED_DEBT_RATIO_PCT, CASHFLOW_REFERENCE,
        CONDITIONAL_APPROVE_AT, CONFIDENCE_CAP, CRITICAL_BELOW, DEBT_RATIO_THRESHOLD, EMI_GUARD,
        HIGH_BELOW, HIGH_DEBT_DEDUCTION, HIGH_VOLATILITY_DEDUCTION, LOAN_SURPLUS_MULTIPLIER,
        MAX_SCORE, MEDIUM_VOLATILITY_DEDUCTION, MODERATE_BELOW, NEGATIVE_SURPLUS_DEDUCTION,
        PD_FLOOR, REPAYMENT_SCALE, STABILITY_HIGH, STABILITY_LOW, STABILITY_MEDIUM,
    };
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse risk category derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskTier {
    /// Map a score to its tier
    ///
    /// Bounds are exclusive and checked from most severe upward, first
    /// match wins, so with the defaults 40 is High, 60 is Moderate and 80
    /// is the lowest Low score.
    pub fn from_score(score: u32, thresholds: &TierThresholds) -> Self {
        if score < thresholds.critical_below {
            RiskTier::Critical
        } else if score < thresholds.high_below {
            RiskTier::High
        } else if score < thresholds.moderate_below {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    /// Severity rank, 0 for Low up to 3 for Critical
    pub fn severity(&self) -> u8 {
        match self {
            RiskTier::Low => 0,
            RiskTier::Moderate => 1,
            RiskTier::High => 2,
            RiskTier::Critical => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring one profile
///
/// `score` lies in `[0, 100]` and `tier` is a function of it alone. Anyone
/// constructing an assessment by hand must keep both true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Rule-based score, 100 minus applied deductions, floored at 0
    pub score: u32,

    /// Tier for `score`
    pub tier: RiskTier,

    /// Debt divided by revenue
    pub debt_ratio: f64,

    /// Revenue minus expenses minus EMI, negative when cashflow is short
    pub surplus: f64,

    /// Surplus times the loan multiplier, negative alongside the surplus
    pub recommended_loan: f64,
}
