//! Rule-based risk scoring
//!
//! This module holds the only implementation of the scoring rules. The
//! scenario simulator and every other caller go through `RiskScorer`, so
//! live and what-if results cannot drift apart.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{RiskError, RiskResult};
use crate::policy::{ScoringPolicy, MAX_SCORE};
use crate::profile::{FinancialProfile, Volatility};
use crate::{RiskAssessment, RiskTier};

/// Scoring rule that can remove points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringRule {
    /// Debt ratio above the policy threshold
    DebtRatio,
    /// Expenses and EMI exceed revenue
    NegativeSurplus,
    /// Medium or high cashflow volatility
    Volatility,
}

impl ScoringRule {
    pub fn name(&self) -> &'static str {
        match self {
            ScoringRule::DebtRatio => "DebtRatio",
            ScoringRule::NegativeSurplus => "NegativeSurplus",
            ScoringRule::Volatility => "Volatility",
        }
    }
}

/// Points removed by one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub rule: ScoringRule,
    pub points: u32,
}

/// Assessment together with the deductions that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub assessment: RiskAssessment,

    /// Applied deductions in rule order; rules that removed nothing are omitted
    pub deductions: Vec<Deduction>,
}

impl ScoreBreakdown {
    /// Sum of all deducted points, before clamping; saturates at `u32::MAX`
    pub fn total_deducted(&self) -> u32 {
        self.deductions
            .iter()
            .fold(0, |total: u32, d| total.saturating_add(d.points))
    }
}

/// Deterministic risk scorer
///
/// Holds only its policy; scoring never mutates the scorer, so one
/// instance can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    policy: ScoringPolicy,
}

impl RiskScorer {
    /// Create a scorer with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer from a custom policy
    ///
    /// Fails when the policy is internally inconsistent.
    pub fn with_policy(policy: ScoringPolicy) -> RiskResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Load the policy from a YAML string
    ///
    /// # Example
    ///
    /// ```
    /// use msme_risk::RiskScorer;
    ///
    /// let yaml = r#"
    /// deductions:
    ///   medium_volatility: 10
    /// "#;
    ///
    /// let scorer = RiskScorer::from_yaml(yaml).unwrap();
    /// assert_eq!(scorer.policy().deductions.medium_volatility, 10);
    /// ```
    pub fn from_yaml(yaml: &str) -> RiskResult<Self> {
        Ok(Self {
            policy: ScoringPolicy::from_yaml(yaml)?,
        })
    }

    /// Load the policy from a JSON string
    pub fn from_json(json: &str) -> RiskResult<Self> {
        Ok(Self {
            policy: ScoringPolicy::from_json(json)?,
        })
    }

    /// Load the policy from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> RiskResult<Self> {
        Ok(Self {
            policy: ScoringPolicy::from_yaml_file(path)?,
        })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score a profile
    ///
    /// # Example
    ///
    /// ```
    /// use msme_risk::{FinancialProfile, RiskScorer, RiskTier, Volatility};
    ///
    /// let profile = FinancialProfile::new(100_000.0, 80_000.0, 60_000.0, 30_000.0, Volatility::High).unwrap();
    /// let assessment = RiskScorer::default().score(&profile).unwrap();
    ///
    /// assert_eq!(assessment.score, 40); // 100 - 20 - 25 - 15
    /// assert_eq!(assessment.tier, RiskTier::High);
    /// assert_eq!(assessment.recommended_loan, -60_000.0);
    /// ```
    ///
    /// # Errors
    ///
    /// `DivisionByZero` when revenue is zero. Other invalid input is ruled
    /// out when the profile is constructed.
    pub fn score(&self, profile: &FinancialProfile) -> RiskResult<RiskAssessment> {
        self.score_detailed(profile).map(|b| b.assessment)
    }

    /// Score a profile and report which rules removed points
    pub fn score_detailed(&self, profile: &FinancialProfile) -> RiskResult<ScoreBreakdown> {
        if profile.revenue() == 0.0 {
            return Err(RiskError::division_by_zero("revenue"));
        }

        let rules = &self.policy.deductions;
        let debt_ratio = profile.debt() / profile.revenue();
        let surplus = profile.revenue() - profile.expenses() - profile.emi();

        let mut deductions = Vec::new();

        if debt_ratio > rules.debt_ratio_threshold {
            deductions.push(Deduction {
                rule: ScoringRule::DebtRatio,
                points: rules.high_debt,
            });
        }

        if surplus < 0.0 {
            deductions.push(Deduction {
                rule: ScoringRule::NegativeSurplus,
                points: rules.negative_surplus,
            });
        }

        let volatility_points = match profile.volatility() {
            Volatility::High => rules.high_volatility,
            Volatility::Medium => rules.medium_volatility,
            Volatility::Low => 0,
        };
        if volatility_points > 0 {
            deductions.push(Deduction {
                rule: ScoringRule::Volatility,
                points: volatility_points,
            });
        }

        let score = deductions
            .iter()
            .fold(MAX_SCORE, |score, d| score.saturating_sub(d.points));
        let tier = RiskTier::from_score(score, &self.policy.tiers);
        let recommended_loan = surplus * self.policy.loan.surplus_multiplier;

        debug!(
            score,
            %tier,
            debt_ratio,
            surplus,
            deductions = deductions.len(),
            "Scored profile"
        );

        Ok(ScoreBreakdown {
            assessment: RiskAssessment {
                score,
                tier,
                debt_ratio,
                surplus,
                recommended_loan,
            },
            deductions,
        })
    }
}
