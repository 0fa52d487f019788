//! Scoring policy definitions and configuration
//!
//! Every numeric constant the engine uses lives here: rule deductions,
//! tier thresholds, the loan multiplier, the lender-view constants and the
//! health-metric scales. A policy is typically the built-in default, but it
//! can be loaded from YAML or JSON so the constants can be tuned and tested
//! independently of the rule control flow.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RiskError, RiskResult};

/// Score every profile starts from before deductions
pub const MAX_SCORE: u32 = 100;

/// Debt ratio above which the leverage deduction applies
pub const DEBT_RATIO_THRESHOLD: f64 = 0.5;
/// Points removed when the debt ratio exceeds the threshold
pub const HIGH_DEBT_DEDUCTION: u32 = 20;
/// Points removed when the surplus is negative
pub const NEGATIVE_SURPLUS_DEDUCTION: u32 = 25;
/// Points removed for high cashflow volatility
pub const HIGH_VOLATILITY_DEDUCTION: u32 = 15;
/// Points removed for medium cashflow volatility
pub const MEDIUM_VOLATILITY_DEDUCTION: u32 = 8;

/// Scores strictly below this are Critical
pub const CRITICAL_BELOW: u32 = 40;
/// Scores strictly below this are High
pub const HIGH_BELOW: u32 = 60;
/// Scores strictly below this are Moderate; 80 and above is Low
pub const MODERATE_BELOW: u32 = 80;

/// Months of surplus offered as the recommended loan
pub const LOAN_SURPLUS_MULTIPLIER: f64 = 6.0;

/// Probability of default never drops below this percentage
pub const PD_FLOOR: f64 = 5.0;
/// Lowest score that is approved outright
pub const APPROVE_AT: u32 = 80;
/// Lowest score that is approved with conditions
pub const CONDITIONAL_APPROVE_AT: u32 = 65;
/// Confidence is never reported above this value
pub const CONFIDENCE_CAP: f64 = 95.0;
/// Debt ratio (in percent) at which confidence peaks
pub const BALANCED_DEBT_RATIO_PCT: f64 = 50.0;

/// Surplus that maps to a full cashflow-strength axis
pub const CASHFLOW_REFERENCE: f64 = 100_000.0;
/// Multiplier applied to the surplus/EMI coverage ratio
pub const REPAYMENT_SCALE: f64 = 10.0;
/// Added to EMI before dividing so a zero EMI stays defined
pub const EMI_GUARD: f64 = 1.0;
/// No health axis is ever drawn below this value
pub const AXIS_FLOOR: f64 = 10.0;
/// Ceiling for the ratio-based health axes
pub const AXIS_CAP: f64 = 100.0;
/// Stability axis for low volatility
pub const STABILITY_LOW: f64 = 90.0;
/// Stability axis for medium volatility
pub const STABILITY_MEDIUM: f64 = 70.0;
/// Stability axis for high volatility
pub const STABILITY_HIGH: f64 = 50.0;

/// Complete scoring policy
///
/// Any section left out of a policy document falls back to its default,
/// so a YAML file only needs to carry the values it changes.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ScoringPolicy {
    /// Rule deductions
    #[serde(default)]
    pub deductions: DeductionRules,

    /// Score to tier mapping
    #[serde(default)]
    pub tiers: TierThresholds,

    /// Loan sizing
    #[serde(default)]
    pub loan: LoanPolicy,

    /// Lender-facing insight constants
    #[serde(default)]
    pub lender: LenderPolicy,

    /// Health vector scales
    #[serde(default)]
    pub health: HealthPolicy,
}

/// Points deducted by each scoring rule
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeductionRules {
    /// Debt ratio strictly above this triggers `high_debt`
    #[serde(default = "default_debt_ratio_threshold")]
    pub debt_ratio_threshold: f64,

    #[serde(default = "default_high_debt")]
    pub high_debt: u32,

    #[serde(default = "default_negative_surplus")]
    pub negative_surplus: u32,

    #[serde(default = "default_high_volatility")]
    pub high_volatility: u32,

    #[serde(default = "default_medium_volatility")]
    pub medium_volatility: u32,
}

/// Exclusive upper bounds of each tier, checked from most severe upward
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TierThresholds {
    #[serde(default = "default_critical_below")]
    pub critical_below: u32,

    #[serde(default = "default_high_below")]
    pub high_below: u32,

    #[serde(default = "default_moderate_below")]
    pub moderate_below: u32,
}

/// Recommended loan sizing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoanPolicy {
    /// `recommended_loan = surplus * surplus_multiplier`
    #[serde(default = "default_surplus_multiplier")]
    pub surplus_multiplier: f64,
}

/// Constants for the lender-facing view
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LenderPolicy {
    #[serde(default = "default_pd_floor")]
    pub pd_floor: f64,

    #[serde(default = "default_approve_at")]
    pub approve_at: u32,

    #[serde(default = "default_conditional_approve_at")]
    pub conditional_approve_at: u32,

    #[serde(default = "default_confidence_cap")]
    pub confidence_cap: f64,

    #[serde(default = "default_balanced_debt_ratio_pct")]
    pub balanced_debt_ratio_pct: f64,
}

/// Scales for the five health axes
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HealthPolicy {
    #[serde(default = "default_cashflow_reference")]
    pub cashflow_reference: f64,

    #[serde(default = "default_repayment_scale")]
    pub repayment_scale: f64,

    #[serde(default = "default_emi_guard")]
    pub emi_guard: f64,

    #[serde(default = "default_axis_floor")]
    pub axis_floor: f64,

    #[serde(default = "default_axis_cap")]
    pub axis_cap: f64,

    #[serde(default)]
    pub stability: StabilityScores,
}

/// Stability axis lookup by volatility level
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StabilityScores {
    #[serde(default = "default_stability_low")]
    pub low: f64,

    #[serde(default = "default_stability_medium")]
    pub medium: f64,

    #[serde(default = "default_stability_high")]
    pub high: f64,
}

// Default value functions
fn default_debt_ratio_threshold() -> f64 {
    DEBT_RATIO_THRESHOLD
}

fn default_high_debt() -> u32 {
    HIGH_DEBT_DEDUCTION
}

fn default_negative_surplus() -> u32 {
    NEGATIVE_SURPLUS_DEDUCTION
}

fn default_high_volatility() -> u32 {
    HIGH_VOLATILITY_DEDUCTION
}

fn default_medium_volatility() -> u32 {
    MEDIUM_VOLATILITY_DEDUCTION
}

fn default_critical_below() -> u32 {
    CRITICAL_BELOW
}

fn default_high_below() -> u32 {
    HIGH_BELOW
}

fn default_moderate_below() -> u32 {
    MODERATE_BELOW
}

fn default_surplus_multiplier() -> f64 {
    LOAN_SURPLUS_MULTIPLIER
}

fn default_pd_floor() -> f64 {
    PD_FLOOR
}

fn default_approve_at() -> u32 {
    APPROVE_AT
}

fn default_conditional_approve_at() -> u32 {
    CONDITIONAL_APPROVE_AT
}

fn default_confidence_cap() -> f64 {
    CONFIDENCE_CAP
}

fn default_balanced_debt_ratio_pct() -> f64 {
    BALANCED_DEBT_RATIO_PCT
}

fn default_cashflow_reference() -> f64 {
    CASHFLOW_REFERENCE
}

fn default_repayment_scale() -> f64 {
    REPAYMENT_SCALE
}

fn default_emi_guard() -> f64 {
    EMI_GUARD
}

fn default_axis_floor() -> f64 {
    AXIS_FLOOR
}

fn default_axis_cap() -> f64 {
    AXIS_CAP
}

fn default_stability_low() -> f64 {
    STABILITY_LOW
}

fn default_stability_medium() -> f64 {
    STABILITY_MEDIUM
}

fn default_stability_high() -> f64 {
    STABILITY_HIGH
}

impl Default for DeductionRules {
    fn default() -> Self {
        Self {
            debt_ratio_threshold: default_debt_ratio_threshold(),
            high_debt: default_high_debt(),
            negative_surplus: default_negative_surplus(),
            high_volatility: default_high_volatility(),
            medium_volatility: default_medium_volatility(),
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            critical_below: default_critical_below(),
            high_below: default_high_below(),
            moderate_below: default_moderate_below(),
        }
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            surplus_multiplier: default_surplus_multiplier(),
        }
    }
}

impl Default for LenderPolicy {
    fn default() -> Self {
        Self {
            pd_floor: default_pd_floor(),
            approve_at: default_approve_at(),
            conditional_approve_at: default_conditional_approve_at(),
            confidence_cap: default_confidence_cap(),
            balanced_debt_ratio_pct: default_balanced_debt_ratio_pct(),
        }
    }
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            cashflow_reference: default_cashflow_reference(),
            repayment_scale: default_repayment_scale(),
            emi_guard: default_emi_guard(),
            axis_floor: default_axis_floor(),
            axis_cap: default_axis_cap(),
            stability: StabilityScores::default(),
        }
    }
}

impl Default for StabilityScores {
    fn default() -> Self {
        Self {
            low: default_stability_low(),
            medium: default_stability_medium(),
            high: default_stability_high(),
        }
    }
}

impl ScoringPolicy {
    /// Load a policy from a YAML string
    ///
    /// # Example
    ///
    /// ```
    /// use msme_risk::ScoringPolicy;
    ///
    /// let yaml = r#"
    /// loan:
    ///   surplus_multiplier: 4.0
    /// "#;
    ///
    /// let policy = ScoringPolicy::from_yaml(yaml).unwrap();
    /// assert_eq!(policy.loan.surplus_multiplier, 4.0);
    /// assert_eq!(policy.tiers.moderate_below, 80);
    /// ```
    pub fn from_yaml(yaml: &str) -> RiskResult<Self> {
        let policy: ScoringPolicy = serde_yaml::from_str(yaml)
            .map_err(|e| RiskError::Policy(format!("Failed to parse YAML: {}", e)))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy from a JSON string
    pub fn from_json(json: &str) -> RiskResult<Self> {
        let policy: ScoringPolicy = serde_json::from_str(json)
            .map_err(|e| RiskError::Policy(format!("Failed to parse JSON: {}", e)))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> RiskResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serialize the policy to YAML
    pub fn to_yaml(&self) -> RiskResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RiskError::Policy(format!("Failed to serialize YAML: {}", e)))
    }

    /// Check the policy for internal consistency
    ///
    /// Tier bounds must be strictly increasing and within the score range,
    /// every float must be finite, and the health axis floor may not exceed
    /// its cap.
    pub fn validate(&self) -> RiskResult<()> {
        let tiers = &self.tiers;
        if !(tiers.critical_below < tiers.high_below && tiers.high_below < tiers.moderate_below) {
            return Err(RiskError::Policy(format!(
                "tier bounds must be strictly increasing, got {} / {} / {}",
                tiers.critical_below, tiers.high_below, tiers.moderate_below
            )));
        }
        if tiers.moderate_below > MAX_SCORE {
            return Err(RiskError::Policy(format!(
                "moderate_below {} exceeds max score {}",
                tiers.moderate_below, MAX_SCORE
            )));
        }

        let d = &self.deductions;
        let points = [
            ("deductions.high_debt", d.high_debt),
            ("deductions.negative_surplus", d.negative_surplus),
            ("deductions.high_volatility", d.high_volatility),
            ("deductions.medium_volatility", d.medium_volatility),
        ];
        for (name, value) in points {
            if value > MAX_SCORE {
                return Err(RiskError::Policy(format!(
                    "{} {} exceeds max score {}",
                    name, value, MAX_SCORE
                )));
            }
        }

        if self.lender.conditional_approve_at > self.lender.approve_at {
            return Err(RiskError::Policy(format!(
                "conditional_approve_at {} exceeds approve_at {}",
                self.lender.conditional_approve_at, self.lender.approve_at
            )));
        }

        let floats = [
            ("deductions.debt_ratio_threshold", self.deductions.debt_ratio_threshold),
            ("loan.surplus_multiplier", self.loan.surplus_multiplier),
            ("lender.pd_floor", self.lender.pd_floor),
            ("lender.confidence_cap", self.lender.confidence_cap),
            ("lender.balanced_debt_ratio_pct", self.lender.balanced_debt_ratio_pct),
            ("health.cashflow_reference", self.health.cashflow_reference),
            ("health.repayment_scale", self.health.repayment_scale),
            ("health.emi_guard", self.health.emi_guard),
            ("health.axis_floor", self.health.axis_floor),
            ("health.axis_cap", self.health.axis_cap),
            ("health.stability.low", self.health.stability.low),
            ("health.stability.medium", self.health.stability.medium),
            ("health.stability.high", self.health.stability.high),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(RiskError::Policy(format!("{} must be finite", name)));
            }
        }

        if self.health.cashflow_reference <= 0.0 {
            return Err(RiskError::Policy(
                "health.cashflow_reference must be positive".to_string(),
            ));
        }
        if self.health.emi_guard <= 0.0 {
            return Err(RiskError::Policy(
                "health.emi_guard must be positive".to_string(),
            ));
        }
        if self.health.axis_floor > self.health.axis_cap {
            return Err(RiskError::Policy(format!(
                "health.axis_floor {} exceeds health.axis_cap {}",
                self.health.axis_floor, self.health.axis_cap
            )));
        }

        Ok(())
    }
}
