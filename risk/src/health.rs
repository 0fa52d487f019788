//! Five-axis health vector for radar-chart comparison
//!
//! Axis order is fixed: cashflow strength, debt exposure, stability,
//! repayment capacity, growth readiness. Every axis is floored so a weak
//! profile never collapses an axis to zero on the chart.

use serde::{Deserialize, Serialize};

use crate::policy::{HealthPolicy, ScoringPolicy};
use crate::profile::{FinancialProfile, Volatility};
use crate::RiskAssessment;

const RATIO_TO_PCT: f64 = 100.0;

/// Chart labels, in axis order
pub const AXIS_LABELS: [&str; 5] = [
    "Cashflow Strength",
    "Debt Exposure",
    "Stability",
    "Repayment Capacity",
    "Growth Readiness",
];

/// Health metrics for one assessment
///
/// Serializes as a plain five-element array in axis order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 5]", into = "[f64; 5]")]
pub struct HealthVector {
    pub cashflow_strength: f64,
    pub debt_exposure: f64,
    pub stability: f64,
    pub repayment_capacity: f64,
    pub growth_readiness: f64,
}

impl HealthVector {
    /// Values in axis order
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.cashflow_strength,
            self.debt_exposure,
            self.stability,
            self.repayment_capacity,
            self.growth_readiness,
        ]
    }

    /// `(label, value)` pairs in axis order
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, f64)> {
        AXIS_LABELS.into_iter().zip(self.as_array())
    }
}

impl From<[f64; 5]> for HealthVector {
    fn from(values: [f64; 5]) -> Self {
        let [cashflow_strength, debt_exposure, stability, repayment_capacity, growth_readiness] = values;
        Self {
            cashflow_strength,
            debt_exposure,
            stability,
            repayment_capacity,
            growth_readiness,
        }
    }
}

impl From<HealthVector> for [f64; 5] {
    fn from(vector: HealthVector) -> Self {
        vector.as_array()
    }
}

/// Computes health vectors
#[derive(Debug, Clone, Default)]
pub struct HealthMetricsCalculator {
    policy: HealthPolicy,
}

impl HealthMetricsCalculator {
    pub fn new(policy: HealthPolicy) -> Self {
        Self { policy }
    }

    /// Use the health section of a full scoring policy
    pub fn from_policy(policy: &ScoringPolicy) -> Self {
        Self::new(policy.health.clone())
    }

    /// Compute the health vector for an assessment and the profile it came from
    pub fn health_vector(&self, assessment: &RiskAssessment, profile: &FinancialProfile) -> HealthVector {
        let p = &self.policy;

        let cashflow_strength =
            (assessment.surplus / p.cashflow_reference * RATIO_TO_PCT).min(p.axis_cap);
        let debt_exposure = RATIO_TO_PCT - assessment.debt_ratio * RATIO_TO_PCT;
        let stability = match profile.volatility() {
            Volatility::Low => p.stability.low,
            Volatility::Medium => p.stability.medium,
            Volatility::High => p.stability.high,
        };
        let repayment_capacity =
            (assessment.surplus / (profile.emi() + p.emi_guard) * p.repayment_scale).min(p.axis_cap);
        let growth_readiness = f64::from(assessment.score);

        HealthVector {
            cashflow_strength: cashflow_strength.max(p.axis_floor),
            debt_exposure: debt_exposure.max(p.axis_floor),
            stability: stability.max(p.axis_floor),
            repayment_capacity: repayment_capacity.max(p.axis_floor),
            growth_readiness: growth_readiness.max(p.axis_floor),
        }
    }
}
