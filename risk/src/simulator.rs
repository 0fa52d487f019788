//! What-if scenario simulation
//!
//! A scenario scales revenue, expenses and EMI by percentages and re-scores
//! the adjusted profile with the same `RiskScorer`. Debt and volatility are
//! never touched by a scenario.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::RiskScorer;
use crate::error::{RiskError, RiskResult};
use crate::profile::FinancialProfile;
use crate::RiskAssessment;

const PERCENT: f64 = 100.0;

/// Hypothetical percentage adjustments
///
/// Negative values describe an adverse scenario, e.g. a revenue decline.
/// All three fields are required on the wire; use `none()` for a null scenario.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDelta {
    pub revenue_increase_pct: f64,
    pub expense_reduction_pct: f64,
    pub emi_reduction_pct: f64,
}

impl ScenarioDelta {
    pub fn new(revenue_increase_pct: f64, expense_reduction_pct: f64, emi_reduction_pct: f64) -> Self {
        Self {
            revenue_increase_pct,
            expense_reduction_pct,
            emi_reduction_pct,
        }
    }

    /// The null scenario
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.revenue_increase_pct == 0.0
            && self.expense_reduction_pct == 0.0
            && self.emi_reduction_pct == 0.0
    }

    fn validate(&self) -> RiskResult<()> {
        for (field, value) in [
            ("revenueIncreasePct", self.revenue_increase_pct),
            ("expenseReductionPct", self.expense_reduction_pct),
            ("emiReductionPct", self.emi_reduction_pct),
        ] {
            if !value.is_finite() {
                return Err(RiskError::invalid_input(field, format!("{} is not finite", value)));
            }
        }
        Ok(())
    }
}

/// Baseline and scenario assessments side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub baseline: RiskAssessment,
    pub scenario: RiskAssessment,
}

impl ScenarioComparison {
    /// Scenario score minus baseline score
    pub fn score_change(&self) -> i64 {
        i64::from(self.scenario.score) - i64::from(self.baseline.score)
    }

    pub fn surplus_change(&self) -> f64 {
        self.scenario.surplus - self.baseline.surplus
    }

    pub fn recommended_loan_change(&self) -> f64 {
        self.scenario.recommended_loan - self.baseline.recommended_loan
    }

    pub fn tier_changed(&self) -> bool {
        self.scenario.tier != self.baseline.tier
    }
}

/// Re-scores profiles under scenario deltas
#[derive(Debug, Clone, Copy)]
pub struct ScenarioSimulator<'a> {
    scorer: &'a RiskScorer,
}

impl<'a> ScenarioSimulator<'a> {
    pub fn new(scorer: &'a RiskScorer) -> Self {
        Self { scorer }
    }

    /// Build the adjusted profile
    ///
    /// The result passes the usual profile validation, so a revenue cut
    /// beyond -100% is rejected as invalid input.
    pub fn adjust(&self, base: &FinancialProfile, delta: &ScenarioDelta) -> RiskResult<FinancialProfile> {
        delta.validate()?;

        FinancialProfile::new(
            base.revenue() * (1.0 + delta.revenue_increase_pct / PERCENT),
            base.expenses() * (1.0 - delta.expense_reduction_pct / PERCENT),
            base.debt(),
            base.emi() * (1.0 - delta.emi_reduction_pct / PERCENT),
            base.volatility(),
        )
    }

    /// Score the adjusted profile
    ///
    /// A zero delta reproduces `RiskScorer::score` on the base profile
    /// exactly. Scorer errors on the adjusted profile propagate unchanged.
    pub fn simulate(&self, base: &FinancialProfile, delta: &ScenarioDelta) -> RiskResult<RiskAssessment> {
        let adjusted = self.adjust(base, delta)?;
        debug!(
            revenue = adjusted.revenue(),
            expenses = adjusted.expenses(),
            emi = adjusted.emi(),
            "Simulating scenario"
        );
        self.scorer.score(&adjusted)
    }

    /// Score both the base and the adjusted profile
    pub fn compare(&self, base: &FinancialProfile, delta: &ScenarioDelta) -> RiskResult<ScenarioComparison> {
        Ok(ScenarioComparison {
            baseline: self.scorer.score(base)?,
            scenario: self.simulate(base, delta)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RiskTier, Volatility};
    use approx::assert_relative_eq;

    fn base() -> FinancialProfile {
        FinancialProfile::new(100_000.0, 60_000.0, 40_000.0, 10_000.0, Volatility::Medium).unwrap()
    }

    #[test]
    fn test_null_scenario_matches_direct_score() {
        let scorer = RiskScorer::new();
        let sim = ScenarioSimulator::new(&scorer);

        let direct = scorer.score(&base()).unwrap();
        let simulated = sim.simulate(&base(), &ScenarioDelta::none()).unwrap();

        assert_eq!(direct, simulated);
        assert_eq!(direct.debt_ratio.to_bits(), simulated.debt_ratio.to_bits());
        assert_eq!(direct.surplus.to_bits(), simulated.surplus.to_bits());
    }

    #[test]
    fn test_revenue_and_expense_improvement() {
        let scorer = RiskScorer::new();
        let sim = ScenarioSimulator::new(&scorer);
        let delta = ScenarioDelta::new(10.0, 10.0, 0.0);

        let adjusted = sim.adjust(&base(), &delta).unwrap();
        assert_relative_eq!(adjusted.revenue(), 110_000.0, epsilon = 1e-6);
        assert_relative_eq!(adjusted.expenses(), 54_000.0, epsilon = 1e-6);
        assert_eq!(adjusted.emi(), 10_000.0);
        assert_eq!(adjusted.debt(), 40_000.0);

        let a = sim.simulate(&base(), &delta).unwrap();
        assert_relative_eq!(a.debt_ratio, 0.3636, epsilon = 1e-4);
        assert_relative_eq!(a.surplus, 46_000.0, epsilon = 1e-6);
        assert_eq!(a.score, 92);
        assert_eq!(a.tier, RiskTier::Low);
        assert_relative_eq!(a.recommended_loan, 276_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_debt_and_volatility_unchanged() {
        let scorer = RiskScorer::new();
        let sim = ScenarioSimulator::new(&scorer);
        let adjusted = sim.adjust(&base(), &ScenarioDelta::new(50.0, 50.0, 50.0)).unwrap();
        assert_eq!(adjusted.debt(), base().debt());
        assert_eq!(adjusted.volatility(), base().volatility());
    }

    #[test]
    fn test_adverse_scenario() {
        let scorer = RiskScorer::new();
        let sim = ScenarioSimulator::new(&scorer);

        // Revenue falls 25%: debt ratio 0.533, surplus 5000
        let comparison = sim.compare(&base(), &ScenarioDelta::new(-25.0, 0.0, 0.0)).unwrap();
        assert_eq!(comparison.baseline.score, 92);
        assert_eq!(comparison.scenario.score, 72);
        assert_eq!(comparison.score_change(), -20);
        assert!(comparison.tier_changed());
        assert_eq!(comparison.scenario.tier, RiskTier::Moderate);
        assert!(comparison.surplus_change() < 0.0);
    }

    #[test]
    fn test_full_revenue_loss_is_division_by_zero() {
        let scorer = RiskScorer::new();
        let sim = ScenarioSimulator::new(&scorer);
        let err = sim.simulate(&base(), &ScenarioDelta::new(-100.0, 0.0, 0.0)).unwrap_err();
        assert!(err.is_division_by_zero());
    }

    #[test]
    fn test_revenue_below_zero_is_invalid_input() {
        let scorer = RiskScorer::new();
        let sim = ScenarioSimulator::new(&scorer);
        let err = sim.simulate(&base(), &ScenarioDelta::new(-150.0, 0.0, 0.0)).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(!err.is_division_by_zero());
        assert_eq!(err.field(), Some("revenue"));
    }

    #[test]
    fn test_non_finite_delta_rejected() {
        let scorer = RiskScorer::new();
        let sim = ScenarioSimulator::new(&scorer);
        let err = sim.simulate(&base(), &ScenarioDelta::new(f64::NAN, 0.0, 0.0)).unwrap_err();
        assert_eq!(err.field(), Some("revenueIncreasePct"));
    }

    #[test]
    fn test_delta_deserialization_requires_all_fields() {
        assert!(serde_json::from_str::<ScenarioDelta>("{}").is_err());
        assert!(serde_json::from_str::<ScenarioDelta>(r#"{"emiReductionPct": 25}"#).is_err());

        let delta: ScenarioDelta = serde_json::from_str(
            r#"{"revenueIncreasePct": 0, "expenseReductionPct": 0, "emiReductionPct": 25}"#,
        )
        .unwrap();
        assert_eq!(delta, ScenarioDelta::new(0.0, 0.0, 25.0));
        assert!(!delta.is_none());
        assert!(ScenarioDelta::none().is_none());
    }
}
