//! Property tests for the scoring invariants

use msme_risk::{
    FinancialProfile, HealthMetricsCalculator, LenderInsightDeriver, RiskScorer, RiskTier,
    ScenarioDelta, ScenarioSimulator, TierThresholds, Volatility,
};
use proptest::prelude::*;

fn volatility() -> impl Strategy<Value = Volatility> {
    prop_oneof![
        Just(Volatility::Low),
        Just(Volatility::Medium),
        Just(Volatility::High),
    ]
}

prop_compose! {
    fn profile()(
        revenue in 1.0f64..10_000_000.0,
        expenses in 0.0f64..10_000_000.0,
        debt in 0.0f64..20_000_000.0,
        emi in 0.0f64..5_000_000.0,
        volatility in volatility(),
    ) -> FinancialProfile {
        FinancialProfile::new(revenue, expenses, debt, emi, volatility).unwrap()
    }
}

proptest! {
    #[test]
    fn debt_ratio_is_exact_division(p in profile()) {
        let a = RiskScorer::default().score(&p).unwrap();
        prop_assert_eq!(a.debt_ratio, p.debt() / p.revenue());
    }

    #[test]
    fn score_stays_in_range(p in profile()) {
        let a = RiskScorer::default().score(&p).unwrap();
        prop_assert!(a.score <= 100);
        prop_assert_eq!(a.tier, RiskTier::from_score(a.score, &TierThresholds::default()));
    }

    #[test]
    fn recommended_loan_is_six_times_surplus(p in profile()) {
        let a = RiskScorer::default().score(&p).unwrap();
        prop_assert_eq!(a.recommended_loan, a.surplus * 6.0);
    }

    #[test]
    fn null_scenario_is_identity(p in profile()) {
        let scorer = RiskScorer::default();
        let direct = scorer.score(&p).unwrap();
        let simulated = ScenarioSimulator::new(&scorer).simulate(&p, &ScenarioDelta::none()).unwrap();
        prop_assert_eq!(direct, simulated);
    }

    #[test]
    fn lender_insight_bounds(p in profile()) {
        let a = RiskScorer::default().score(&p).unwrap();
        let insight = LenderInsightDeriver::default().derive(&a);
        prop_assert!(insight.probability_of_default >= 5.0);
        prop_assert!(insight.confidence_score <= 95.0);
    }

    #[test]
    fn health_axes_never_below_floor(p in profile()) {
        let a = RiskScorer::default().score(&p).unwrap();
        let v = HealthMetricsCalculator::default().health_vector(&a, &p);
        for value in v.as_array() {
            prop_assert!(value >= 10.0);
        }
    }

    #[test]
    fn tier_never_less_severe_for_lower_score(s1 in 0u32..=100, s2 in 0u32..=100) {
        let t = TierThresholds::default();
        let (low, high) = if s1 <= s2 { (s1, s2) } else { (s2, s1) };
        prop_assert!(
            RiskTier::from_score(low, &t).severity() >= RiskTier::from_score(high, &t).severity()
        );
    }
}
