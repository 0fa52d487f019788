//! Example: Assessing MSME profiles
//!
//! This example demonstrates how to:
//! 1. Load a scoring policy
//! 2. Attach an explanation generator
//! 3. Assess a healthy and a stressed profile
//! 4. Explore a what-if scenario
//!
//! Run with `RUST_LOG=debug` to see every rule the scorer applies.

use async_trait::async_trait;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use msme_advisory::{
    AdvisoryConfig, AdvisoryResult, AssessmentService, ExplanationGenerator, ExplanationRequest,
};
use msme_risk::{FinancialProfile, RiskScorer, ScenarioDelta, Volatility, AXIS_LABELS};

/// Stand-in for a hosted language model
struct VerdictExplainer;

#[async_trait]
impl ExplanationGenerator for VerdictExplainer {
    fn name(&self) -> &str {
        "verdict"
    }

    async fn explain(&self, request: &ExplanationRequest) -> AdvisoryResult<String> {
        let verdict = if request.score >= 80 {
            "Loan Ready"
        } else if request.score >= 60 {
            "Moderately Ready (with improvements required)"
        } else {
            "High Risk (requires financial stabilization)"
        };
        Ok(format!(
            "Loan Readiness Verdict: {} (debt ratio {:.2}, {} volatility)",
            verdict, request.debt_ratio, request.volatility
        ))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    println!("=== MSME Credit Assessment Example ===\n");

    // 1. Scoring policy
    let policy_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../risk/policies/default.yaml");
    let scorer = RiskScorer::from_yaml_file(policy_path)?;

    // 2. Service with an explanation generator
    let service = AssessmentService::new(scorer, AdvisoryConfig::default())
        .with_explainer(Arc::new(VerdictExplainer));

    // 3. Two applicants
    let applicants = [
        ("Healthy", FinancialProfile::new(100_000.0, 60_000.0, 40_000.0, 10_000.0, Volatility::Medium)?),
        ("Stressed", FinancialProfile::new(100_000.0, 80_000.0, 60_000.0, 30_000.0, Volatility::High)?),
    ];

    for (label, profile) in &applicants {
        let view = service.assess(profile).await?;
        println!("--- {} ---", label);
        println!("{}", serde_json::to_string_pretty(&view)?);
        for (axis, value) in AXIS_LABELS.iter().zip(view.health_vector.as_array()) {
            println!("   {:<20} {:>6.1}", axis, value);
        }
        println!("   Advisory: {}\n", view.advisory_or_fallback(service.config()));
    }

    // 4. What if revenue grows 10% and expenses fall 10%?
    let (_, healthy) = &applicants[0];
    let comparison = service.simulate(healthy, &ScenarioDelta::new(10.0, 10.0, 0.0))?;
    println!("--- Scenario: +10% revenue, -10% expenses ---");
    println!(
        "   Score {} -> {}, surplus {:+.0}, recommended loan {:+.0}",
        comparison.baseline.score,
        comparison.scenario.score,
        comparison.surplus_change(),
        comparison.recommended_loan_change()
    );

    Ok(())
}
