//! Integration tests for report assembly
//!
//! Mock collaborators stand in for the explanation generator and the
//! report renderer.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use msme_advisory::{
    AdvisoryConfig, AdvisoryError, AdvisoryResult, AssessmentService, ExplanationGenerator,
    ExplanationRequest, ReportRenderer, ReportView,
};
use msme_risk::{
    Approval, FinancialProfile, RiskScorer, RiskTier, ScenarioDelta, Volatility,
};

struct CannedExplainer {
    text: String,
    calls: AtomicUsize,
}

impl CannedExplainer {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ExplanationGenerator for CannedExplainer {
    fn name(&self) -> &str {
        "canned"
    }

    async fn explain(&self, request: &ExplanationRequest) -> AdvisoryResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{} (score {})", self.text, request.score))
    }
}

struct FailingExplainer;

#[async_trait]
impl ExplanationGenerator for FailingExplainer {
    fn name(&self) -> &str {
        "failing"
    }

    async fn explain(&self, _request: &ExplanationRequest) -> AdvisoryResult<String> {
        Err(AdvisoryError::Explanation("upstream returned 500".to_string()))
    }
}

struct SlowExplainer;

#[async_trait]
impl ExplanationGenerator for SlowExplainer {
    fn name(&self) -> &str {
        "slow"
    }

    async fn explain(&self, _request: &ExplanationRequest) -> AdvisoryResult<String> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("too late".to_string())
    }
}

struct BlankExplainer;

#[async_trait]
impl ExplanationGenerator for BlankExplainer {
    fn name(&self) -> &str {
        "blank"
    }

    async fn explain(&self, _request: &ExplanationRequest) -> AdvisoryResult<String> {
        Ok("   ".to_string())
    }
}

struct TextRenderer {
    fallback: String,
}

impl ReportRenderer for TextRenderer {
    fn content_type(&self) -> &str {
        "text/plain"
    }

    fn file_name(&self) -> &str {
        "MSME_Credit_Report.txt"
    }

    fn render(&self, view: &ReportView) -> AdvisoryResult<Vec<u8>> {
        let advisory = view.advisory.as_deref().unwrap_or(&self.fallback);
        Ok(format!(
            "Risk Score: {}\nRisk Tier: {}\nApproval: {}\n{}",
            view.assessment.score, view.assessment.tier, view.lender_insight.approval, advisory
        )
        .into_bytes())
    }
}

fn healthy() -> FinancialProfile {
    FinancialProfile::new(100_000.0, 60_000.0, 40_000.0, 10_000.0, Volatility::Medium).unwrap()
}

fn short_timeout() -> AdvisoryConfig {
    AdvisoryConfig {
        explanation_timeout_ms: 50,
        ..AdvisoryConfig::default()
    }
}

#[tokio::test]
async fn test_assess_without_explainer() {
    let service = AssessmentService::new(RiskScorer::default(), AdvisoryConfig::default());
    let view = service.assess(&healthy()).await.unwrap();

    assert_eq!(view.assessment.score, 92);
    assert_eq!(view.assessment.tier, RiskTier::Low);
    assert_eq!(view.lender_insight.approval, Approval::Approve);
    assert_eq!(view.health_vector.growth_readiness, 92.0);
    assert!(view.advisory.is_none());
    assert_eq!(view.advisory_or_fallback(service.config()), "No advisory available");
}

#[tokio::test]
async fn test_assess_with_explainer() {
    let explainer = Arc::new(CannedExplainer::new("Loan Ready"));
    let service = AssessmentService::new(RiskScorer::default(), AdvisoryConfig::default())
        .with_explainer(explainer.clone());

    let view = service.assess(&healthy()).await.unwrap();
    assert_eq!(view.advisory.as_deref(), Some("Loan Ready (score 92)"));
    assert_eq!(explainer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_explainer_failure_leaves_core_output_intact() {
    let plain = AssessmentService::new(RiskScorer::default(), short_timeout());
    let baseline = plain.assess(&healthy()).await.unwrap();

    let explainers: Vec<Arc<dyn ExplanationGenerator>> = vec![
        Arc::new(FailingExplainer),
        Arc::new(SlowExplainer),
        Arc::new(BlankExplainer),
    ];

    for explainer in explainers {
        let service =
            AssessmentService::new(RiskScorer::default(), short_timeout()).with_explainer(explainer);
        let view = service.assess(&healthy()).await.unwrap();

        assert!(view.advisory.is_none());
        assert_eq!(view.assessment, baseline.assessment);
        assert_eq!(view.lender_insight, baseline.lender_insight);
        assert_eq!(view.health_vector, baseline.health_vector);
    }
}

#[tokio::test]
async fn test_disabled_explanations_skip_generator() {
    let explainer = Arc::new(CannedExplainer::new("unused"));
    let config = AdvisoryConfig {
        explanation_enabled: false,
        ..AdvisoryConfig::default()
    };
    let service =
        AssessmentService::new(RiskScorer::default(), config).with_explainer(explainer.clone());

    let view = service.assess(&healthy()).await.unwrap();
    assert!(view.advisory.is_none());
    assert_eq!(explainer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_scoring_errors_propagate() {
    let explainer = Arc::new(CannedExplainer::new("unused"));
    let service = AssessmentService::new(RiskScorer::default(), AdvisoryConfig::default())
        .with_explainer(explainer.clone());

    let zero_revenue = FinancialProfile::new(0.0, 100.0, 0.0, 0.0, Volatility::Low).unwrap();
    let err = service.assess(&zero_revenue).await.unwrap_err();
    assert!(err.is_input_error());
    assert!(matches!(err, AdvisoryError::Risk(ref e) if e.is_division_by_zero()));
    assert_eq!(explainer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_assess_json_validates_payload() {
    let service = AssessmentService::new(RiskScorer::default(), AdvisoryConfig::default());

    let view = service
        .assess_json(r#"{"revenue": 100000, "expenses": 80000, "debt": 60000, "emi": 30000, "volatility": "high"}"#)
        .await
        .unwrap();
    assert_eq!(view.assessment.score, 40);
    assert_eq!(view.assessment.tier, RiskTier::High);
    assert_eq!(view.lender_insight.probability_of_default, 60.0);

    let err = service
        .assess_json(r#"{"revenue": 100000, "expenses": 80000, "debt": 60000, "volatility": "high"}"#)
        .await
        .unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn test_simulate_comparison() {
    let service = AssessmentService::new(RiskScorer::default(), AdvisoryConfig::default());
    let comparison = service
        .simulate(&healthy(), &ScenarioDelta::new(10.0, 10.0, 0.0))
        .unwrap();

    assert_eq!(comparison.baseline.score, 92);
    assert_eq!(comparison.scenario.score, 92);
    assert!(comparison.surplus_change() > 15_999.0);
}

#[test]
fn test_simulate_propagates_errors() {
    let service = AssessmentService::new(RiskScorer::default(), AdvisoryConfig::default());
    let err = service
        .simulate(&healthy(), &ScenarioDelta::new(-100.0, 0.0, 0.0))
        .unwrap_err();
    assert!(err.is_input_error());
}

#[tokio::test]
async fn test_render_passes_view_to_renderer() {
    let service = AssessmentService::new(RiskScorer::default(), AdvisoryConfig::default());
    let view = service.assess(&healthy()).await.unwrap();
    let renderer = TextRenderer {
        fallback: service.config().fallback_advisory.clone(),
    };

    let bytes = service.render(&view, &renderer).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("Risk Score: 92"));
    assert!(text.contains("Risk Tier: Low"));
    assert!(text.contains("Approval: Approve"));
    assert!(text.contains("No advisory available"));
}

#[tokio::test]
async fn test_custom_policy_flows_to_lender_view() {
    let scorer = RiskScorer::from_yaml("lender:\n  pd_floor: 10.0\n").unwrap();
    let service = AssessmentService::new(scorer, AdvisoryConfig::default());

    let profile = FinancialProfile::new(50_000.0, 10_000.0, 0.0, 0.0, Volatility::Low).unwrap();
    let view = service.assess(&profile).await.unwrap();
    assert_eq!(view.assessment.score, 100);
    assert_eq!(view.lender_insight.probability_of_default, 10.0);
}
