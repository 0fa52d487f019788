//! Assessment service assembling report views
//!
//! The service runs the deterministic engine, then optionally asks the
//! explanation generator for advisory text. Scoring errors propagate; any
//! generator failure is logged and leaves the advisory empty.

use std::sync::Arc;
use tracing::{debug, info, warn};

use msme_risk::{
    FinancialProfile, HealthMetricsCalculator, LenderInsightDeriver, RiskScorer, ScenarioComparison,
    ScenarioDelta, ScenarioSimulator,
};

use crate::config::AdvisoryConfig;
use crate::error::{AdvisoryError, AdvisoryResult};
use crate::explanation::{ExplanationGenerator, ExplanationRequest};
use crate::report::{ReportRenderer, ReportView};

/// Builds report views from financial profiles
pub struct AssessmentService {
    scorer: RiskScorer,
    lender: LenderInsightDeriver,
    health: HealthMetricsCalculator,
    explainer: Option<Arc<dyn ExplanationGenerator>>,
    config: AdvisoryConfig,
}

impl AssessmentService {
    /// Create a service without an explanation generator
    pub fn new(scorer: RiskScorer, config: AdvisoryConfig) -> Self {
        let lender = LenderInsightDeriver::from_policy(scorer.policy());
        let health = HealthMetricsCalculator::from_policy(scorer.policy());
        Self {
            scorer,
            lender,
            health,
            explainer: None,
            config,
        }
    }

    /// Attach an explanation generator
    pub fn with_explainer(mut self, explainer: Arc<dyn ExplanationGenerator>) -> Self {
        info!("Setting explanation generator: {}", explainer.name());
        self.explainer = Some(explainer);
        self
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    pub fn config(&self) -> &AdvisoryConfig {
        &self.config
    }

    /// Score a profile and assemble its report view
    ///
    /// The assessment, lender insight and health vector are identical
    /// whether or not an advisory could be obtained.
    pub async fn assess(&self, profile: &FinancialProfile) -> AdvisoryResult<ReportView> {
        info!(volatility = %profile.volatility(), "Assessing profile");

        let assessment = self.scorer.score(profile)?;
        let lender_insight = self.lender.derive(&assessment);
        let health_vector = self.health.health_vector(&assessment, profile);

        let request = ExplanationRequest::new(&assessment, profile);
        let advisory = self.fetch_advisory(&request).await;

        info!(
            score = assessment.score,
            tier = %assessment.tier,
            approval = %lender_insight.approval,
            has_advisory = advisory.is_some(),
            "Assessment complete"
        );

        Ok(ReportView {
            generated_at: chrono::Utc::now(),
            assessment,
            lender_insight,
            health_vector,
            advisory,
        })
    }

    /// Validate an untyped JSON payload, then assess it
    pub async fn assess_json(&self, json: &str) -> AdvisoryResult<ReportView> {
        let profile = FinancialProfile::from_json_str(json)?;
        self.assess(&profile).await
    }

    /// Compare a profile against a what-if scenario
    pub fn simulate(
        &self,
        profile: &FinancialProfile,
        delta: &ScenarioDelta,
    ) -> AdvisoryResult<ScenarioComparison> {
        debug!(?delta, "Simulating scenario");
        let comparison = ScenarioSimulator::new(&self.scorer).compare(profile, delta)?;
        Ok(comparison)
    }

    /// Render a report view with an external renderer
    pub fn render(&self, view: &ReportView, renderer: &dyn ReportRenderer) -> AdvisoryResult<Vec<u8>> {
        info!(
            content_type = renderer.content_type(),
            file_name = renderer.file_name(),
            "Rendering report"
        );
        let bytes = renderer.render(view)?;
        debug!(bytes = bytes.len(), "Report rendered");
        Ok(bytes)
    }

    async fn fetch_advisory(&self, request: &ExplanationRequest) -> Option<String> {
        if !self.config.explanation_enabled {
            return None;
        }
        let explainer = self.explainer.as_ref()?;

        match self.request_explanation(explainer.as_ref(), request).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!(generator = explainer.name(), "Explanation generator returned empty text");
                None
            }
            Err(e) => {
                warn!(generator = explainer.name(), error = %e, "Explanation unavailable");
                None
            }
        }
    }

    async fn request_explanation(
        &self,
        explainer: &dyn ExplanationGenerator,
        request: &ExplanationRequest,
    ) -> AdvisoryResult<String> {
        match tokio::time::timeout(self.config.explanation_timeout(), explainer.explain(request)).await {
            Ok(result) => result,
            Err(_) => Err(AdvisoryError::Timeout(self.config.explanation_timeout_ms)),
        }
    }
}
