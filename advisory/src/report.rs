//! Report view model and renderer seam

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use msme_risk::{HealthVector, LenderInsight, RiskAssessment};

use crate::config::AdvisoryConfig;
use crate::error::AdvisoryResult;

/// Everything a renderer or the presentation layer needs for one applicant
///
/// Numbers are unrounded; formatting belongs to whoever displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub generated_at: DateTime<Utc>,
    pub assessment: RiskAssessment,
    pub lender_insight: LenderInsight,
    pub health_vector: HealthVector,

    /// Advisory text, absent when the generator was skipped or failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

impl ReportView {
    /// Advisory text, or the configured fallback when there is none
    pub fn advisory_or_fallback<'a>(&'a self, config: &'a AdvisoryConfig) -> &'a str {
        match self.advisory.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => &config.fallback_advisory,
        }
    }
}

/// Binary report renderer, e.g. a PDF writer
pub trait ReportRenderer: Send + Sync {
    /// MIME type of the rendered document
    fn content_type(&self) -> &str;

    /// Suggested download file name
    fn file_name(&self) -> &str;

    fn render(&self, view: &ReportView) -> AdvisoryResult<Vec<u8>>;
}
