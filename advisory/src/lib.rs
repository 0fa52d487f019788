//! # msme-advisory: Report Assembly for the MSME Credit Risk Engine
//!
//! This library sits between the deterministic scoring engine (`msme-risk`)
//! and the collaborators around it. It does not write prose and does not
//! render documents; both are traits implemented elsewhere.
//!
//! ## Core Components
//!
//! - **AssessmentService**: Scores a profile and assembles a `ReportView`
//! - **ExplanationGenerator**: Async seam for advisory text, bounded by a timeout
//! - **ReportRenderer**: Seam for binary report output (PDF and the like)
//! - **AdvisoryConfig**: Timeout and fallback settings, loadable from YAML
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use msme_advisory::{AdvisoryConfig, AssessmentService};
//! use msme_risk::RiskScorer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = AssessmentService::new(RiskScorer::default(), AdvisoryConfig::default());
//!
//!     let payload = r#"{"revenue": 100000, "expenses": 60000, "debt": 40000, "emi": 10000, "volatility": "medium"}"#;
//!     match service.assess_json(payload).await {
//!         Ok(view) => println!("Score {} ({})", view.assessment.score, view.assessment.tier),
//!         Err(e) if e.is_input_error() => eprintln!("Please correct the input: {}", e),
//!         Err(e) => eprintln!("Assessment failed: {}", e),
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod explanation;
pub mod report;

mod service;

pub use config::AdvisoryConfig;
pub use error::{AdvisoryError, AdvisoryResult};
pub use explanation::{ExplanationGenerator, ExplanationRequest};
pub use report::{ReportRenderer, ReportView};
pub use service::AssessmentService;
