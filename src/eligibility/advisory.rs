//! Optional commentary attached next to an eligibility verdict.
//!
//! Annotators only ever see borrowed, immutable views of the request and result, so
//! nothing produced here can change `approved`, the eligible amount, or the violations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::domain::{AssetClass, LoanRequest};
use super::evaluation::EligibilityResult;

const PLACEHOLDER_TEXT: &str = "advisory unavailable";

/// Prose accompanying a verdict, or a placeholder when none could be produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisoryNote {
    pub available: bool,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

impl AdvisoryNote {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            source: "none".to_string(),
            reference: None,
            text: format!("{PLACEHOLDER_TEXT}: {}", reason.into()),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("advisory annotations are disabled")]
    Disabled,
    #[error("advisory source unavailable: {0}")]
    Unavailable(String),
}

/// Seam for anything that comments on a finished evaluation.
///
/// Implementations backed by a remote service must bound their own latency and
/// return `AdvisoryError` rather than block the caller indefinitely.
pub trait AdvisoryAnnotator: Send + Sync {
    fn annotate(
        &self,
        request: &LoanRequest,
        result: &EligibilityResult,
    ) -> Result<AdvisoryNote, AdvisoryError>;
}

/// Run an annotator, replacing any failure with a placeholder note.
pub fn annotate_or_placeholder(
    annotator: &dyn AdvisoryAnnotator,
    request: &LoanRequest,
    result: &EligibilityResult,
) -> AdvisoryNote {
    match annotator.annotate(request, result) {
        Ok(note) => note,
        Err(err) => {
            warn!(asset_class = %request.asset_class(), error = %err, "advisory annotation failed");
            AdvisoryNote::unavailable(err.to_string())
        }
    }
}

/// Offline annotator citing the regulatory direction behind each asset class.
#[derive(Debug, Clone, Default)]
pub struct CitationAnnotator;

impl CitationAnnotator {
    fn reference(asset_class: AssetClass) -> &'static str {
        match asset_class {
            AssetClass::Gold => "RBI gold loan LTV limits and BIS purity requirements",
            AssetClass::Property => "RBI housing finance LTV and circle rate valuation rules",
            AssetClass::Shares => "RBI and SEBI limits on loans against pledged shares",
        }
    }
}

impl AdvisoryAnnotator for CitationAnnotator {
    fn annotate(
        &self,
        request: &LoanRequest,
        result: &EligibilityResult,
    ) -> Result<AdvisoryNote, AdvisoryError> {
        let asset_class = request.asset_class();
        let verdict = if result.approved() {
            "meets".to_string()
        } else {
            format!("breaches {} rule(s) of", result.violations().len())
        };

        Ok(AdvisoryNote {
            available: true,
            source: "RBI Master Direction".to_string(),
            reference: Some(Self::reference(asset_class).to_string()),
            text: format!(
                "{} request {} the {}% LTV ceiling policy; see {}.",
                asset_class.product_name(),
                verdict,
                result.ltv_limit_percent().normalize(),
                Self::reference(asset_class)
            ),
            generated_at: Utc::now(),
        })
    }
}

/// Annotator used when advisories are switched off; always yields the placeholder.
#[derive(Debug, Clone, Default)]
pub struct DisabledAnnotator;

impl AdvisoryAnnotator for DisabledAnnotator {
    fn annotate(
        &self,
        _request: &LoanRequest,
        _result: &EligibilityResult,
    ) -> Result<AdvisoryNote, AdvisoryError> {
        Err(AdvisoryError::Disabled)
    }
}
