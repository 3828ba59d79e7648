use crate::render::{render_report, OutputFormat};
use chrono::{DateTime, Utc};
use clap::Args;
use laa_eligibility::eligibility::{
    annotate_or_placeholder, AdvisoryAnnotator, AdvisoryNote, AssetClass, EligibilityEngine,
    EligibilityResult, LoanApplication, LoanRequest,
};
use laa_eligibility::error::AppError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct CheckArgs {
    /// Read the request from a JSON file instead of flags
    #[arg(
        long,
        conflicts_with_all = ["asset_class", "asset_value", "loan_amount", "location", "purity", "circle_rate", "index"]
    )]
    pub(crate) input: Option<PathBuf>,
    /// gold, property, or shares
    #[arg(long)]
    pub(crate) asset_class: Option<String>,
    /// Declared market value of the collateral in INR
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) asset_value: Option<Decimal>,
    /// Requested loan amount in INR
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) loan_amount: Option<Decimal>,
    /// Gold only: urban or rural
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Gold only: purity in karat
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) purity: Option<i64>,
    /// Property only: government circle rate in INR
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) circle_rate: Option<Decimal>,
    /// Shares only: NIFTY50, NIFTY100, or Other
    #[arg(long)]
    pub(crate) index: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Attach an advisory note to the verdict
    #[arg(long)]
    pub(crate) advisory: bool,
}

impl CheckArgs {
    pub(crate) fn application(&self) -> Result<LoanApplication, AppError> {
        match &self.input {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&raw)?)
            }
            None => Ok(LoanApplication {
                asset_class: self.asset_class.clone(),
                asset_value: self.asset_value,
                loan_amount: self.loan_amount,
                location: self.location.clone(),
                purity: self.purity,
                circle_rate: self.circle_rate,
                share_index: self.index.clone(),
            }),
        }
    }
}

/// Evaluation outcome stamped with the context a caller needs to file it.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct EligibilityReport {
    pub(crate) asset_class: AssetClass,
    pub(crate) product: &'static str,
    pub(crate) evaluated_at: DateTime<Utc>,
    pub(crate) rules_version: String,
    pub(crate) request: LoanRequest,
    pub(crate) result: EligibilityResult,
    pub(crate) violation_summaries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) advisory: Option<AdvisoryNote>,
}

impl EligibilityReport {
    pub(crate) fn build(
        engine: &EligibilityEngine,
        annotator: Option<&dyn AdvisoryAnnotator>,
        request: LoanRequest,
    ) -> Self {
        let result = engine.evaluate(&request);
        let advisory =
            annotator.map(|annotator| annotate_or_placeholder(annotator, &request, &result));

        Self {
            asset_class: request.asset_class(),
            product: request.asset_class().product_name(),
            evaluated_at: Utc::now(),
            rules_version: engine.rules().version.clone(),
            violation_summaries: result.violation_summaries(),
            request,
            result,
            advisory,
        }
    }
}

pub(crate) fn run_check(
    engine: &EligibilityEngine,
    annotator: &dyn AdvisoryAnnotator,
    args: CheckArgs,
) -> Result<(), AppError> {
    let request = LoanRequest::try_from(args.application()?)?;
    let annotator = args.advisory.then_some(annotator);

    let report = EligibilityReport::build(engine, annotator, request);
    info!(
        asset_class = %report.asset_class,
        approved = report.result.approved(),
        violations = report.result.violations().len(),
        "eligibility evaluated"
    );

    println!("{}", render_report(&report, args.format)?);
    Ok(())
}
