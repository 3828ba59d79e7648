//! Loan-against-asset eligibility: request intake, rule evaluation, and advisory notes.

pub mod advisory;
pub mod domain;
pub mod evaluation;
pub mod intake;

#[cfg(test)]
mod tests;

pub use advisory::{
    annotate_or_placeholder, AdvisoryAnnotator, AdvisoryError, AdvisoryNote, CitationAnnotator,
    DisabledAnnotator,
};
pub use domain::{AssetClass, Collateral, GoldLocation, LoanRequest, Money, Rate, ShareIndex};
pub use evaluation::{
    AssetRules, EligibilityEngine, EligibilityResult, GoldRules, PropertyRules, RuleConfig,
    RuleConfigError, ShareRules, Violation,
};
pub use intake::{LoanApplication, RequestError};
