mod config;
mod outcome;
mod rules;

pub use config::{AssetRules, GoldRules, PropertyRules, RuleConfig, RuleConfigError, ShareRules};
pub use outcome::{EligibilityResult, Violation};
pub use rules::{evaluate_gold, evaluate_property, evaluate_shares, Exposure};

use std::sync::Arc;

use super::domain::{Collateral, LoanRequest};
use super::intake::{LoanApplication, RequestError};

/// Stateless evaluator applying the active lending policy to a request.
///
/// Cloning is cheap and clones share the same rule snapshot, so one engine can
/// serve any number of threads. Reloading policy means building a new engine.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    rules: Arc<RuleConfig>,
}

impl EligibilityEngine {
    pub fn new(rules: RuleConfig) -> Result<Self, RuleConfigError> {
        rules.validate()?;
        Ok(Self {
            rules: Arc::new(rules),
        })
    }

    /// Read-only snapshot of the policy in force.
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn evaluate(&self, request: &LoanRequest) -> EligibilityResult {
        let exposure = Exposure::from(request);

        match request.collateral() {
            Collateral::Gold {
                location,
                purity_karat,
            } => evaluate_gold(exposure, *location, *purity_karat, &self.rules.gold),
            Collateral::Property { circle_rate } => {
                evaluate_property(exposure, *circle_rate, &self.rules.property)
            }
            Collateral::Shares { index } => {
                evaluate_shares(exposure, *index, &self.rules.shares)
            }
        }
    }

    /// Validate a raw intake record and evaluate it in one step.
    pub fn check(&self, application: LoanApplication) -> Result<EligibilityResult, RequestError> {
        let request = LoanRequest::try_from(application)?;
        Ok(self.evaluate(&request))
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self {
            rules: Arc::new(RuleConfig::default()),
        }
    }
}
