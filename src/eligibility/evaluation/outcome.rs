use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::super::domain::{AssetClass, Money, ShareIndex};

/// A lending rule the request failed, carrying the numbers behind the failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    PurityBelowMinimum {
        actual_karat: u8,
        required_karat: u8,
    },
    CircleRateVariance {
        variance_percent: Decimal,
        tolerance_percent: Decimal,
    },
    LtvExceedsLimit {
        used_percent: Decimal,
        limit_percent: Decimal,
        #[serde(skip_serializing_if = "Option::is_none")]
        index: Option<ShareIndex>,
    },
    LoanExceedsMaximum {
        loan_amount: Money,
        max_loan_amount: Money,
    },
}

impl Violation {
    pub fn code(&self) -> &'static str {
        match self {
            Violation::PurityBelowMinimum { .. } => "purity_below_minimum",
            Violation::CircleRateVariance { .. } => "circle_rate_variance",
            Violation::LtvExceedsLimit { .. } => "ltv_exceeds_limit",
            Violation::LoanExceedsMaximum { .. } => "loan_exceeds_maximum",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Violation::PurityBelowMinimum {
                actual_karat,
                required_karat,
            } => format!(
                "purity below minimum: {actual_karat}k supplied, {required_karat}k required (BIS hallmark)"
            ),
            Violation::CircleRateVariance {
                variance_percent,
                tolerance_percent,
            } => format!(
                "property value deviates from circle rate beyond tolerance: {:.1}% against {}% allowed",
                variance_percent,
                tolerance_percent.normalize()
            ),
            Violation::LtvExceedsLimit {
                used_percent,
                limit_percent,
                index,
            } => {
                let mut summary = format!(
                    "LTV exceeds limit: {:.1}% against {}% ceiling",
                    used_percent,
                    limit_percent.normalize()
                );
                if let Some(index) = index {
                    summary.push_str(&format!(" for {index}"));
                }
                summary
            }
            Violation::LoanExceedsMaximum {
                loan_amount,
                max_loan_amount,
            } => format!(
                "loan exceeds maximum: {} requested, {} allowed",
                loan_amount.normalize(),
                max_loan_amount.normalize()
            ),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Verdict plus the figures that justify it. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    asset_class: AssetClass,
    approved: bool,
    ltv_used_percent: Decimal,
    ltv_limit_percent: Decimal,
    max_eligible_amount: Money,
    violations: Vec<Violation>,
}

impl EligibilityResult {
    pub(crate) fn new(
        asset_class: AssetClass,
        ltv_used_percent: Decimal,
        ltv_limit_percent: Decimal,
        max_eligible_amount: Money,
        violations: Vec<Violation>,
    ) -> Self {
        Self {
            asset_class,
            approved: violations.is_empty(),
            ltv_used_percent,
            ltv_limit_percent,
            max_eligible_amount,
            violations,
        }
    }

    pub fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    pub fn approved(&self) -> bool {
        self.approved
    }

    pub fn ltv_used_percent(&self) -> Decimal {
        self.ltv_used_percent
    }

    pub fn ltv_limit_percent(&self) -> Decimal {
        self.ltv_limit_percent
    }

    pub fn max_eligible_amount(&self) -> Money {
        self.max_eligible_amount
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn violation_summaries(&self) -> Vec<String> {
        self.violations.iter().map(Violation::summary).collect()
    }

    pub fn summary(&self) -> String {
        if self.approved {
            format!("{} approved", self.asset_class.product_name())
        } else {
            format!(
                "{} rejected: {}",
                self.asset_class.product_name(),
                self.violation_summaries().join("; ")
            )
        }
    }
}
