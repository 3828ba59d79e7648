use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::super::domain::{AssetClass, GoldLocation, LoanRequest, Money, Rate, ShareIndex};
use super::config::{GoldRules, PropertyRules, ShareRules};
use super::outcome::{EligibilityResult, Violation};

const HUNDRED: Decimal = dec!(100);

/// Amounts shared by every asset class, plus the checks that only need them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exposure {
    pub asset_value: Money,
    pub loan_amount: Money,
}

impl From<&LoanRequest> for Exposure {
    fn from(request: &LoanRequest) -> Self {
        Self {
            asset_value: request.asset_value(),
            loan_amount: request.loan_amount(),
        }
    }
}

impl Exposure {
    /// Loan over asset value, or `None` when the asset is worthless and usage is undefined.
    fn usage_ratio(&self) -> Option<Rate> {
        if self.asset_value > Decimal::ZERO {
            Some(
                self.loan_amount
                    .checked_div(self.asset_value)
                    .unwrap_or(Decimal::MAX),
            )
        } else {
            None
        }
    }

    fn check_ltv(&self, limit: Rate, index: Option<ShareIndex>, violations: &mut Vec<Violation>) {
        if let Some(ratio) = self.usage_ratio() {
            if ratio > limit {
                violations.push(Violation::LtvExceedsLimit {
                    used_percent: as_percent(ratio),
                    limit_percent: as_percent(limit),
                    index,
                });
            }
        }
    }

    fn check_cap(&self, max_loan_amount: Money, violations: &mut Vec<Violation>) {
        if self.loan_amount > max_loan_amount {
            violations.push(Violation::LoanExceedsMaximum {
                loan_amount: self.loan_amount,
                max_loan_amount,
            });
        }
    }

    fn finish(
        &self,
        asset_class: AssetClass,
        limit: Rate,
        violations: Vec<Violation>,
    ) -> EligibilityResult {
        let ltv_used_percent = self
            .usage_ratio()
            .map(as_percent)
            .unwrap_or(Decimal::ZERO);

        EligibilityResult::new(
            asset_class,
            ltv_used_percent,
            as_percent(limit),
            self.asset_value * limit,
            violations,
        )
    }
}

fn as_percent(ratio: Rate) -> Decimal {
    ratio.checked_mul(HUNDRED).unwrap_or(Decimal::MAX)
}

/// Purity floor, location-dependent LTV ceiling, then the absolute cap.
pub fn evaluate_gold(
    exposure: Exposure,
    location: GoldLocation,
    purity_karat: u8,
    rules: &GoldRules,
) -> EligibilityResult {
    let mut violations = Vec::new();

    if purity_karat < rules.min_purity_karat {
        violations.push(Violation::PurityBelowMinimum {
            actual_karat: purity_karat,
            required_karat: rules.min_purity_karat,
        });
    }

    let limit = match location {
        GoldLocation::Urban => rules.urban_ltv_max,
        GoldLocation::Rural => rules.rural_ltv_max,
    };
    exposure.check_ltv(limit, None, &mut violations);
    exposure.check_cap(rules.max_loan_amount, &mut violations);

    exposure.finish(AssetClass::Gold, limit, violations)
}

/// Circle-rate proximity (symmetric), LTV ceiling, then the absolute cap.
pub fn evaluate_property(
    exposure: Exposure,
    circle_rate: Money,
    rules: &PropertyRules,
) -> EligibilityResult {
    let mut violations = Vec::new();

    if exposure.asset_value > Decimal::ZERO && circle_rate > Decimal::ZERO {
        let variance = (exposure.asset_value - circle_rate)
            .abs()
            .checked_div(circle_rate)
            .unwrap_or(Decimal::MAX);
        if variance > rules.circle_rate_variance_max {
            violations.push(Violation::CircleRateVariance {
                variance_percent: as_percent(variance),
                tolerance_percent: as_percent(rules.circle_rate_variance_max),
            });
        }
    }

    exposure.check_ltv(rules.ltv_max, None, &mut violations);
    exposure.check_cap(rules.max_loan_amount, &mut violations);

    exposure.finish(AssetClass::Property, rules.ltv_max, violations)
}

/// Index-resolved LTV ceiling, then the absolute cap.
pub fn evaluate_shares(
    exposure: Exposure,
    index: ShareIndex,
    rules: &ShareRules,
) -> EligibilityResult {
    let mut violations = Vec::new();

    let limit = rules.ltv_for(index);
    exposure.check_ltv(limit, Some(index), &mut violations);
    exposure.check_cap(rules.max_loan_amount, &mut violations);

    exposure.finish(AssetClass::Shares, limit, violations)
}
