use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::eligibility::domain::{GoldLocation, LoanRequest, ShareIndex};
use crate::eligibility::evaluation::{EligibilityEngine, RuleConfig};
use crate::eligibility::intake::LoanApplication;

pub(super) fn rule_config() -> RuleConfig {
    RuleConfig::default()
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(rule_config()).expect("canonical rules validate")
}

pub(super) fn gold_request(
    asset_value: Decimal,
    loan_amount: Decimal,
    location: GoldLocation,
    purity_karat: u8,
) -> LoanRequest {
    LoanRequest::gold(asset_value, loan_amount, location, purity_karat).expect("valid gold request")
}

pub(super) fn urban_gold(loan_amount: Decimal) -> LoanRequest {
    gold_request(dec!(100000), loan_amount, GoldLocation::Urban, 22)
}

pub(super) fn property_request(
    asset_value: Decimal,
    loan_amount: Decimal,
    circle_rate: Decimal,
) -> LoanRequest {
    LoanRequest::property(asset_value, loan_amount, circle_rate).expect("valid property request")
}

pub(super) fn shares_request(
    asset_value: Decimal,
    loan_amount: Decimal,
    index: ShareIndex,
) -> LoanRequest {
    LoanRequest::shares(asset_value, loan_amount, index).expect("valid shares request")
}

pub(super) fn gold_application() -> LoanApplication {
    LoanApplication {
        asset_class: Some("gold".to_string()),
        asset_value: Some(dec!(100000)),
        loan_amount: Some(dec!(75000)),
        location: Some("Urban".to_string()),
        purity: Some(22),
        ..LoanApplication::default()
    }
}

pub(super) fn property_application() -> LoanApplication {
    LoanApplication {
        asset_class: Some("property".to_string()),
        asset_value: Some(dec!(5000000)),
        loan_amount: Some(dec!(3000000)),
        circle_rate: Some(dec!(4800000)),
        ..LoanApplication::default()
    }
}

pub(super) fn shares_application() -> LoanApplication {
    LoanApplication {
        asset_class: Some("shares".to_string()),
        asset_value: Some(dec!(100000)),
        loan_amount: Some(dec!(50000)),
        share_index: Some("NIFTY50".to_string()),
        ..LoanApplication::default()
    }
}
