use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::common::*;
use crate::eligibility::domain::{AssetClass, ShareIndex};
use crate::eligibility::evaluation::{AssetRules, EligibilityEngine, RuleConfig, RuleConfigError};

const SHIPPED_RULES: &str = include_str!("../../../config/rules.json");

#[test]
fn canonical_rules_validate() {
    rule_config().validate().expect("canonical rules are valid");
}

#[test]
fn shipped_rule_file_matches_embedded_default() {
    let loaded = RuleConfig::from_json_str(SHIPPED_RULES).expect("shipped rules parse");

    assert_eq!(loaded, RuleConfig::default());
}

#[test]
fn rule_snapshot_round_trips_through_json() {
    let snapshot = serde_json::to_string(engine().rules()).expect("rules serialize");

    let reloaded = RuleConfig::from_json_str(&snapshot).expect("snapshot reloads");

    assert_eq!(&reloaded, engine().rules());
}

#[test]
fn fraction_above_one_is_fatal() {
    let mut rules = rule_config();
    rules.gold.rural_ltv_max = dec!(1.05);

    match EligibilityEngine::new(rules) {
        Err(RuleConfigError::FractionOutOfRange { field, value }) => {
            assert_eq!(field, "gold.rural_ltv_max");
            assert_eq!(value, dec!(1.05));
        }
        other => panic!("expected fraction error, got {other:?}"),
    }
}

#[test]
fn zero_fraction_is_fatal() {
    let mut rules = rule_config();
    rules
        .shares
        .index_ltv
        .insert(ShareIndex::Nifty100, Decimal::ZERO);

    let err = rules.validate().expect_err("zero LTV is not a ceiling");

    assert!(err.to_string().contains("shares.index_ltv.NIFTY100"));
}

#[test]
fn non_positive_cap_is_fatal() {
    let mut rules = rule_config();
    rules.property.max_loan_amount = Decimal::ZERO;

    assert!(matches!(
        rules.validate(),
        Err(RuleConfigError::NonPositiveAmount { .. })
    ));
}

#[test]
fn missing_required_field_is_fatal() {
    let raw = r#"{
        "version": "partial",
        "gold": {"urban_ltv_max": "0.75", "rural_ltv_max": "0.9", "min_purity_karat": 18, "max_loan_amount": "2000000"},
        "property": {"ltv_max": "0.7", "max_loan_amount": "50000000"},
        "shares": {"fallback_ltv": "0.4", "max_loan_amount": "2000000"}
    }"#;

    let err = RuleConfig::from_json_str(raw).expect_err("circle rate tolerance missing");

    assert!(matches!(err, RuleConfigError::Parse(_)));
    assert!(err.to_string().contains("circle_rate_variance_max"));
}

#[test]
fn blank_version_is_fatal() {
    let mut rules = rule_config();
    rules.version = "  ".to_string();

    assert!(matches!(
        rules.validate(),
        Err(RuleConfigError::MissingVersion)
    ));
}

#[test]
fn rule_view_matches_asset_class() {
    let rules = rule_config();

    match rules.for_asset_class(AssetClass::Gold) {
        AssetRules::Gold(gold) => {
            assert_eq!(gold.min_purity_karat, 18);
            assert_eq!(gold.tenure_months, 3);
        }
        other => panic!("expected gold rules, got {other:?}"),
    }
    assert!(matches!(
        rules.for_asset_class(AssetClass::Shares),
        AssetRules::Shares(shares) if shares.ltv_for(ShareIndex::Other) == dec!(0.40)
    ));
}

#[test]
fn missing_rule_file_reports_path() {
    let path = std::path::Path::new("/definitely/not/here/rules.json");

    let err = RuleConfig::from_path(path).expect_err("file does not exist");

    assert!(err.to_string().contains("/definitely/not/here/rules.json"));
}
