use rust_decimal_macros::dec;

use super::common::*;
use crate::eligibility::domain::{AssetClass, Collateral, GoldLocation, LoanRequest, ShareIndex};
use crate::eligibility::intake::{LoanApplication, RequestError};

#[test]
fn gold_application_becomes_typed_request() {
    let request = LoanRequest::try_from(gold_application()).expect("valid application");

    assert_eq!(request.asset_class(), AssetClass::Gold);
    assert_eq!(request.asset_value(), dec!(100000));
    assert_eq!(
        request.collateral(),
        &Collateral::Gold {
            location: GoldLocation::Urban,
            purity_karat: 22,
        }
    );
}

#[test]
fn property_and_shares_applications_convert() {
    let property = LoanRequest::try_from(property_application()).expect("property converts");
    let shares = LoanRequest::try_from(shares_application()).expect("shares convert");

    assert_eq!(
        property.collateral(),
        &Collateral::Property {
            circle_rate: dec!(4800000)
        }
    );
    assert_eq!(
        shares.collateral(),
        &Collateral::Shares {
            index: ShareIndex::Nifty50
        }
    );
}

#[test]
fn unknown_asset_class_is_invalid_not_defaulted() {
    let mut application = gold_application();
    application.asset_class = Some("crypto".to_string());

    let err = LoanRequest::try_from(application).expect_err("crypto is not a collateral class");

    assert_eq!(err, RequestError::UnknownAssetClass("crypto".to_string()));
    assert_eq!(err.field(), "asset_class");
}

#[test]
fn negative_loan_amount_is_rejected() {
    let mut application = shares_application();
    application.loan_amount = Some(dec!(-1));

    let err = engine()
        .check(application)
        .expect_err("negative loans are malformed");

    assert_eq!(
        err,
        RequestError::NegativeAmount {
            field: "loan_amount",
            value: dec!(-1),
        }
    );
}

#[test]
fn negative_circle_rate_is_rejected() {
    let mut application = property_application();
    application.circle_rate = Some(dec!(-4500000));

    let err = LoanRequest::try_from(application).expect_err("negative circle rate");

    assert_eq!(err.field(), "circle_rate");
}

#[test]
fn missing_class_specific_field_is_named() {
    let mut application = gold_application();
    application.purity = None;

    let err = LoanRequest::try_from(application).expect_err("purity is required for gold");

    assert_eq!(
        err,
        RequestError::MissingField {
            field: "purity",
            asset_class: Some(AssetClass::Gold),
        }
    );
    assert_eq!(
        err.to_string(),
        "missing field `purity` required for gold requests"
    );
}

#[test]
fn missing_asset_class_is_reported() {
    let err = LoanRequest::try_from(LoanApplication::default()).expect_err("empty application");

    assert_eq!(err.field(), "asset_class");
    assert_eq!(
        err,
        RequestError::MissingField {
            field: "asset_class",
            asset_class: None,
        }
    );
    assert!(err.to_string().ends_with("required for all requests"));
}

#[test]
fn foreign_class_fields_are_rejected() {
    let mut application = shares_application();
    application.purity = Some(22);

    let err = LoanRequest::try_from(application).expect_err("purity does not apply to shares");

    assert_eq!(
        err,
        RequestError::UnexpectedField {
            field: "purity",
            asset_class: AssetClass::Shares,
        }
    );
}

#[test]
fn purity_outside_karat_scale_is_rejected() {
    for purity in [0, 25, -3, 1_000] {
        let mut application = gold_application();
        application.purity = Some(purity);

        let err = LoanRequest::try_from(application).expect_err("purity out of range");

        assert_eq!(err, RequestError::PurityOutOfRange { value: purity });
    }
}

#[test]
fn unknown_location_and_index_are_rejected() {
    let mut gold = gold_application();
    gold.location = Some("suburban".to_string());
    let mut shares = shares_application();
    shares.share_index = Some("SENSEX".to_string());

    assert_eq!(
        LoanRequest::try_from(gold).expect_err("bad location").field(),
        "location"
    );
    assert_eq!(
        LoanRequest::try_from(shares).expect_err("bad index").field(),
        "share_index"
    );
}

#[test]
fn json_intake_accepts_asset_type_alias() {
    let application: LoanApplication = serde_json::from_str(
        r#"{"asset_type":"shares","asset_value":"100000","loan_amount":42000,"share_index":"Other"}"#,
    )
    .expect("intake parses");

    let result = engine().check(application).expect("valid request");

    assert!(!result.approved());
    assert_eq!(result.max_eligible_amount(), dec!(40000));
}

#[test]
fn json_intake_rejects_unknown_fields() {
    let parsed = serde_json::from_str::<LoanApplication>(
        r#"{"asset_class":"gold","asset_value":1,"loan_amount":1,"purity":22,"location":"urban","tenure":3}"#,
    );

    assert!(parsed.is_err());
}
