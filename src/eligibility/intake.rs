use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{AssetClass, Collateral, LoanRequest, Money, MAX_PURITY_KARAT};

/// Raised when an inbound request cannot be evaluated at all.
///
/// Distinct from a rule violation: a `RequestError` means the request made no
/// sense, not that it was evaluated and rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("unknown asset class '{0}' (expected gold, property, or shares)")]
    UnknownAssetClass(String),
    #[error("missing field `{field}` required for {} requests", scope(.asset_class))]
    MissingField {
        field: &'static str,
        /// `None` when the field is needed before the asset class is known.
        asset_class: Option<AssetClass>,
    },
    #[error("field `{field}` does not apply to {asset_class} requests")]
    UnexpectedField {
        field: &'static str,
        asset_class: AssetClass,
    },
    #[error("`{field}` must not be negative (found {value})")]
    NegativeAmount { field: &'static str, value: Decimal },
    #[error("`purity` must be between 1 and 24 karat (found {value})")]
    PurityOutOfRange { value: i64 },
    #[error("unknown location '{0}' (expected urban or rural)")]
    UnknownLocation(String),
    #[error("unknown share index '{0}' (expected NIFTY50, NIFTY100, or Other)")]
    UnknownIndex(String),
}

impl RequestError {
    /// Name of the offending intake field, for callers echoing errors back to a form.
    pub fn field(&self) -> &'static str {
        match self {
            RequestError::UnknownAssetClass(_) => "asset_class",
            RequestError::MissingField { field, .. }
            | RequestError::UnexpectedField { field, .. }
            | RequestError::NegativeAmount { field, .. } => *field,
            RequestError::PurityOutOfRange { .. } => "purity",
            RequestError::UnknownLocation(_) => "location",
            RequestError::UnknownIndex(_) => "share_index",
        }
    }
}

fn scope(asset_class: &Option<AssetClass>) -> &'static str {
    match asset_class {
        Some(class) => class.label(),
        None => "all",
    }
}

/// Loosely typed intake record as submitted by a form or JSON client.
///
/// Every field is optional here so that absence surfaces as a `RequestError`
/// naming the field instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoanApplication {
    #[serde(default, alias = "asset_type")]
    pub asset_class: Option<String>,
    #[serde(default)]
    pub asset_value: Option<Money>,
    #[serde(default)]
    pub loan_amount: Option<Money>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub purity: Option<i64>,
    #[serde(default)]
    pub circle_rate: Option<Money>,
    #[serde(default, alias = "index")]
    pub share_index: Option<String>,
}

impl TryFrom<LoanApplication> for LoanRequest {
    type Error = RequestError;

    fn try_from(application: LoanApplication) -> Result<Self, Self::Error> {
        let raw_class = application
            .asset_class
            .as_deref()
            .ok_or(RequestError::MissingField {
                field: "asset_class",
                asset_class: None,
            })?;
        let asset_class: AssetClass = raw_class.parse()?;

        let asset_value = required(application.asset_value, "asset_value", asset_class)?;
        let loan_amount = required(application.loan_amount, "loan_amount", asset_class)?;

        let collateral = match asset_class {
            AssetClass::Gold => {
                forbid(&application.circle_rate, "circle_rate", asset_class)?;
                forbid(&application.share_index, "share_index", asset_class)?;

                let location = required(application.location, "location", asset_class)?;
                let purity = required(application.purity, "purity", asset_class)?;
                let purity_karat = u8::try_from(purity)
                    .ok()
                    .filter(|karat| (1..=MAX_PURITY_KARAT).contains(karat))
                    .ok_or(RequestError::PurityOutOfRange { value: purity })?;

                Collateral::Gold {
                    location: location.parse()?,
                    purity_karat,
                }
            }
            AssetClass::Property => {
                forbid(&application.location, "location", asset_class)?;
                forbid(&application.purity, "purity", asset_class)?;
                forbid(&application.share_index, "share_index", asset_class)?;

                Collateral::Property {
                    circle_rate: required(application.circle_rate, "circle_rate", asset_class)?,
                }
            }
            AssetClass::Shares => {
                forbid(&application.location, "location", asset_class)?;
                forbid(&application.purity, "purity", asset_class)?;
                forbid(&application.circle_rate, "circle_rate", asset_class)?;

                let index = required(application.share_index, "share_index", asset_class)?;
                Collateral::Shares {
                    index: index.parse()?,
                }
            }
        };

        LoanRequest::new(asset_value, loan_amount, collateral)
    }
}

fn required<T>(
    value: Option<T>,
    field: &'static str,
    asset_class: AssetClass,
) -> Result<T, RequestError> {
    value.ok_or_else(|| RequestError::MissingField {
        field,
        asset_class: Some(asset_class),
    })
}

fn forbid<T>(
    value: &Option<T>,
    field: &'static str,
    asset_class: AssetClass,
) -> Result<(), RequestError> {
    match value {
        Some(_) => Err(RequestError::UnexpectedField { field, asset_class }),
        None => Ok(()),
    }
}
