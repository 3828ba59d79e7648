use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::intake::RequestError;

/// Monetary amounts in rupees. Never floating point.
pub type Money = Decimal;

/// Fractions such as LTV ceilings, expressed as decimals (0.75 = 75%).
pub type Rate = Decimal;

/// Highest fineness a gold article can carry.
pub const MAX_PURITY_KARAT: u8 = 24;

/// Collateral families the lending rules cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Gold,
    Property,
    Shares,
}

impl AssetClass {
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Gold => "gold",
            AssetClass::Property => "property",
            AssetClass::Shares => "shares",
        }
    }

    pub fn product_name(&self) -> &'static str {
        match self {
            AssetClass::Gold => "Gold Loan",
            AssetClass::Property => "Property Mortgage",
            AssetClass::Shares => "Share Pledge",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssetClass {
    type Err = RequestError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "gold" | "gold_loan" => Ok(Self::Gold),
            "property" | "property_mortgage" | "mortgage" => Ok(Self::Property),
            "shares" | "share" | "share_pledge" => Ok(Self::Shares),
            _ => Err(RequestError::UnknownAssetClass(raw.to_string())),
        }
    }
}

/// Branch location, which selects the gold LTV ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoldLocation {
    Urban,
    Rural,
}

impl GoldLocation {
    pub fn label(&self) -> &'static str {
        match self {
            GoldLocation::Urban => "urban",
            GoldLocation::Rural => "rural",
        }
    }
}

impl fmt::Display for GoldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GoldLocation {
    type Err = RequestError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "urban" => Ok(Self::Urban),
            "rural" => Ok(Self::Rural),
            _ => Err(RequestError::UnknownLocation(raw.to_string())),
        }
    }
}

/// Market index a pledged share portfolio belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShareIndex {
    #[serde(rename = "NIFTY50")]
    Nifty50,
    #[serde(rename = "NIFTY100")]
    Nifty100,
    #[serde(rename = "Other")]
    Other,
}

impl ShareIndex {
    pub fn label(&self) -> &'static str {
        match self {
            ShareIndex::Nifty50 => "NIFTY50",
            ShareIndex::Nifty100 => "NIFTY100",
            ShareIndex::Other => "Other",
        }
    }
}

impl fmt::Display for ShareIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShareIndex {
    type Err = RequestError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "NIFTY50" => Ok(Self::Nifty50),
            "NIFTY100" => Ok(Self::Nifty100),
            "OTHER" => Ok(Self::Other),
            _ => Err(RequestError::UnknownIndex(raw.to_string())),
        }
    }
}

/// Class-specific attributes of the pledged asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "asset_class", rename_all = "snake_case")]
pub enum Collateral {
    Gold {
        location: GoldLocation,
        purity_karat: u8,
    },
    Property {
        circle_rate: Money,
    },
    Shares {
        index: ShareIndex,
    },
}

impl Collateral {
    pub fn asset_class(&self) -> AssetClass {
        match self {
            Collateral::Gold { .. } => AssetClass::Gold,
            Collateral::Property { .. } => AssetClass::Property,
            Collateral::Shares { .. } => AssetClass::Shares,
        }
    }
}

/// Validated request handed to the eligibility engine.
///
/// Construction rejects negative amounts and out-of-domain attributes, so every
/// `LoanRequest` that exists can be evaluated without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanRequest {
    asset_value: Money,
    loan_amount: Money,
    #[serde(flatten)]
    collateral: Collateral,
}

impl LoanRequest {
    pub fn new(
        asset_value: Money,
        loan_amount: Money,
        collateral: Collateral,
    ) -> Result<Self, RequestError> {
        non_negative("asset_value", asset_value)?;
        non_negative("loan_amount", loan_amount)?;

        match &collateral {
            Collateral::Gold { purity_karat, .. } => {
                if *purity_karat == 0 || *purity_karat > MAX_PURITY_KARAT {
                    return Err(RequestError::PurityOutOfRange {
                        value: i64::from(*purity_karat),
                    });
                }
            }
            Collateral::Property { circle_rate } => non_negative("circle_rate", *circle_rate)?,
            Collateral::Shares { .. } => {}
        }

        Ok(Self {
            asset_value,
            loan_amount,
            collateral,
        })
    }

    pub fn gold(
        asset_value: Money,
        loan_amount: Money,
        location: GoldLocation,
        purity_karat: u8,
    ) -> Result<Self, RequestError> {
        Self::new(
            asset_value,
            loan_amount,
            Collateral::Gold {
                location,
                purity_karat,
            },
        )
    }

    pub fn property(
        asset_value: Money,
        loan_amount: Money,
        circle_rate: Money,
    ) -> Result<Self, RequestError> {
        Self::new(asset_value, loan_amount, Collateral::Property { circle_rate })
    }

    pub fn shares(
        asset_value: Money,
        loan_amount: Money,
        index: ShareIndex,
    ) -> Result<Self, RequestError> {
        Self::new(asset_value, loan_amount, Collateral::Shares { index })
    }

    pub fn asset_class(&self) -> AssetClass {
        self.collateral.asset_class()
    }

    pub fn asset_value(&self) -> Money {
        self.asset_value
    }

    pub fn loan_amount(&self) -> Money {
        self.loan_amount
    }

    pub fn collateral(&self) -> &Collateral {
        &self.collateral
    }
}

fn non_negative(field: &'static str, value: Money) -> Result<(), RequestError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(RequestError::NegativeAmount { field, value });
    }
    Ok(())
}
