use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::super::domain::{AssetClass, Money, Rate, ShareIndex, MAX_PURITY_KARAT};

// Canonical policy shipped with the binary. Any of these can be overridden by a
// rule file without touching the evaluators.
const CANONICAL_VERSION: &str = "rbi-2025.1";

const GOLD_URBAN_LTV_MAX: Rate = dec!(0.75);
const GOLD_RURAL_LTV_MAX: Rate = dec!(0.90);
const GOLD_MIN_PURITY_KARAT: u8 = 18;
const GOLD_MAX_LOAN_AMOUNT: Money = dec!(2000000);
const GOLD_TENURE_MONTHS: u16 = 3;

const PROPERTY_LTV_MAX: Rate = dec!(0.70);
const PROPERTY_CIRCLE_RATE_VARIANCE_MAX: Rate = dec!(0.10);
const PROPERTY_MAX_LOAN_AMOUNT: Money = dec!(50000000);

const SHARES_NIFTY50_LTV: Rate = dec!(0.50);
const SHARES_NIFTY100_LTV: Rate = dec!(0.45);
const SHARES_FALLBACK_LTV: Rate = dec!(0.40);
const SHARES_MAX_LOAN_AMOUNT: Money = dec!(2000000);

/// Lending policy for all asset classes. Loaded once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub version: String,
    pub gold: GoldRules,
    pub property: PropertyRules,
    pub shares: ShareRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoldRules {
    pub urban_ltv_max: Rate,
    pub rural_ltv_max: Rate,
    pub min_purity_karat: u8,
    pub max_loan_amount: Money,
    /// Bullet repayment tenure. Informational only; no check depends on it.
    #[serde(default = "default_gold_tenure")]
    pub tenure_months: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyRules {
    pub ltv_max: Rate,
    /// Maximum relative deviation between declared value and circle rate.
    pub circle_rate_variance_max: Rate,
    pub max_loan_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShareRules {
    #[serde(default)]
    pub index_ltv: BTreeMap<ShareIndex, Rate>,
    /// Rate for `Other` and for any index missing from `index_ltv`.
    pub fallback_ltv: Rate,
    pub max_loan_amount: Money,
}

impl ShareRules {
    pub fn ltv_for(&self, index: ShareIndex) -> Rate {
        self.index_ltv
            .get(&index)
            .copied()
            .unwrap_or(self.fallback_ltv)
    }
}

/// Borrowed view over the rules of a single asset class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssetRules<'a> {
    Gold(&'a GoldRules),
    Property(&'a PropertyRules),
    Shares(&'a ShareRules),
}

/// Rejected rule configuration. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum RuleConfigError {
    #[error("`{field}` must lie in (0, 1] (found {value})")]
    FractionOutOfRange { field: String, value: Decimal },
    #[error("`{field}` must be greater than zero (found {value})")]
    NonPositiveAmount { field: String, value: Decimal },
    #[error("`gold.min_purity_karat` must be between 1 and 24 (found {0})")]
    PurityOutOfRange(u8),
    #[error("rule version label must not be empty")]
    MissingVersion,
    #[error("unable to read rule file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed rule document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RuleConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, RuleConfigError> {
        let config: RuleConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, RuleConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RuleConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn for_asset_class(&self, asset_class: AssetClass) -> AssetRules<'_> {
        match asset_class {
            AssetClass::Gold => AssetRules::Gold(&self.gold),
            AssetClass::Property => AssetRules::Property(&self.property),
            AssetClass::Shares => AssetRules::Shares(&self.shares),
        }
    }

    /// Check every threshold against its valid range.
    pub fn validate(&self) -> Result<(), RuleConfigError> {
        if self.version.trim().is_empty() {
            return Err(RuleConfigError::MissingVersion);
        }

        fraction("gold.urban_ltv_max", self.gold.urban_ltv_max)?;
        fraction("gold.rural_ltv_max", self.gold.rural_ltv_max)?;
        if self.gold.min_purity_karat == 0 || self.gold.min_purity_karat > MAX_PURITY_KARAT {
            return Err(RuleConfigError::PurityOutOfRange(self.gold.min_purity_karat));
        }
        positive("gold.max_loan_amount", self.gold.max_loan_amount)?;

        fraction("property.ltv_max", self.property.ltv_max)?;
        fraction(
            "property.circle_rate_variance_max",
            self.property.circle_rate_variance_max,
        )?;
        positive("property.max_loan_amount", self.property.max_loan_amount)?;

        for (index, rate) in &self.shares.index_ltv {
            fraction(&format!("shares.index_ltv.{index}"), *rate)?;
        }
        fraction("shares.fallback_ltv", self.shares.fallback_ltv)?;
        positive("shares.max_loan_amount", self.shares.max_loan_amount)?;

        Ok(())
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        let mut index_ltv = BTreeMap::new();
        index_ltv.insert(ShareIndex::Nifty50, SHARES_NIFTY50_LTV);
        index_ltv.insert(ShareIndex::Nifty100, SHARES_NIFTY100_LTV);

        Self {
            version: CANONICAL_VERSION.to_string(),
            gold: GoldRules {
                urban_ltv_max: GOLD_URBAN_LTV_MAX,
                rural_ltv_max: GOLD_RURAL_LTV_MAX,
                min_purity_karat: GOLD_MIN_PURITY_KARAT,
                max_loan_amount: GOLD_MAX_LOAN_AMOUNT,
                tenure_months: GOLD_TENURE_MONTHS,
            },
            property: PropertyRules {
                ltv_max: PROPERTY_LTV_MAX,
                circle_rate_variance_max: PROPERTY_CIRCLE_RATE_VARIANCE_MAX,
                max_loan_amount: PROPERTY_MAX_LOAN_AMOUNT,
            },
            shares: ShareRules {
                index_ltv,
                fallback_ltv: SHARES_FALLBACK_LTV,
                max_loan_amount: SHARES_MAX_LOAN_AMOUNT,
            },
        }
    }
}

fn default_gold_tenure() -> u16 {
    GOLD_TENURE_MONTHS
}

fn fraction(field: &str, value: Rate) -> Result<(), RuleConfigError> {
    if value <= Decimal::ZERO || value > Decimal::ONE {
        return Err(RuleConfigError::FractionOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn positive(field: &str, value: Money) -> Result<(), RuleConfigError> {
    if value <= Decimal::ZERO {
        return Err(RuleConfigError::NonPositiveAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
