use crate::check::EligibilityReport;
use clap::ValueEnum;
use laa_eligibility::eligibility::{AssetClass, AssetRules, RuleConfig};
use laa_eligibility::error::AppError;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub(crate) fn render_report(
    report: &EligibilityReport,
    format: OutputFormat,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

pub(crate) fn render_text(report: &EligibilityReport) -> String {
    let result = &report.result;
    let verdict = if result.approved() {
        "APPROVED"
    } else {
        "REJECTED"
    };

    let mut lines = vec![
        format!("{}: {}", report.product, verdict),
        format!("- Asset value: {}", format_inr(report.request.asset_value())),
        format!("- Loan amount: {}", format_inr(report.request.loan_amount())),
        format!(
            "- LTV used: {} (limit {})",
            format_percent(result.ltv_used_percent()),
            format_percent(result.ltv_limit_percent())
        ),
        format!("- Max eligible: {}", format_inr(result.max_eligible_amount())),
        String::new(),
    ];

    if report.violation_summaries.is_empty() {
        lines.push("Violations: none".to_string());
    } else {
        lines.push("Violations".to_string());
        lines.extend(
            report
                .violation_summaries
                .iter()
                .map(|summary| format!("- {summary}")),
        );
    }

    if let Some(note) = &report.advisory {
        lines.push(String::new());
        lines.push(format!("Advisory ({})", note.source));
        lines.push(note.text.clone());
    }

    lines.push(String::new());
    lines.push(format!(
        "Rules {} | evaluated {}",
        report.rules_version,
        report.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.join("\n")
}

/// Snapshot of the policy in force, optionally narrowed to one asset class.
pub(crate) fn render_rules(
    rules: &RuleConfig,
    asset_class: Option<AssetClass>,
) -> Result<String, AppError> {
    let rendered = match asset_class {
        Some(asset_class) => serde_json::to_string_pretty(&AssetRulesView {
            version: &rules.version,
            asset_class,
            rules: rules.for_asset_class(asset_class),
        })?,
        None => serde_json::to_string_pretty(rules)?,
    };
    Ok(rendered)
}

#[derive(Serialize)]
struct AssetRulesView<'a> {
    version: &'a str,
    asset_class: AssetClass,
    rules: AssetRules<'a>,
}

/// Rupee amount with Indian digit grouping, whole rupees only.
pub(crate) fn format_inr(amount: Decimal) -> String {
    let whole = amount.trunc();
    let sign = if whole.is_sign_negative() && !whole.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = whole.abs().normalize().to_string();

    format!("{sign}₹{}", group_indian(&digits))
}

// Last three digits form the first group, then pairs: 12,34,567.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

pub(crate) fn format_percent(value: Decimal) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use laa_eligibility::eligibility::{
        CitationAnnotator, EligibilityEngine, GoldLocation, LoanRequest,
    };
    use rust_decimal_macros::dec;

    #[test]
    fn groups_rupees_the_indian_way() {
        assert_eq!(format_inr(dec!(0)), "₹0");
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(1000)), "₹1,000");
        assert_eq!(format_inr(dec!(75000)), "₹75,000");
        assert_eq!(format_inr(dec!(100000)), "₹1,00,000");
        assert_eq!(format_inr(dec!(5000000)), "₹50,00,000");
        assert_eq!(format_inr(dec!(123456789)), "₹12,34,56,789");
    }

    #[test]
    fn drops_paise() {
        assert_eq!(format_inr(dec!(1234567.89)), "₹12,34,567");
        assert_eq!(format_inr(dec!(-0.5)), "₹0");
    }

    #[test]
    fn text_report_lists_violations_in_order() {
        let engine = EligibilityEngine::default();
        let request = LoanRequest::gold(dec!(100000), dec!(80000), GoldLocation::Urban, 16)
            .expect("valid request");

        let text = render_text(&EligibilityReport::build(&engine, None, request));

        assert!(text.starts_with("Gold Loan: REJECTED"));
        assert!(text.contains("- Asset value: ₹1,00,000"));
        assert!(text.contains("- LTV used: 80.0% (limit 75.0%)"));
        assert!(text.contains("- Max eligible: ₹75,000"));
        let purity = text.find("purity below minimum").expect("purity listed");
        let ltv = text.find("LTV exceeds limit").expect("ltv listed");
        assert!(purity < ltv);
        assert!(!text.contains("Advisory"));
    }

    #[test]
    fn rules_snapshot_narrows_to_one_asset_class() {
        let rules = RuleConfig::default();

        let rendered = render_rules(&rules, Some(AssetClass::Shares)).expect("rules serialize");
        let view: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(view["version"], "rbi-2025.1");
        assert_eq!(view["asset_class"], "shares");
        assert_eq!(view["rules"]["fallback_ltv"], "0.40");
        assert_eq!(view["rules"]["index_ltv"]["NIFTY50"], "0.50");
        assert!(view["rules"].get("urban_ltv_max").is_none());
    }

    #[test]
    fn rules_snapshot_defaults_to_every_asset_class() {
        let rules = RuleConfig::default();

        let rendered = render_rules(&rules, None).expect("rules serialize");

        assert_eq!(
            RuleConfig::from_json_str(&rendered).expect("snapshot reloads"),
            rules
        );
    }

    #[test]
    fn text_report_includes_advisory_section_when_present() {
        let engine = EligibilityEngine::default();
        let request = LoanRequest::gold(dec!(100000), dec!(75000), GoldLocation::Urban, 22)
            .expect("valid request");

        let text = render_text(&EligibilityReport::build(
            &engine,
            Some(&CitationAnnotator),
            request,
        ));

        assert!(text.starts_with("Gold Loan: APPROVED\n"));
        assert!(text.contains("\n\nViolations: none\n\nAdvisory (RBI Master Direction)\n"));
        assert!(text.lines().last().is_some_and(|line| line.starts_with("Rules rbi-2025.1")));
    }

    #[test]
    fn percentages_keep_one_decimal() {
        assert_eq!(format_percent(dec!(75)), "75.0%");
        assert_eq!(format_percent(dec!(42.00)), "42.0%");
    }
}
