use crate::check::EligibilityReport;
use crate::render::{format_inr, render_text};
use clap::Args;
use laa_eligibility::eligibility::{
    AdvisoryAnnotator, EligibilityEngine, GoldLocation, LoanRequest, RequestError, ShareIndex,
};
use laa_eligibility::error::AppError;
use rust_decimal_macros::dec;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Attach advisory notes to each scenario.
    #[arg(long)]
    pub(crate) advisory: bool,
    /// Print one summary line per scenario instead of full reports.
    #[arg(long)]
    pub(crate) brief: bool,
}

pub(crate) struct Scenario {
    pub(crate) title: &'static str,
    pub(crate) request: LoanRequest,
}

pub(crate) fn scenarios() -> Result<Vec<Scenario>, RequestError> {
    Ok(vec![
        Scenario {
            title: "Urban gold at the LTV ceiling",
            request: LoanRequest::gold(dec!(100000), dec!(75000), GoldLocation::Urban, 22)?,
        },
        Scenario {
            title: "Urban gold above the LTV ceiling",
            request: LoanRequest::gold(dec!(100000), dec!(80000), GoldLocation::Urban, 22)?,
        },
        Scenario {
            title: "Low-purity gold",
            request: LoanRequest::gold(dec!(100000), dec!(50000), GoldLocation::Urban, 16)?,
        },
        Scenario {
            title: "Rural gold under the relaxed ceiling",
            request: LoanRequest::gold(dec!(100000), dec!(85000), GoldLocation::Rural, 22)?,
        },
        Scenario {
            title: "Property close to its circle rate",
            request: LoanRequest::property(dec!(5000000), dec!(3000000), dec!(4800000))?,
        },
        Scenario {
            title: "Property overvalued against its circle rate",
            request: LoanRequest::property(dec!(5000000), dec!(3000000), dec!(4500000))?,
        },
        Scenario {
            title: "NIFTY50 shares",
            request: LoanRequest::shares(dec!(100000), dec!(50000), ShareIndex::Nifty50)?,
        },
        Scenario {
            title: "Shares outside the major indices",
            request: LoanRequest::shares(dec!(100000), dec!(42000), ShareIndex::Other)?,
        },
    ])
}

pub(crate) fn run_demo(
    engine: &EligibilityEngine,
    annotator: &dyn AdvisoryAnnotator,
    args: DemoArgs,
) -> Result<(), AppError> {
    let annotator = args.advisory.then_some(annotator);

    println!("Loan against asset eligibility demo");
    println!("Rules version: {}", engine.rules().version);

    for (position, scenario) in scenarios()?.into_iter().enumerate() {
        let report = EligibilityReport::build(engine, annotator, scenario.request);
        println!("\n{}. {}", position + 1, scenario.title);

        if args.brief {
            println!(
                "{} (max eligible {})",
                report.result.summary(),
                format_inr(report.result.max_eligible_amount())
            );
        } else {
            println!("{}", render_text(&report));
        }
    }

    Ok(())
}
