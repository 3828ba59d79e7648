use crate::check::{run_check, CheckArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::render::render_rules;
use clap::{Args, Parser, Subcommand};
use laa_eligibility::config::AppConfig;
use laa_eligibility::eligibility::{AssetClass, EligibilityEngine};
use laa_eligibility::error::AppError;
use laa_eligibility::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "laa",
    about = "Check loan-against-asset eligibility for gold, property, and listed shares",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single loan request
    Check(CheckArgs),
    /// Print the active lending rules as JSON
    Rules(RulesArgs),
    /// Walk through the reference scenarios for each asset class
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct RulesArgs {
    /// Limit the snapshot to one asset class (gold, property, or shares)
    #[arg(long)]
    asset_class: Option<AssetClass>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let engine = EligibilityEngine::new(config.rule_config()?)?;
    info!(
        ?config.environment,
        rules_version = %engine.rules().version,
        "eligibility engine ready"
    );

    match cli.command {
        Command::Check(args) => run_check(&engine, config.advisory.annotator().as_ref(), args),
        Command::Rules(args) => {
            println!("{}", render_rules(engine.rules(), args.asset_class)?);
            Ok(())
        }
        Command::Demo(args) => run_demo(&engine, config.advisory.annotator().as_ref(), args),
    }
}
