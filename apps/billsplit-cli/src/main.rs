//! billsplit - turn the monthly PDF phone bill into per-member shares
//!
//! Thin driver around bill-engine: loads configuration, runs the pipeline,
//! writes the CSV artifact and prints the summary the mailer sends out.
//! Exit-code policy lives here, not in the engine.

mod config;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use bill_engine::{analyze_bill, artifact, AnalysisOptions, SharePolicy};
use config::Config;

/// Splits the family phone bill according to the configured policy.
#[derive(Parser, Debug)]
#[command(name = "billsplit", version, about)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "billsplit.yml")]
    config: PathBuf,

    /// Analyze this PDF instead of the configured bill_path.
    #[arg(short, long)]
    bill: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("billsplit=info".parse()?)
                .add_directive("bill_engine=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;
    let bill_path = args.bill.unwrap_or_else(|| config.bill_path.clone());

    let options = AnalysisOptions {
        summary_page: config.page_number,
        front_page: config.front_page_number,
        family_count: config.family_count,
        policy: SharePolicy::from_flag(config.plan_cost_for_all_members),
        member_names: config.resolve_member_names()?,
    };

    info!("Analyzing bill {}", bill_path.display());
    let summary = analyze_bill(&bill_path, &options)?;

    artifact::write_summary_csv(&config.summarized_bill_path, &summary.rows)?;
    if let Some(period) = &summary.billing_period {
        artifact::write_billing_period(&config.billing_period_path, period)?;
    }

    print!(
        "{}",
        report::render_summary(&summary.rows, summary.billing_period.as_deref())
    );
    Ok(())
}
