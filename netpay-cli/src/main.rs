use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use netpay_core::{
    BracketSchedule, CompensationInput, Jurisdiction, OverlayRequest, ScenarioInput, evaluate,
};
use netpay_data::{
    BracketTableLoader, default_bracket_rows, default_fx_rate, default_overlay_config,
    default_policy, default_schedule,
};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod export;
mod report;

/// Estimate gross-to-net pay for an expat assignment.
///
/// Applies the work jurisdiction's tax rules to the entered compensation,
/// shows USD equivalents when an FX rate is available, and can layer the
/// US overlay (earned-income exclusion, standard deduction, foreign-tax
/// credit) on top for US citizens and green-card holders.
///
/// Estimates only: excludes social insurance and detailed rules. For
/// precise calculations, consult a qualified tax advisor.
#[derive(Parser, Debug)]
#[command(name = "netpay")]
#[command(version, about, long_about = None)]
struct Args {
    /// Work jurisdiction code (KR, TW, SG, JP, IN, US)
    #[arg(short, long)]
    country: String,

    /// Annual base pay, in local currency
    #[arg(long, default_value_t = Decimal::ZERO)]
    base: Decimal,

    /// Variable pay as a whole percent of base (e.g. 15 for 15%)
    #[arg(long, default_value_t = Decimal::ZERO)]
    variable_pct: Decimal,

    /// Year-1 portion of a multi-year cash award, in local currency
    #[arg(long, default_value_t = Decimal::ZERO)]
    multi_year_cash: Decimal,

    /// Sign-on bonus, in local currency
    #[arg(long, default_value_t = Decimal::ZERO)]
    sign_on: Decimal,

    /// Year-1 RSU vest value, in local currency
    #[arg(long, default_value_t = Decimal::ZERO)]
    rsu: Decimal,

    /// FX rate override (local currency units per USD)
    #[arg(long)]
    fx: Option<Decimal>,

    /// Apply the US overlay (US citizen / green-card holder)
    #[arg(long, default_value_t = false)]
    overlay: bool,

    /// Earned-income exclusion override, in USD
    #[arg(long)]
    exclusion: Option<Decimal>,

    /// Standard deduction override, in USD
    #[arg(long)]
    standard_deduction: Option<Decimal>,

    /// CSV file of bracket rows (jurisdiction,upper_limit,rate) replacing
    /// the default table for the selected country
    #[arg(long)]
    brackets_file: Option<PathBuf>,

    /// Write the scenario summary row to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let jurisdiction = Jurisdiction::parse(&args.country).with_context(|| {
        format!(
            "Unknown country code '{}' (expected one of KR, TW, SG, JP, IN, US)",
            args.country
        )
    })?;

    let compensation = CompensationInput {
        base: args.base,
        variable_pct: args.variable_pct / Decimal::ONE_HUNDRED,
        multi_year_cash: args.multi_year_cash,
        sign_on: args.sign_on,
        rsu_year1: args.rsu,
    };

    let local_rows = match &args.brackets_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            let records = BracketTableLoader::parse(file)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
            let mut tables = BracketTableLoader::group(&records)
                .with_context(|| format!("Failed to read bracket table: {}", path.display()))?;
            tables.remove(&jurisdiction).with_context(|| {
                format!(
                    "No rows for {} in: {}",
                    jurisdiction.as_str(),
                    path.display()
                )
            })?
        }
        None => default_bracket_rows(jurisdiction),
    };
    let local_schedule = BracketSchedule::normalize(&local_rows);

    let policy = default_policy(jurisdiction);
    let fx_rate = args.fx.unwrap_or_else(|| default_fx_rate(jurisdiction));

    let home_schedule = default_schedule(Jurisdiction::UnitedStates);
    let overlay = args.overlay.then(|| {
        let mut config = default_overlay_config();
        if let Some(exclusion) = args.exclusion {
            config.exclusion = exclusion;
        }
        if let Some(standard_deduction) = args.standard_deduction {
            config.standard_deduction = standard_deduction;
        }
        OverlayRequest {
            home_schedule: &home_schedule,
            config,
        }
    });

    let input = ScenarioInput {
        jurisdiction,
        compensation,
        fx_rate,
        policy: &policy,
        local_schedule: &local_schedule,
        overlay,
    };
    let result = evaluate(&input);
    tracing::debug!(country = jurisdiction.as_str(), "scenario evaluated");

    report::print_report(jurisdiction, &result);

    if let Some(path) = &args.export {
        let row = export::SummaryRow::from_scenario(jurisdiction, fx_rate, &compensation, &result);
        let file = File::create(path)
            .with_context(|| format!("Failed to create: {}", path.display()))?;
        export::write_summary(file, &row)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
        println!();
        println!("Wrote summary to: {}", path.display());
    }

    Ok(())
}
