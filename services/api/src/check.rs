use crate::infra::scoreboard_service;
use clap::Args;
use combinability_scoreboard::config::AppConfig;
use combinability_scoreboard::error::AppError;
use combinability_scoreboard::pricing::combinability::{FailedFareView, FarePathReport, UnitReport};
use combinability_scoreboard::pricing::{fixtures, PricingUnitType};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// JSON document to check
    pub(crate) file: PathBuf,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_check_unit(args: CheckArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let pu = fixtures::load_pricing_unit(&args.file)?;
    debug!(file = %args.file.display(), fares = pu.fare_usages.len(), "checking pricing unit");

    let report = scoreboard_service(&config.scoreboard).check_pricing_unit(&pu);
    if args.json {
        return print_json(&report);
    }
    print_unit(None, &report);
    Ok(())
}

pub(crate) fn run_check_path(args: CheckArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let fare_path = fixtures::load_fare_path(&args.file)?;
    debug!(
        file = %args.file.display(),
        units = fare_path.pricing_units.len(),
        "checking fare path"
    );

    let report = scoreboard_service(&config.scoreboard).check_fare_path(&fare_path);
    if args.json {
        return print_json(&report);
    }
    print_fare_path(&report);
    Ok(())
}

fn print_json<T: Serialize>(report: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(report)?;
    println!("{rendered}");
    Ok(())
}

fn print_fare_path(report: &FarePathReport) {
    println!("=== Fare Path ===");
    for (index, unit) in report.units.iter().enumerate() {
        print_unit(Some(index), unit);
    }
    println!();
    println!("Verdict: {}", report.summary);
    if let Some(fare) = &report.failed_fare {
        println!("Failed fare: {}", describe_fare(fare));
    }
    print_diagnostics(&report.diagnostics);
}

fn print_unit(index: Option<usize>, report: &UnitReport) {
    let heading = match index {
        Some(index) => format!("Pricing unit {}", index + 1),
        None => "Pricing unit".to_string(),
    };
    let subtype = match report.shape.shape {
        PricingUnitType::OpenJaw => {
            format!(" ({})", report.shape.open_jaw_subtype.label())
        }
        _ => String::new(),
    };
    println!("--- {heading}: {}{subtype} ---", report.shape.shape.label());
    println!("Verdict: {}", report.summary);
    if let Some(fare) = &report.failed_fare {
        println!("Failed fare: {}", describe_fare(fare));
    }
    print_diagnostics(&report.diagnostics);
}

fn print_diagnostics(lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    println!("Diagnostics:");
    for line in lines {
        println!("  {}", line.trim_start());
    }
}

fn describe_fare(fare: &FailedFareView) -> String {
    let position = match fare.pricing_unit {
        Some(unit) => format!("unit {} fare {}", unit + 1, fare.fare_usage + 1),
        None => format!("fare {}", fare.fare_usage + 1),
    };
    format!(
        "{position} ({} {}-{})",
        fare.carrier, fare.fare_class, fare.rule_number
    )
}
