//! Fuel Cycle Model CLI
//!
//! Runs one scenario over the inputs in a data directory and writes the
//! annual supply/demand balance panel.

use anyhow::{Context, Result};
use clap::Parser;
use fuel_cycle_model::data::{load_scenario, DEFAULT_DATA_PATH};
use fuel_cycle_model::{ModelConfig, ScenarioRunner, TailsPolicy, YearRange};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fuel_cycle_model", version, about = "Uranium, conversion and enrichment balance model")]
struct Args {
    /// Directory holding the base CSV tables (scenario tables under scenarios/)
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    /// Scenario key to select from the scenario tables
    #[arg(long, default_value = "base")]
    scenario: String,

    #[arg(long)]
    start_year: i32,

    #[arg(long)]
    end_year: i32,

    /// Tails assay policy: optimize or fixed
    #[arg(long, default_value = "optimize")]
    tails_policy: TailsPolicy,

    /// Output path for the balance panel CSV
    #[arg(long, default_value = "sd_panel.csv")]
    output: PathBuf,

    /// Print the full scenario result as JSON instead of writing CSV
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let range = YearRange::new(args.start_year, args.end_year)?;
    let config = ModelConfig {
        tails_policy: args.tails_policy,
        ..ModelConfig::default()
    };

    let runner = ScenarioRunner::from_csv_path(&args.data_dir, config)
        .with_context(|| format!("loading inputs from {}", args.data_dir.display()))?;
    let scenario = load_scenario(&args.data_dir, &args.scenario)
        .with_context(|| format!("loading scenario '{}'", args.scenario))?;

    let result = runner.run(&scenario, range)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Fuel Cycle Model v{}", env!("CARGO_PKG_VERSION"));
    println!("Scenario: {}  ({}-{})\n", result.scenario_name, range.start, range.end);
    println!(
        "{:>5} {:>12} {:>12} {:>12} {:>12} {:>8} {:>14} {:>8}",
        "Year", "Feed tU", "Primary", "Secondary", "Balance", "Ratio", "Inventory", "InvYrs"
    );
    println!("{}", "-".repeat(92));
    for row in &result.sd_panel {
        println!(
            "{:>5} {:>12.0} {:>12.0} {:>12.0} {:>12.0} {:>8.3} {:>14.0} {:>8.2}",
            row.year,
            row.feed_tu,
            row.primary_supply_tu,
            row.secondary_supply_tu,
            row.balance_tu,
            row.balance_ratio,
            row.inventory_tu,
            row.inventory_years,
        );
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &result.sd_panel {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("\nBalance panel written to: {}", args.output.display());
    Ok(())
}
