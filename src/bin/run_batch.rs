//! Run projections for every scenario in a scenario file
//!
//! Usage: run_batch <scenarios.csv> [--output summary.csv]
//!
//! Writes one summary line per scenario with the terminal value and
//! cumulative dividends/withdrawals of each reinvestment strategy.

use anyhow::{Context, Result};
use clap::Parser;
use dividend_growth::batch::{load_scenarios_file, run_batch, write_summaries};
use dividend_growth::projection::ReinvestmentRatio;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (CSV with one input set per row)
    input: PathBuf,

    /// Where to write the per-scenario summary
    #[arg(long, default_value = "batch_summary.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input.display());
    let scenarios = load_scenarios_file(&args.input)?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    println!("Running projections...");
    let proj_start = Instant::now();
    let outcomes = run_batch(&scenarios);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    write_summaries(BufWriter::new(file), &outcomes)?;
    println!("Output written to {}", args.output.display());

    println!("\nBatch Summary:");
    for outcome in &outcomes {
        match outcome.result.as_ref().map(|p| p.summary()) {
            Ok(Some(summary)) => {
                let full = summary.strategy(ReinvestmentRatio::Full);
                let none = summary.strategy(ReinvestmentRatio::None);
                println!(
                    "  {:<24} {:>3} yrs  100%: {:>14.2}  0%: {:>14.2} (+{:.2} withdrawn)",
                    outcome.name, summary.period_years, full.end_value, none.end_value, none.cumulative
                );
            }
            Ok(None) => println!("  {:<24} no results", outcome.name),
            Err(e) => println!("  {:<24} rejected: {e}", outcome.name),
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_flag() {
        let args = Args::try_parse_from(["run_batch", "scenarios.csv", "--output", "out.csv"]).unwrap();
        assert_eq!(args.input, PathBuf::from("scenarios.csv"));
        assert_eq!(args.output, PathBuf::from("out.csv"));
    }

    #[test]
    fn test_default_output() {
        let args = Args::try_parse_from(["run_batch", "scenarios.csv"]).unwrap();
        assert_eq!(args.output, PathBuf::from("batch_summary.csv"));
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["run_batch"]).is_err());
    }
}
