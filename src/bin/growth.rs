//! Project one investment under all five reinvestment strategies
//!
//! Prints the yearly table and, with `--output`, saves the results as CSV.

use anyhow::Result;
use clap::Parser;
use dividend_growth::config::AppConfig;
use dividend_growth::export::{save_results, ExportError};
use dividend_growth::input::RawInput;
use dividend_growth::projection::project;
use dividend_growth::report::render_report;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Instrument name shown in the report
    #[arg(long)]
    name: Option<String>,

    /// Initial investment sum (`,` or `.` as decimal separator)
    #[arg(long, allow_hyphen_values = true)]
    initial_sum: Option<String>,

    /// Investment period in years
    #[arg(long, allow_hyphen_values = true)]
    period: Option<String>,

    /// Expected yearly growth in percent
    #[arg(long, allow_hyphen_values = true)]
    growth: Option<String>,

    /// Expected dividend yield in percent
    #[arg(long, allow_hyphen_values = true)]
    dividend_yield: Option<String>,

    /// JSON config with default inputs
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the results to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Save to the configured default file name in the current directory
    #[arg(long, conflicts_with = "output")]
    save: bool,

    /// Print the results as JSON instead of the table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let mut raw = RawInput::from(config.defaults);
    if let Some(name) = args.name {
        raw.instrument_name = name;
    }
    if let Some(value) = args.initial_sum {
        raw.initial_sum = value;
    }
    if let Some(value) = args.period {
        raw.period_years = value;
    }
    if let Some(value) = args.growth {
        raw.growth_rate_percent = value;
    }
    if let Some(value) = args.dividend_yield {
        raw.dividend_yield_percent = value;
    }

    let input = match raw.parse() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Input Error: {e}");
            return Ok(ExitCode::from(2));
        }
    };

    let projection = project(&input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
    } else {
        print!("{}", render_report(&projection));
    }

    let output = match (args.output, args.save) {
        (Some(path), _) => Some(path),
        (None, true) => Some(PathBuf::from(&config.export.file_name)),
        (None, false) => None,
    };

    if let Some(path) = output {
        match save_results(&path, &projection.years) {
            Ok(()) => eprintln!("\nResults saved to file:\n{}", path.display()),
            Err(e @ (ExportError::Io { .. } | ExportError::File { .. })) => {
                eprintln!("Save Error: {e}");
                eprintln!("Make sure the file is not open in another program and the folder is writable.");
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => {
                log::error!("unexpected export failure: {e:?}");
                eprintln!("Unexpected error while saving: {e}");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
