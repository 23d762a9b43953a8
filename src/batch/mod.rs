//! Batch runs over many scenarios
//!
//! Scenarios come from a semicolon-delimited file with the header
//! `Name;InitialSum;Period;GrowthRate;DividendYield`. Each row goes through
//! the same text parsing as interactive input, so `7,5` is accepted. The
//! projections themselves are independent and run in parallel.

use crate::export::{round2, DELIMITER, UTF8_BOM};
use crate::input::{InputError, RawInput, SimulationInput};
use crate::projection::{project, Projection, ReinvestmentRatio};
use rayon::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario on line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: InputError,
    },
}

#[derive(Debug, Deserialize)]
struct ScenarioRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "InitialSum")]
    initial_sum: String,
    #[serde(rename = "Period")]
    period: String,
    #[serde(rename = "GrowthRate")]
    growth_rate: String,
    #[serde(rename = "DividendYield")]
    dividend_yield: String,
}

impl From<ScenarioRecord> for RawInput {
    fn from(record: ScenarioRecord) -> Self {
        RawInput {
            instrument_name: record.name,
            initial_sum: record.initial_sum,
            period_years: record.period,
            growth_rate_percent: record.growth_rate,
            dividend_yield_percent: record.dividend_yield,
        }
    }
}

/// Parse scenarios, failing on the first invalid row
pub fn load_scenarios<R: Read>(mut reader: R) -> Result<Vec<SimulationInput>, BatchError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(csv::Error::from)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes.as_slice());

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .from_reader(content);

    let mut scenarios = Vec::new();
    for (index, record) in csv_reader.deserialize::<ScenarioRecord>().enumerate() {
        // header is line 1
        let line = index + 2;
        let raw = RawInput::from(record?);
        let input = raw.parse().map_err(|source| BatchError::Row { line, source })?;
        scenarios.push(input);
    }
    Ok(scenarios)
}

pub fn load_scenarios_file(path: impl AsRef<Path>) -> Result<Vec<SimulationInput>, BatchError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scenarios = load_scenarios(file)?;
    log::info!("loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Outcome of one scenario in a batch
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<Projection, InputError>,
}

/// Project every scenario in parallel; output order matches input order
pub fn run_batch(scenarios: &[SimulationInput]) -> Vec<ScenarioOutcome> {
    scenarios
        .par_iter()
        .map(|input| {
            let result = project(input);
            if let Err(e) = &result {
                log::warn!("scenario '{}' rejected: {e}", input.instrument_name);
            }
            ScenarioOutcome {
                name: input.instrument_name.clone(),
                result,
            }
        })
        .collect()
}

fn summary_header() -> Vec<String> {
    let mut header = vec!["Name".to_string(), "Years".to_string()];
    for ratio in ReinvestmentRatio::ALL {
        let pct = ratio.percent();
        header.push(format!("EndValue_{pct}"));
        if ratio.is_full() {
            header.push(format!("CumulativeGrossDividend_{pct}"));
        } else {
            header.push(format!("CumulativeWithdrawn_{pct}"));
        }
    }
    header.push("Error".to_string());
    header
}

/// One line per scenario with the terminal figures of each strategy
pub fn write_summaries<W: Write>(writer: W, outcomes: &[ScenarioOutcome]) -> Result<(), BatchError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);
    csv_writer.write_record(summary_header())?;

    let columns = 2 + 2 * ReinvestmentRatio::ALL.len();
    for outcome in outcomes {
        let mut record = vec![outcome.name.clone()];
        match outcome.result.as_ref().map(|p| p.summary()) {
            Ok(Some(summary)) => {
                record.push(summary.period_years.to_string());
                for s in &summary.strategies {
                    record.push(round2(s.end_value).to_string());
                    record.push(round2(s.cumulative).to_string());
                }
                record.push(String::new());
            }
            Ok(None) => {
                record.resize(columns, String::new());
                record.push("no results".to_string());
            }
            Err(e) => {
                record.resize(columns, String::new());
                record.push(e.to_string());
            }
        }
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SCENARIOS: &str = "Name;InitialSum;Period;GrowthRate;DividendYield\n\
        World ETF;10000;20;7;2\n\
        Dividend ETF; 5000,50 ;10;4,5;3,5\n\
        Flat;1000;1;0;0\n";

    #[test]
    fn test_load_scenarios() {
        let scenarios = load_scenarios(SCENARIOS.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[1].instrument_name, "Dividend ETF");
        assert_eq!(scenarios[1].initial_sum, 5000.5);
        assert_eq!(scenarios[1].growth_rate_percent, 4.5);
    }

    #[test]
    fn test_bad_row_reports_line() {
        let text = "Name;InitialSum;Period;GrowthRate;DividendYield\nA;100;5;7;2\nB;100;0;7;2\n";
        let err = load_scenarios(text.as_bytes()).unwrap_err();
        match err {
            BatchError::Row { line, source } => {
                assert_eq!(line, 3);
                assert_eq!(source.to_string(), "Investment Period must be a positive integer.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let scenarios = load_scenarios(SCENARIOS.as_bytes()).unwrap();
        let outcomes = run_batch(&scenarios);
        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["World ETF", "Dividend ETF", "Flat"]);

        let flat = outcomes[2].result.as_ref().unwrap();
        assert_eq!(flat.years.len(), 1);
        assert_relative_eq!(flat.years[0].strategies[4].end_value, 1000.0);
    }

    #[test]
    fn test_invalid_scenario_is_reported_not_fatal() {
        let scenarios = vec![
            SimulationInput::new("ok", 100.0, 2, 5.0, 1.0),
            SimulationInput::new("bad", -5.0, 2, 5.0, 1.0),
        ];
        let outcomes = run_batch(&scenarios);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());

        let mut buffer = Vec::new();
        write_summaries(&mut buffer, &outcomes).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name;Years;EndValue_100;CumulativeGrossDividend_100;EndValue_75"));
        assert!(lines[1].starts_with("ok;2;"));
        assert!(lines[2].ends_with("Initial Investment Sum cannot be negative."));
        assert_eq!(lines[2].split(';').count(), lines[0].split(';').count());
    }
}
