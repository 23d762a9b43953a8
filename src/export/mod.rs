//! Semicolon-delimited CSV export of the yearly results
//!
//! One row per year plus a trailing `Summary (<N> Yrs)` row copied from the
//! last year. Files start with a UTF-8 byte-order mark so spreadsheet
//! applications pick the right encoding, and every amount is rounded to two
//! decimals on the way out.

use crate::projection::{ReinvestmentRatio, YearResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
pub const DELIMITER: u8 = b';';
pub const DEFAULT_FILE_NAME: &str = "investment_growth_simulation.csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no simulation results to export")]
    Empty,

    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to process results file {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    fn with_path(self, path: &Path) -> Self {
        match self {
            ExportError::Csv(source) => ExportError::File {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

/// One line of the exported file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    /// Year number, or the summary label on the last row
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "StartingValue")]
    pub starting_value: f64,
    #[serde(rename = "CapitalGrowth")]
    pub capital_growth: f64,
    #[serde(rename = "GrossDividend")]
    pub gross_dividend: f64,

    #[serde(rename = "Gain_100")]
    pub gain_100: f64,
    #[serde(rename = "EndValue_100")]
    pub end_value_100: f64,
    #[serde(rename = "CumulativeGrossDividend_100")]
    pub cumulative_gross_dividend_100: f64,

    #[serde(rename = "Withdrawn_75")]
    pub withdrawn_75: f64,
    #[serde(rename = "CumulativeWithdrawn_75")]
    pub cumulative_withdrawn_75: f64,
    #[serde(rename = "Gain_75")]
    pub gain_75: f64,
    #[serde(rename = "EndValue_75")]
    pub end_value_75: f64,

    #[serde(rename = "Withdrawn_50")]
    pub withdrawn_50: f64,
    #[serde(rename = "CumulativeWithdrawn_50")]
    pub cumulative_withdrawn_50: f64,
    #[serde(rename = "Gain_50")]
    pub gain_50: f64,
    #[serde(rename = "EndValue_50")]
    pub end_value_50: f64,

    #[serde(rename = "Withdrawn_25")]
    pub withdrawn_25: f64,
    #[serde(rename = "CumulativeWithdrawn_25")]
    pub cumulative_withdrawn_25: f64,
    #[serde(rename = "Gain_25")]
    pub gain_25: f64,
    #[serde(rename = "EndValue_25")]
    pub end_value_25: f64,

    #[serde(rename = "Withdrawn_0")]
    pub withdrawn_0: f64,
    #[serde(rename = "CumulativeWithdrawn_0")]
    pub cumulative_withdrawn_0: f64,
    #[serde(rename = "Gain_0")]
    pub gain_0: f64,
    #[serde(rename = "EndValue_0")]
    pub end_value_0: f64,
}

/// Round to cents
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// (withdrawn, cumulative withdrawn, gain, end value) of a partial strategy
fn partial(year: &YearResult, ratio: ReinvestmentRatio) -> (f64, f64, f64, f64) {
    let s = year.strategy(ratio);
    (
        round2(s.withdrawn().unwrap_or(0.0)),
        round2(s.cumulative_withdrawn().unwrap_or(0.0)),
        round2(s.gain),
        round2(s.end_value),
    )
}

impl ExportRow {
    fn from_year(year: &YearResult, label: String) -> Self {
        let full = year.strategy(ReinvestmentRatio::Full);
        let (withdrawn_75, cumulative_withdrawn_75, gain_75, end_value_75) =
            partial(year, ReinvestmentRatio::ThreeQuarters);
        let (withdrawn_50, cumulative_withdrawn_50, gain_50, end_value_50) =
            partial(year, ReinvestmentRatio::Half);
        let (withdrawn_25, cumulative_withdrawn_25, gain_25, end_value_25) =
            partial(year, ReinvestmentRatio::Quarter);
        let (withdrawn_0, cumulative_withdrawn_0, gain_0, end_value_0) =
            partial(year, ReinvestmentRatio::None);

        Self {
            year: label,
            starting_value: round2(year.starting_value),
            capital_growth: round2(year.capital_growth),
            gross_dividend: round2(year.gross_dividend),
            gain_100: round2(full.gain),
            end_value_100: round2(full.end_value),
            cumulative_gross_dividend_100: round2(full.cumulative_gross_dividend().unwrap_or(0.0)),
            withdrawn_75,
            cumulative_withdrawn_75,
            gain_75,
            end_value_75,
            withdrawn_50,
            cumulative_withdrawn_50,
            gain_50,
            end_value_50,
            withdrawn_25,
            cumulative_withdrawn_25,
            gain_25,
            end_value_25,
            withdrawn_0,
            cumulative_withdrawn_0,
            gain_0,
            end_value_0,
        }
    }

    /// Whether this is the trailing summary line
    pub fn is_summary(&self) -> bool {
        self.year.starts_with("Summary")
    }

    /// Year number for per-year rows
    pub fn year_number(&self) -> Option<u32> {
        self.year.parse().ok()
    }

    /// Terminal end value for a ratio
    pub fn end_value(&self, ratio: ReinvestmentRatio) -> f64 {
        match ratio {
            ReinvestmentRatio::Full => self.end_value_100,
            ReinvestmentRatio::ThreeQuarters => self.end_value_75,
            ReinvestmentRatio::Half => self.end_value_50,
            ReinvestmentRatio::Quarter => self.end_value_25,
            ReinvestmentRatio::None => self.end_value_0,
        }
    }

    /// Cumulative gross dividend (100%) or cumulative withdrawn (others)
    pub fn cumulative(&self, ratio: ReinvestmentRatio) -> f64 {
        match ratio {
            ReinvestmentRatio::Full => self.cumulative_gross_dividend_100,
            ReinvestmentRatio::ThreeQuarters => self.cumulative_withdrawn_75,
            ReinvestmentRatio::Half => self.cumulative_withdrawn_50,
            ReinvestmentRatio::Quarter => self.cumulative_withdrawn_25,
            ReinvestmentRatio::None => self.cumulative_withdrawn_0,
        }
    }
}

/// Label of the trailing summary row
pub fn summary_label(period_years: u32) -> String {
    format!("Summary ({period_years} Yrs)")
}

/// Build the rows to export: every year, then the summary row
pub fn export_rows(years: &[YearResult]) -> Vec<ExportRow> {
    let mut rows: Vec<ExportRow> = years
        .iter()
        .map(|y| ExportRow::from_year(y, y.year.to_string()))
        .collect();
    if let Some(last) = years.last() {
        rows.push(ExportRow::from_year(last, summary_label(last.year)));
    }
    rows
}

/// Write the results as CSV to any writer
pub fn write_results<W: Write>(mut writer: W, years: &[YearResult]) -> Result<(), ExportError> {
    if years.is_empty() {
        return Err(ExportError::Empty);
    }

    writer.write_all(UTF8_BOM).map_err(csv::Error::from)?;
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);
    for row in export_rows(years) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Save the results to a file. The in-memory results are left untouched
/// whether or not this succeeds.
pub fn save_results(path: impl AsRef<Path>, years: &[YearResult]) -> Result<(), ExportError> {
    let path = path.as_ref();
    if years.is_empty() {
        return Err(ExportError::Empty);
    }

    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_results(BufWriter::new(file), years).map_err(|e| e.with_path(path))?;

    log::info!("wrote {} years of results to {}", years.len(), path.display());
    Ok(())
}

/// Parse a previously exported file
pub fn read_results<R: Read>(mut reader: R) -> Result<Vec<ExportRow>, ExportError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(csv::Error::from)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes.as_slice());

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .from_reader(content);
    let rows = csv_reader
        .deserialize()
        .collect::<Result<Vec<ExportRow>, csv::Error>>()?;
    Ok(rows)
}

pub fn load_results(path: impl AsRef<Path>) -> Result<Vec<ExportRow>, ExportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_results(file).map_err(|e| e.with_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::simulate;
    use approx::assert_abs_diff_eq;

    fn export_to_string(years: &[YearResult]) -> Vec<u8> {
        let mut buffer = Vec::new();
        write_results(&mut buffer, years).expect("export");
        buffer
    }

    #[test]
    fn test_file_layout() {
        let years = simulate(10_000.0, 2, 7.0, 2.0).unwrap();
        let bytes = export_to_string(&years);
        assert!(bytes.starts_with(UTF8_BOM));

        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(
            "Year;StartingValue;CapitalGrowth;GrossDividend;Gain_100;EndValue_100;CumulativeGrossDividend_100;Withdrawn_75;"
        ));
        assert!(lines[0].ends_with("Withdrawn_0;CumulativeWithdrawn_0;Gain_0;EndValue_0"));
        assert_eq!(lines[0].split(';').count(), 23);
        assert!(lines[1].starts_with("1;10000"));
        assert!(lines[3].starts_with("Summary (2 Yrs);"));
    }

    #[test]
    fn test_values_rounded_to_cents() {
        let years = simulate(1_000.0, 3, 3.3333, 1.1111).unwrap();
        for row in export_rows(&years) {
            for value in [row.starting_value, row.gain_75, row.end_value_0, row.cumulative_withdrawn_25] {
                assert_abs_diff_eq!(value, round2(value), epsilon = 1e-12);
            }
        }
        // rounding never feeds back into the results
        assert_abs_diff_eq!(years[0].capital_growth, 33.333, epsilon = 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let years = simulate(12_345.67, 12, 6.5, 2.75).unwrap();
        let rows = read_results(export_to_string(&years).as_slice()).unwrap();
        assert_eq!(rows.len(), years.len() + 1);

        for (row, year) in rows.iter().zip(&years) {
            assert_eq!(row.year_number(), Some(year.year));
            assert!(!row.is_summary());
            assert_abs_diff_eq!(row.starting_value, year.starting_value, epsilon = 0.005);
            assert_abs_diff_eq!(row.capital_growth, year.capital_growth, epsilon = 0.005);
            assert_abs_diff_eq!(row.gross_dividend, year.gross_dividend, epsilon = 0.005);
            for ratio in ReinvestmentRatio::ALL {
                let s = year.strategy(ratio);
                assert_abs_diff_eq!(row.end_value(ratio), s.end_value, epsilon = 0.005);
                assert_abs_diff_eq!(row.cumulative(ratio), s.cumulative(), epsilon = 0.005);
            }
            assert_abs_diff_eq!(
                row.withdrawn_50,
                year.strategy(ReinvestmentRatio::Half).withdrawn().unwrap(),
                epsilon = 0.005
            );
        }

        let summary = rows.last().unwrap();
        let last = years.last().unwrap();
        assert!(summary.is_summary());
        assert_eq!(summary.year, "Summary (12 Yrs)");
        for ratio in ReinvestmentRatio::ALL {
            assert_eq!(summary.end_value(ratio), round2(last.strategy(ratio).end_value));
            assert_eq!(summary.cumulative(ratio), round2(last.strategy(ratio).cumulative()));
        }
        assert_eq!(summary.starting_value, round2(last.starting_value));
    }

    #[test]
    fn test_empty_results_rejected() {
        let mut buffer = Vec::new();
        assert!(matches!(write_results(&mut buffer, &[]), Err(ExportError::Empty)));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_save_and_load_file() {
        let years = simulate(10_000.0, 5, 7.0, 2.0).unwrap();
        let path = std::env::temp_dir().join(format!("dividend_growth_export_{}.csv", std::process::id()));
        save_results(&path, &years).unwrap();
        let rows = load_results(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].end_value_100, 10_900.0);
    }

    #[test]
    fn test_unwritable_path_reports_path() {
        let years = simulate(10_000.0, 1, 7.0, 2.0).unwrap();
        let path = std::env::temp_dir().join("no_such_dir_for_export").join("out.csv");
        let err = save_results(&path, &years).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("out.csv"));
        // results are still intact
        assert_eq!(years.len(), 1);
    }
}
