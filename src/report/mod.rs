//! Fixed-width text report of a projection
//!
//! Amounts are rounded for display only; the projection itself is untouched.

use crate::projection::{Projection, ReinvestmentRatio, StrategyYear, YearResult};
use std::fmt;

const SHARED_HEADERS: [&str; 4] = ["Year", "Start Value", "Cap Growth", "Gross Div"];
const YEAR_WIDTH: usize = 5;
const NARROW: usize = 12;
const WIDE: usize = 15;

/// Group the integer part in threes separated by spaces: `1 234 567.89`
pub fn format_amount(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Column headers and widths, one list per table column
fn columns() -> Vec<(String, usize)> {
    let mut columns: Vec<(String, usize)> = SHARED_HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), if i == 0 { YEAR_WIDTH } else { NARROW }))
        .collect();

    for ratio in ReinvestmentRatio::ALL {
        let label = ratio.label();
        columns.push((format!("Gain ({label})"), NARROW));
        columns.push((format!("End Value ({label})"), WIDE));
        if ratio.is_full() {
            columns.push((format!("Cum. Gross Div ({label})"), WIDE));
        } else {
            columns.push((format!("Withdrawn ({label})"), NARROW));
            columns.push((format!("Cum. Withdrawn ({label})"), WIDE));
        }
    }
    columns
}

/// Per-strategy cells in column order
fn strategy_cells(strategy: &StrategyYear) -> Vec<String> {
    let mut cells = vec![
        format_amount(strategy.gain, 0),
        format_amount(strategy.end_value, 0),
    ];
    match strategy.withdrawn() {
        Some(withdrawn) => {
            cells.push(format_amount(withdrawn, 0));
            cells.push(format_amount(strategy.cumulative(), 0));
        }
        None => cells.push(format_amount(strategy.cumulative(), 0)),
    }
    cells
}

fn write_row(f: &mut fmt::Formatter<'_>, widths: &[usize], cells: &[String]) -> fmt::Result {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i == 0 {
            line.push_str(&format!("{cell:<width$}"));
        } else {
            line.push_str(&format!(" {cell:>width$}"));
        }
    }
    writeln!(f, "{line}")
}

fn year_cells(year: &YearResult) -> Vec<String> {
    let mut cells = vec![
        year.year.to_string(),
        format_amount(year.starting_value, 0),
        format_amount(year.capital_growth, 0),
        format_amount(year.gross_dividend, 0),
    ];
    for strategy in &year.strategies {
        cells.extend(strategy_cells(strategy));
    }
    cells
}

/// Display adapter rendering the full report for a projection
pub struct Report<'a>(pub &'a Projection);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let projection = self.0;
        let input = &projection.input;

        writeln!(f, "--- Simulation Results: {} ---", input.instrument_name)?;
        writeln!(f, "Initial Investment: {} €", format_amount(input.initial_sum, 2))?;
        writeln!(f, "Period: {} years", input.period_years)?;
        writeln!(f, "Expected Yearly Growth: {} %", format_amount(input.growth_rate_percent, 2))?;
        writeln!(f, "Expected Dividend Yield: {} %", format_amount(input.dividend_yield_percent, 2))?;
        writeln!(f, "{}", "-".repeat(50))?;
        writeln!(f)?;

        let (headers, widths): (Vec<String>, Vec<usize>) = columns().into_iter().unzip();
        let table_width = widths.iter().sum::<usize>() + widths.len() - 1;
        let separator = "-".repeat(table_width);

        write_row(f, &widths, &headers)?;
        writeln!(f, "{separator}")?;
        for year in &projection.years {
            write_row(f, &widths, &year_cells(year))?;
        }
        writeln!(f, "{separator}")?;

        let Some(last) = projection.last_year() else {
            return Ok(());
        };

        let mut summary_cells = vec![
            format!("End ({} Yrs)", input.period_years),
            String::new(),
            String::new(),
            String::new(),
        ];
        for strategy in &last.strategies {
            summary_cells.extend(strategy_cells(strategy));
        }
        write_row(f, &widths, &summary_cells)?;

        writeln!(f)?;
        writeln!(f, "Total Cumulative Amounts Over Period:")?;
        for strategy in &last.strategies {
            let description = if strategy.ratio.is_full() {
                format!("{} Reinvested (Gross Dividends Generated)", strategy.ratio)
            } else {
                format!("{} Reinvestment (Dividends Withdrawn)", strategy.ratio)
            };
            writeln!(f, "  {description}: {} €", format_amount(strategy.cumulative(), 2))?;
        }
        Ok(())
    }
}

/// Render the report as a string
pub fn render_report(projection: &Projection) -> String {
    Report(projection).to_string()
}
