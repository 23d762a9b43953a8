//! Simulation inputs: text parsing and range validation
//!
//! An input-collection surface hands over five text fields. Everything
//! numeric is parsed here, tolerating `,` as the decimal separator, and
//! range-checked before the engine is ever invoked.

mod parse;

pub use parse::{parse_decimal, parse_whole};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default instrument label shown when none is supplied
pub const DEFAULT_INSTRUMENT_NAME: &str = "ETF Investment";
pub const DEFAULT_INITIAL_SUM: &str = "10000";
pub const DEFAULT_PERIOD: &str = "20";
pub const DEFAULT_GROWTH_RATE: &str = "7";
pub const DEFAULT_DIVIDEND_YIELD: &str = "2";

/// Longest accepted holding period
pub const MAX_PERIOD_YEARS: u32 = 10_000;

/// The numeric input fields, in the order they are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    InitialSum,
    PeriodYears,
    GrowthRate,
    DividendYield,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::InitialSum => "Initial Investment Sum",
            Field::PeriodYears => "Investment Period",
            Field::GrowthRate => "Expected Yearly Growth",
            Field::DividendYield => "Expected Dividend Yield",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid input in field '{field}': please enter a number (got '{value}')")]
    NotANumber { field: Field, value: String },

    #[error("Invalid input in field '{field}': please enter a whole number (got '{value}')")]
    NotAWholeNumber { field: Field, value: String },

    #[error("{field} {constraint}")]
    OutOfRange {
        field: Field,
        constraint: &'static str,
    },
}

impl InputError {
    /// The field the error refers to
    pub fn field(&self) -> Field {
        match self {
            InputError::NotANumber { field, .. }
            | InputError::NotAWholeNumber { field, .. }
            | InputError::OutOfRange { field, .. } => *field,
        }
    }
}

/// Validated inputs for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    /// Display label only, no effect on the numbers
    #[serde(default = "default_instrument_name")]
    pub instrument_name: String,
    pub initial_sum: f64,
    pub period_years: u32,
    pub growth_rate_percent: f64,
    pub dividend_yield_percent: f64,
}

fn default_instrument_name() -> String {
    DEFAULT_INSTRUMENT_NAME.to_string()
}

impl SimulationInput {
    pub fn new(
        instrument_name: impl Into<String>,
        initial_sum: f64,
        period_years: u32,
        growth_rate_percent: f64,
        dividend_yield_percent: f64,
    ) -> Self {
        Self {
            instrument_name: instrument_name.into(),
            initial_sum,
            period_years,
            growth_rate_percent,
            dividend_yield_percent,
        }
    }

    /// Check every numeric field against its allowed range
    pub fn validate(&self) -> Result<(), InputError> {
        check_values(
            self.initial_sum,
            self.period_years,
            self.growth_rate_percent,
            self.dividend_yield_percent,
        )
    }
}

/// Range checks shared by [`SimulationInput::validate`] and the engine
pub(crate) fn check_values(
    initial_sum: f64,
    period_years: u32,
    growth_rate_percent: f64,
    dividend_yield_percent: f64,
) -> Result<(), InputError> {
    let out_of_range = |field: Field, constraint: &'static str| -> Result<(), InputError> {
        Err(InputError::OutOfRange { field, constraint })
    };

    if !initial_sum.is_finite() {
        return out_of_range(Field::InitialSum, "must be a finite number.");
    }
    if initial_sum < 0.0 {
        return out_of_range(Field::InitialSum, "cannot be negative.");
    }
    if period_years == 0 {
        return out_of_range(Field::PeriodYears, "must be a positive integer.");
    }
    if period_years > MAX_PERIOD_YEARS {
        return out_of_range(Field::PeriodYears, "is too large.");
    }
    if !growth_rate_percent.is_finite() {
        return out_of_range(Field::GrowthRate, "must be a finite number.");
    }
    if growth_rate_percent < -100.0 {
        return out_of_range(Field::GrowthRate, "cannot be less than -100%.");
    }
    if !dividend_yield_percent.is_finite() {
        return out_of_range(Field::DividendYield, "must be a finite number.");
    }
    if dividend_yield_percent < 0.0 {
        return out_of_range(Field::DividendYield, "cannot be negative.");
    }
    Ok(())
}

/// The five input fields exactly as typed by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    pub instrument_name: String,
    pub initial_sum: String,
    pub period_years: String,
    pub growth_rate_percent: String,
    pub dividend_yield_percent: String,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            instrument_name: DEFAULT_INSTRUMENT_NAME.to_string(),
            initial_sum: DEFAULT_INITIAL_SUM.to_string(),
            period_years: DEFAULT_PERIOD.to_string(),
            growth_rate_percent: DEFAULT_GROWTH_RATE.to_string(),
            dividend_yield_percent: DEFAULT_DIVIDEND_YIELD.to_string(),
        }
    }
}

impl RawInput {
    /// Parse and validate all fields, failing on the first bad one
    pub fn parse(&self) -> Result<SimulationInput, InputError> {
        let initial_sum = parse_decimal(Field::InitialSum, &self.initial_sum)?;
        let period = parse_whole(Field::PeriodYears, &self.period_years)?;
        let growth_rate_percent = parse_decimal(Field::GrowthRate, &self.growth_rate_percent)?;
        let dividend_yield_percent =
            parse_decimal(Field::DividendYield, &self.dividend_yield_percent)?;

        // saturates; `validate` rejects anything outside 1..=MAX_PERIOD_YEARS
        let period_years = period.clamp(0, i64::from(u32::MAX)) as u32;

        let input = SimulationInput {
            instrument_name: self.instrument_name.clone(),
            initial_sum,
            period_years,
            growth_rate_percent,
            dividend_yield_percent,
        };
        input.validate()?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(sum: &str, period: &str, growth: &str, dividend: &str) -> RawInput {
        RawInput {
            instrument_name: "Test".to_string(),
            initial_sum: sum.to_string(),
            period_years: period.to_string(),
            growth_rate_percent: growth.to_string(),
            dividend_yield_percent: dividend.to_string(),
        }
    }

    #[test]
    fn test_default_raw_input_parses() {
        let input = RawInput::default().parse().expect("defaults are valid");
        assert_eq!(input.instrument_name, "ETF Investment");
        assert_eq!(input.initial_sum, 10_000.0);
        assert_eq!(input.period_years, 20);
        assert_eq!(input.growth_rate_percent, 7.0);
        assert_eq!(input.dividend_yield_percent, 2.0);
    }

    #[test]
    fn test_comma_decimal_separator() {
        let input = raw("10000,50", "5", "6,5", "1,25").parse().unwrap();
        assert_eq!(input.initial_sum, 10_000.5);
        assert_eq!(input.growth_rate_percent, 6.5);
        assert_eq!(input.dividend_yield_percent, 1.25);
    }

    #[test]
    fn test_period_is_truncated() {
        let input = raw("100", "3,9", "5", "1").parse().unwrap();
        assert_eq!(input.period_years, 3);
    }

    #[test]
    fn test_non_numeric_field_is_named() {
        let err = raw("100", "5", "seven", "1").parse().unwrap_err();
        assert_eq!(err.field(), Field::GrowthRate);
        assert!(err.to_string().contains("Expected Yearly Growth"));

        let err = raw("100", "five", "7", "1").parse().unwrap_err();
        assert!(matches!(err, InputError::NotAWholeNumber { field: Field::PeriodYears, .. }));
    }

    #[test]
    fn test_range_rejections() {
        let err = raw("-1", "5", "7", "2").parse().unwrap_err();
        assert_eq!(err.to_string(), "Initial Investment Sum cannot be negative.");

        let err = raw("100", "0", "7", "2").parse().unwrap_err();
        assert_eq!(err.to_string(), "Investment Period must be a positive integer.");

        let err = raw("100", "-3", "7", "2").parse().unwrap_err();
        assert_eq!(err.field(), Field::PeriodYears);

        let err = raw("100", "5", "-100,5", "2").parse().unwrap_err();
        assert_eq!(err.to_string(), "Expected Yearly Growth cannot be less than -100%.");

        let err = raw("100", "5", "7", "-0.1").parse().unwrap_err();
        assert_eq!(err.field(), Field::DividendYield);
    }

    #[test]
    fn test_boundaries_are_accepted() {
        let input = raw("0", "1", "-100", "0").parse().unwrap();
        assert_eq!(input.initial_sum, 0.0);
        assert_eq!(input.growth_rate_percent, -100.0);
    }

    #[test]
    fn test_first_bad_field_wins() {
        let err = raw("abc", "x", "y", "z").parse().unwrap_err();
        assert_eq!(err.field(), Field::InitialSum);
    }

    #[test]
    fn test_huge_period_rejected() {
        let err = raw("100", "99999999999", "7", "2").parse().unwrap_err();
        assert_eq!(
            err,
            InputError::OutOfRange { field: Field::PeriodYears, constraint: "is too large." }
        );
    }

    #[test]
    fn test_period_ceiling() {
        let input = raw("100", "10000", "7", "2").parse().unwrap();
        assert_eq!(input.period_years, MAX_PERIOD_YEARS);

        let err = raw("100", "10001", "7", "2").parse().unwrap_err();
        assert_eq!(
            err,
            InputError::OutOfRange { field: Field::PeriodYears, constraint: "is too large." }
        );

        let err = SimulationInput::new("Test", 1.0, 4_000_000_000, 1.0, 1.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Field::PeriodYears);
    }

    #[test]
    fn test_initial_sum_checked_before_period() {
        let err = raw("-1", "0", "7", "2").parse().unwrap_err();
        assert_eq!(err.field(), Field::InitialSum);
        assert_eq!(err.to_string(), "Initial Investment Sum cannot be negative.");

        let err = raw("-1", "99999999999", "7", "2").parse().unwrap_err();
        assert_eq!(err.field(), Field::InitialSum);
    }

    #[test]
    fn test_json_defaults_instrument_name() {
        let input: SimulationInput = serde_json::from_str(
            r#"{"initialSum": 500, "periodYears": 2, "growthRatePercent": 3, "dividendYieldPercent": 1}"#,
        )
        .unwrap();
        assert_eq!(input.instrument_name, DEFAULT_INSTRUMENT_NAME);
        assert!(input.validate().is_ok());
    }
}
