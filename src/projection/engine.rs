//! Year-by-year compounding of the five reinvestment strategies

use super::{Projection, ReinvestmentRatio, StrategyState, YearResult};
use crate::input::{check_values, InputError, SimulationInput};

/// One ratio's arithmetic for a single year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearStep {
    pub starting_value: f64,
    pub capital_growth: f64,
    pub gross_dividend: f64,
    pub reinvested: f64,
    pub withdrawn: f64,
    pub gain: f64,
    pub end_value: f64,
}

/// Compute one year for one ratio from that ratio's own starting balance
pub fn compute_year(
    ratio: ReinvestmentRatio,
    starting_balance: f64,
    growth_rate_percent: f64,
    dividend_yield_percent: f64,
) -> YearStep {
    let capital_growth = starting_balance * (growth_rate_percent / 100.0);
    let gross_dividend = starting_balance * (dividend_yield_percent / 100.0);
    let reinvested = gross_dividend * ratio.fraction();
    let withdrawn = gross_dividend * (1.0 - ratio.fraction());
    let gain = capital_growth + reinvested;

    YearStep {
        starting_value: starting_balance,
        capital_growth,
        gross_dividend,
        reinvested,
        withdrawn,
        gain,
        end_value: starting_balance + gain,
    }
}

/// Run the simulation and return one record per year, in year order.
///
/// Fails only on out-of-range input; values are never rounded here.
pub fn simulate(
    initial_sum: f64,
    period_years: u32,
    growth_rate_percent: f64,
    dividend_yield_percent: f64,
) -> Result<Vec<YearResult>, InputError> {
    check_values(initial_sum, period_years, growth_rate_percent, dividend_yield_percent)?;

    log::debug!(
        "simulating {period_years} years: initial={initial_sum}, growth={growth_rate_percent}%, yield={dividend_yield_percent}%"
    );

    let mut states = ReinvestmentRatio::ALL.map(|ratio| StrategyState::new(ratio, initial_sum));
    let mut years = Vec::with_capacity(period_years as usize);

    for year in 1..=period_years {
        let strategies = states
            .each_mut()
            .map(|state| state.advance(growth_rate_percent, dividend_yield_percent));

        let reference = strategies[ReinvestmentRatio::Full.index()];
        log::trace!(
            "year {year}: end values {:?}",
            strategies.map(|s| s.end_value)
        );

        years.push(YearResult {
            year,
            starting_value: reference.starting_value,
            capital_growth: reference.capital_growth,
            gross_dividend: reference.gross_dividend,
            strategies,
        });
    }

    Ok(years)
}

/// Validate the input and simulate it
pub fn project(input: &SimulationInput) -> Result<Projection, InputError> {
    input.validate()?;
    let years = simulate(
        input.initial_sum,
        input.period_years,
        input.growth_rate_percent,
        input.dividend_yield_percent,
    )?;
    Ok(Projection {
        input: input.clone(),
        years,
    })
}
