//! Per-year result records and the terminal summary

use super::ReinvestmentRatio;
use crate::input::SimulationInput;
use serde::{Deserialize, Serialize};

/// What happens to the part of the dividend that is not reinvested
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Payout {
    /// Full reinvestment: nothing leaves the portfolio
    #[serde(rename_all = "camelCase")]
    Reinvested { cumulative_gross_dividend: f64 },
    /// Partial or no reinvestment: the remainder is paid out
    #[serde(rename_all = "camelCase")]
    Withdrawn {
        withdrawn: f64,
        cumulative_withdrawn: f64,
    },
}

/// One strategy's figures for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyYear {
    pub ratio: ReinvestmentRatio,
    /// This strategy's own balance at the start of the year
    pub starting_value: f64,
    pub capital_growth: f64,
    pub gross_dividend: f64,
    /// Capital growth plus the reinvested part of the dividend
    pub gain: f64,
    pub end_value: f64,
    pub payout: Payout,
}

impl StrategyYear {
    pub fn reinvested(&self) -> f64 {
        self.gross_dividend * self.ratio.fraction()
    }

    /// Amount paid out this year, `None` under full reinvestment
    pub fn withdrawn(&self) -> Option<f64> {
        match self.payout {
            Payout::Withdrawn { withdrawn, .. } => Some(withdrawn),
            Payout::Reinvested { .. } => None,
        }
    }

    pub fn cumulative_withdrawn(&self) -> Option<f64> {
        match self.payout {
            Payout::Withdrawn { cumulative_withdrawn, .. } => Some(cumulative_withdrawn),
            Payout::Reinvested { .. } => None,
        }
    }

    pub fn cumulative_gross_dividend(&self) -> Option<f64> {
        match self.payout {
            Payout::Reinvested { cumulative_gross_dividend } => Some(cumulative_gross_dividend),
            Payout::Withdrawn { .. } => None,
        }
    }

    /// The running total tracked for this strategy: gross dividends for
    /// full reinvestment, withdrawals otherwise
    pub fn cumulative(&self) -> f64 {
        match self.payout {
            Payout::Reinvested { cumulative_gross_dividend } => cumulative_gross_dividend,
            Payout::Withdrawn { cumulative_withdrawn, .. } => cumulative_withdrawn,
        }
    }
}

/// Everything reported for one simulated year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearResult {
    /// 1-based
    pub year: u32,
    /// Reference columns, taken from the 100% trajectory
    pub starting_value: f64,
    pub capital_growth: f64,
    pub gross_dividend: f64,
    /// Indexed like [`ReinvestmentRatio::ALL`]
    pub strategies: [StrategyYear; 5],
}

impl YearResult {
    pub fn strategy(&self, ratio: ReinvestmentRatio) -> &StrategyYear {
        &self.strategies[ratio.index()]
    }
}

/// Result of one simulation run, handed back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub input: SimulationInput,
    pub years: Vec<YearResult>,
}

impl Projection {
    pub fn summary(&self) -> Option<Summary> {
        summarize(&self.years)
    }

    pub fn last_year(&self) -> Option<&YearResult> {
        self.years.last()
    }
}

/// Terminal figures for one strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySummary {
    pub ratio: ReinvestmentRatio,
    pub end_value: f64,
    pub last_gain: f64,
    /// Last year's withdrawal, `None` under full reinvestment
    pub last_withdrawn: Option<f64>,
    /// Total gross dividends (100%) or total withdrawn (others)
    pub cumulative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub period_years: u32,
    pub strategies: [StrategySummary; 5],
}

impl Summary {
    pub fn strategy(&self, ratio: ReinvestmentRatio) -> &StrategySummary {
        &self.strategies[ratio.index()]
    }
}

/// Read the terminal figures off the last year; nothing is recomputed
pub fn summarize(years: &[YearResult]) -> Option<Summary> {
    let last = years.last()?;
    let strategies = last.strategies.map(|s| StrategySummary {
        ratio: s.ratio,
        end_value: s.end_value,
        last_gain: s.gain,
        last_withdrawn: s.withdrawn(),
        cumulative: s.cumulative(),
    });
    Some(Summary {
        period_years: last.year,
        strategies,
    })
}
