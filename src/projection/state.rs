//! Running state of one reinvestment strategy

use super::{compute_year, Payout, ReinvestmentRatio, StrategyYear};

/// Balance and accumulators carried from year to year for one ratio
#[derive(Debug, Clone)]
pub struct StrategyState {
    pub ratio: ReinvestmentRatio,
    pub balance: f64,
    /// Only reported for full reinvestment
    pub cumulative_gross_dividend: f64,
    /// Only reported for the four partial strategies
    pub cumulative_withdrawn: f64,
}

impl StrategyState {
    pub fn new(ratio: ReinvestmentRatio, initial_sum: f64) -> Self {
        Self {
            ratio,
            balance: initial_sum,
            cumulative_gross_dividend: 0.0,
            cumulative_withdrawn: 0.0,
        }
    }

    /// Simulate one year and roll the balance forward to its end value
    pub fn advance(&mut self, growth_rate_percent: f64, dividend_yield_percent: f64) -> StrategyYear {
        let step = compute_year(
            self.ratio,
            self.balance,
            growth_rate_percent,
            dividend_yield_percent,
        );

        let payout = if self.ratio.is_full() {
            self.cumulative_gross_dividend += step.gross_dividend;
            Payout::Reinvested {
                cumulative_gross_dividend: self.cumulative_gross_dividend,
            }
        } else {
            self.cumulative_withdrawn += step.withdrawn;
            Payout::Withdrawn {
                withdrawn: step.withdrawn,
                cumulative_withdrawn: self.cumulative_withdrawn,
            }
        };

        self.balance = step.end_value;

        StrategyYear {
            ratio: self.ratio,
            starting_value: step.starting_value,
            capital_growth: step.capital_growth,
            gross_dividend: step.gross_dividend,
            gain: step.gain,
            end_value: step.end_value,
            payout,
        }
    }
}
