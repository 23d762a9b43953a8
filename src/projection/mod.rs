//! Projection engine for the five dividend reinvestment strategies

mod engine;
mod ratio;
mod results;
mod state;

pub use engine::{compute_year, project, simulate, YearStep};
pub use ratio::ReinvestmentRatio;
pub use results::{
    summarize, Payout, Projection, StrategySummary, StrategyYear, Summary, YearResult,
};
pub use state::StrategyState;
