//! Dividend reinvestment growth simulator
//!
//! Projects an investment year by year under five parallel dividend
//! reinvestment strategies (100%, 75%, 50%, 25% and 0% of each year's
//! gross dividend put back into principal).
//!
//! - [`input`]: text parsing and range validation of the run inputs
//! - [`projection`]: the compounding engine and its per-year records
//! - [`report`]: fixed-width text table for terminals
//! - [`export`]: semicolon-delimited CSV output and re-import
//! - [`batch`]: many scenarios projected in parallel
//! - [`api`]: JSON request handling for the HTTP function

pub mod api;
pub mod batch;
pub mod config;
pub mod export;
pub mod input;
pub mod projection;
pub mod report;

pub use config::AppConfig;
pub use input::{Field, InputError, RawInput, SimulationInput};
pub use projection::{
    project, simulate, summarize, Payout, Projection, ReinvestmentRatio, StrategyYear, Summary,
    YearResult,
};
