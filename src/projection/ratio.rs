//! Dividend reinvestment ratios

use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of each year's gross dividend added back to principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReinvestmentRatio {
    Full,
    ThreeQuarters,
    Half,
    Quarter,
    None,
}

impl ReinvestmentRatio {
    /// All strategies, in report column order
    pub const ALL: [ReinvestmentRatio; 5] = [
        ReinvestmentRatio::Full,
        ReinvestmentRatio::ThreeQuarters,
        ReinvestmentRatio::Half,
        ReinvestmentRatio::Quarter,
        ReinvestmentRatio::None,
    ];

    /// Reinvested fraction in [0, 1]
    pub fn fraction(self) -> f64 {
        match self {
            ReinvestmentRatio::Full => 1.0,
            ReinvestmentRatio::ThreeQuarters => 0.75,
            ReinvestmentRatio::Half => 0.50,
            ReinvestmentRatio::Quarter => 0.25,
            ReinvestmentRatio::None => 0.0,
        }
    }

    pub fn percent(self) -> u32 {
        match self {
            ReinvestmentRatio::Full => 100,
            ReinvestmentRatio::ThreeQuarters => 75,
            ReinvestmentRatio::Half => 50,
            ReinvestmentRatio::Quarter => 25,
            ReinvestmentRatio::None => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReinvestmentRatio::Full => "100%",
            ReinvestmentRatio::ThreeQuarters => "75%",
            ReinvestmentRatio::Half => "50%",
            ReinvestmentRatio::Quarter => "25%",
            ReinvestmentRatio::None => "0%",
        }
    }

    /// Nothing is withdrawn under full reinvestment
    pub fn is_full(self) -> bool {
        self == ReinvestmentRatio::Full
    }

    /// Position within [`ReinvestmentRatio::ALL`]
    pub fn index(self) -> usize {
        match self {
            ReinvestmentRatio::Full => 0,
            ReinvestmentRatio::ThreeQuarters => 1,
            ReinvestmentRatio::Half => 2,
            ReinvestmentRatio::Quarter => 3,
            ReinvestmentRatio::None => 4,
        }
    }
}

impl fmt::Display for ReinvestmentRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
