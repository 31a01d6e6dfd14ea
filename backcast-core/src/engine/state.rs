//! Engine configuration and run result.

use serde::{Deserialize, Serialize};

use crate::broker::{DEFAULT_COMMISSION_RATE, DEFAULT_ORDER_SIZE, DEFAULT_STARTING_CASH};
use crate::domain::{EquityPoint, Trade};

/// Configuration for a single run: the cash/sizing/commission knobs.
///
/// Strategy parameters live in the `ParameterSet`; everything here applies
/// to any strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub starting_cash: f64,
    pub order_size: f64,
    pub commission_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_cash: DEFAULT_STARTING_CASH,
            order_size: DEFAULT_ORDER_SIZE,
            commission_rate: DEFAULT_COMMISSION_RATE,
        }
    }
}

/// Result of a complete run: the raw material for the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Equity at each bar's close, one point per bar of the trade feed.
    pub equity_curve: Vec<EquityPoint>,
    /// Completed round-trip trades, in closing order.
    pub trades: Vec<Trade>,
    pub starting_cash: f64,
    pub final_equity: f64,
    pub bar_count: usize,
    /// Leading bars on which the strategy could not emit.
    pub warmup_bars: usize,
}
