//! Equity curve sampling.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Total equity observed at one bar's close: cash plus the mark-to-market
/// value of every open position. One point per bar, append-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: NaiveDateTime,
    pub equity: f64,
}
