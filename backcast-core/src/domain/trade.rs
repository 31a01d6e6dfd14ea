//! Trade, a completed round trip from entry to exit.

use super::position::Direction;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A complete round-trip trade record.
///
/// Created only when a position transitions to flat, never on partial
/// adjustment. `pnl` is the realized gross profit:
/// (exit - entry) * quantity * direction sign, before commission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: String,
    pub direction: Direction,
    /// Absolute quantity; the sign lives in `direction`.
    pub quantity: f64,
    pub entry_timestamp: NaiveDateTime,
    pub entry_price: f64,
    pub exit_timestamp: NaiveDateTime,
    pub exit_price: f64,
    pub pnl: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}
