//! Portfolio, the aggregate state of cash plus all open positions.

use super::position::Position;
use std::collections::HashMap;

/// Aggregate cash-and-positions state.
///
/// The equity accounting identity must hold at every bar:
/// `equity == cash + sum(position market values at that bar's close)`.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub cash: f64,
    pub starting_cash: f64,
    pub positions: HashMap<String, Position>,
    pub total_commission: f64,
}

impl Portfolio {
    pub fn new(starting_cash: f64) -> Self {
        Self {
            cash: starting_cash,
            starting_cash,
            positions: HashMap::new(),
            total_commission: 0.0,
        }
    }

    /// Total equity = cash + sum of all position market values.
    ///
    /// Symbols absent from `prices` are marked at their entry price.
    pub fn equity(&self, prices: &HashMap<String, f64>) -> f64 {
        let position_value: f64 = self
            .positions
            .iter()
            .map(|(sym, pos)| {
                let price = prices.get(sym).copied().unwrap_or(pos.avg_entry_price);
                pos.market_value(price)
            })
            .sum();
        self.cash + position_value
    }

    pub fn has_position(&self, symbol: &str) -> bool {
        self.positions.contains_key(symbol)
    }

    pub fn get_position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }
}
