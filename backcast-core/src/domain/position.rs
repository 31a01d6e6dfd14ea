//! Position tracking and trade direction.

use serde::{Deserialize, Serialize};

/// Direction of an entry or an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// +1.0 for Long, -1.0 for Short.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

/// One position per symbol per run, owned by the broker simulator.
///
/// Quantity is signed: positive for long, negative for short. A zero
/// quantity never appears; a closed position is removed from the book
/// instead of being kept at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
    pub avg_entry_price: f64,
}

impl Position {
    pub fn open(symbol: String, direction: Direction, quantity: f64, entry_price: f64) -> Self {
        Self {
            symbol,
            quantity: quantity * direction.sign(),
            avg_entry_price: entry_price,
        }
    }

    pub fn is_long(&self) -> bool {
        self.quantity > 0.0
    }

    pub fn is_short(&self) -> bool {
        self.quantity < 0.0
    }

    pub fn direction(&self) -> Direction {
        if self.quantity < 0.0 {
            Direction::Short
        } else {
            Direction::Long
        }
    }

    /// Signed mark-to-market value at the given price.
    pub fn market_value(&self, current_price: f64) -> f64 {
        self.quantity * current_price
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.quantity * (current_price - self.avg_entry_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_position_marks_positively() {
        let pos = Position::open("INFY".into(), Direction::Long, 10.0, 100.0);
        assert!(pos.is_long());
        assert_eq!(pos.direction(), Direction::Long);
        assert_eq!(pos.market_value(110.0), 1100.0);
        assert_eq!(pos.unrealized_pnl(110.0), 100.0);
    }

    #[test]
    fn short_position_gains_on_decline() {
        let pos = Position::open("INFY".into(), Direction::Short, 10.0, 100.0);
        assert!(pos.is_short());
        assert_eq!(pos.quantity, -10.0);
        assert_eq!(pos.market_value(90.0), -900.0);
        assert_eq!(pos.unrealized_pnl(90.0), 100.0);
    }

    #[test]
    fn direction_sign() {
        assert_eq!(Direction::Long.sign(), 1.0);
        assert_eq!(Direction::Short.sign(), -1.0);
    }
}
