//! Broker simulator: cash ledger, position tracking, fills, commission.
//!
//! Fills are deliberately simple: every intent executes completely at the
//! current bar's close, no slippage, no partial fills, no order book. Buys
//! debit quantity * price * (1 + commission); sells credit
//! quantity * price * (1 - commission). A trade record is appended only when
//! a position closes in full.

use std::collections::HashMap;

use crate::domain::{
    Bar, Direction, IntentAction, OrderIntent, Portfolio, Position, Trade,
};

/// Default starting cash for a run.
pub const DEFAULT_STARTING_CASH: f64 = 100_000.0;
/// Default fixed order size in units.
pub const DEFAULT_ORDER_SIZE: f64 = 10.0;
/// Default commission rate (0.1%).
pub const DEFAULT_COMMISSION_RATE: f64 = 0.001;

#[derive(Debug)]
pub struct Broker {
    portfolio: Portfolio,
    order_size: f64,
    commission_rate: f64,
    trades: Vec<Trade>,
    /// Entry timestamp per open position, for the trade record.
    entry_timestamps: HashMap<String, chrono::NaiveDateTime>,
}

impl Broker {
    pub fn new(starting_cash: f64, order_size: f64, commission_rate: f64) -> Self {
        Self {
            portfolio: Portfolio::new(starting_cash),
            order_size,
            commission_rate,
            trades: Vec::new(),
            entry_timestamps: HashMap::new(),
        }
    }

    /// Execute an intent against the current bar's close.
    ///
    /// Enter while positioned and Exit while flat are ignored; the engine
    /// guards against them and well-behaved strategies never emit them.
    pub fn execute(&mut self, intent: &OrderIntent, bar: &Bar) {
        match intent.action {
            IntentAction::Enter => self.enter(intent, bar),
            IntentAction::Exit => self.exit(intent, bar),
        }
    }

    fn enter(&mut self, intent: &OrderIntent, bar: &Bar) {
        if self.portfolio.has_position(&intent.symbol) {
            return;
        }

        let price = bar.close;
        let notional = self.order_size * price;
        let commission = notional * self.commission_rate;
        match intent.direction {
            Direction::Long => self.portfolio.cash -= notional + commission,
            Direction::Short => self.portfolio.cash += notional - commission,
        }
        self.portfolio.total_commission += commission;
        self.portfolio.positions.insert(
            intent.symbol.clone(),
            Position::open(intent.symbol.clone(), intent.direction, self.order_size, price),
        );
        self.entry_timestamps
            .insert(intent.symbol.clone(), bar.timestamp);
    }

    fn exit(&mut self, intent: &OrderIntent, bar: &Bar) {
        let position = match self.portfolio.positions.remove(&intent.symbol) {
            Some(p) => p,
            None => return,
        };

        let price = bar.close;
        let quantity = position.quantity.abs();
        let notional = quantity * price;
        let commission = notional * self.commission_rate;
        let direction = position.direction();
        match direction {
            Direction::Long => self.portfolio.cash += notional - commission,
            Direction::Short => self.portfolio.cash -= notional + commission,
        }
        self.portfolio.total_commission += commission;

        let entry_timestamp = self
            .entry_timestamps
            .remove(&intent.symbol)
            .unwrap_or(bar.timestamp);
        self.trades.push(Trade {
            symbol: intent.symbol.clone(),
            direction,
            quantity,
            entry_timestamp,
            entry_price: position.avg_entry_price,
            exit_timestamp: bar.timestamp,
            exit_price: price,
            pnl: (price - position.avg_entry_price) * quantity * direction.sign(),
        });
    }

    pub fn cash(&self) -> f64 {
        self.portfolio.cash
    }

    pub fn total_commission(&self) -> f64 {
        self.portfolio.total_commission
    }

    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.portfolio.get_position(symbol)
    }

    /// Equity at the given per-symbol prices: cash + mark-to-market.
    pub fn equity(&self, prices: &HashMap<String, f64>) -> f64 {
        self.portfolio.equity(prices)
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn bar_at(close: f64) -> Bar {
        let mut bars = make_bars(&[close]);
        bars.pop().unwrap()
    }

    fn prices(symbol: &str, price: f64) -> HashMap<String, f64> {
        let mut map = HashMap::new();
        map.insert(symbol.to_string(), price);
        map
    }

    #[test]
    fn long_entry_debits_notional_plus_commission() {
        let mut broker = Broker::new(100_000.0, 10.0, 0.001);
        broker.execute(&OrderIntent::enter("TEST", Direction::Long), &bar_at(100.0));
        // 10 * 100 * 1.001 = 1001.00 exactly.
        assert!((broker.cash() - (100_000.0 - 1001.0)).abs() < 1e-9);
        assert!(broker.position("TEST").unwrap().is_long());
        // Mark-to-market at the entry price: equity is down only the commission.
        let eq = broker.equity(&prices("TEST", 100.0));
        assert!((eq - 99_999.0).abs() < 1e-9);
    }

    #[test]
    fn short_entry_credits_notional_minus_commission() {
        let mut broker = Broker::new(100_000.0, 10.0, 0.001);
        broker.execute(&OrderIntent::enter("TEST", Direction::Short), &bar_at(100.0));
        assert!((broker.cash() - (100_000.0 + 999.0)).abs() < 1e-9);
        assert!(broker.position("TEST").unwrap().is_short());
    }

    #[test]
    fn round_trip_long_records_trade() {
        let mut broker = Broker::new(100_000.0, 10.0, 0.0);
        broker.execute(&OrderIntent::enter("TEST", Direction::Long), &bar_at(100.0));
        broker.execute(&OrderIntent::exit("TEST", Direction::Long), &bar_at(110.0));

        assert!(broker.position("TEST").is_none());
        assert_eq!(broker.trades().len(), 1);
        let trade = &broker.trades()[0];
        assert_eq!(trade.direction, Direction::Long);
        assert!((trade.pnl - 100.0).abs() < 1e-9); // (110 - 100) * 10
        assert!(trade.is_winner());
        // Zero commission: cash reflects the full gain.
        assert!((broker.cash() - 100_100.0).abs() < 1e-9);
    }

    #[test]
    fn round_trip_short_gains_on_decline() {
        let mut broker = Broker::new(100_000.0, 10.0, 0.0);
        broker.execute(&OrderIntent::enter("TEST", Direction::Short), &bar_at(100.0));
        broker.execute(&OrderIntent::exit("TEST", Direction::Short), &bar_at(90.0));

        let trade = &broker.trades()[0];
        assert!((trade.pnl - 100.0).abs() < 1e-9); // (100 - 90) * 10
        assert!((broker.cash() - 100_100.0).abs() < 1e-9);
    }

    #[test]
    fn pnl_is_gross_of_commission() {
        let mut broker = Broker::new(100_000.0, 10.0, 0.001);
        broker.execute(&OrderIntent::enter("TEST", Direction::Long), &bar_at(100.0));
        broker.execute(&OrderIntent::exit("TEST", Direction::Long), &bar_at(110.0));

        let trade = &broker.trades()[0];
        assert!((trade.pnl - 100.0).abs() < 1e-9);
        // Cash nets out both commissions: 100_000 + 100 - 1.0 - 1.1.
        assert!((broker.cash() - 100_097.9).abs() < 1e-9);
        assert!((broker.total_commission() - 2.1).abs() < 1e-9);
    }

    #[test]
    fn duplicate_entry_is_ignored() {
        let mut broker = Broker::new(100_000.0, 10.0, 0.0);
        broker.execute(&OrderIntent::enter("TEST", Direction::Long), &bar_at(100.0));
        let cash_after_first = broker.cash();
        broker.execute(&OrderIntent::enter("TEST", Direction::Long), &bar_at(120.0));
        assert_eq!(broker.cash(), cash_after_first);
        assert_eq!(broker.position("TEST").unwrap().avg_entry_price, 100.0);
    }

    #[test]
    fn exit_while_flat_is_ignored() {
        let mut broker = Broker::new(100_000.0, 10.0, 0.0);
        broker.execute(&OrderIntent::exit("TEST", Direction::Long), &bar_at(100.0));
        assert_eq!(broker.cash(), 100_000.0);
        assert!(broker.trades().is_empty());
    }

    #[test]
    fn equity_identity_through_a_round_trip() {
        let mut broker = Broker::new(100_000.0, 10.0, 0.001);
        assert_eq!(broker.equity(&HashMap::new()), 100_000.0);

        broker.execute(&OrderIntent::enter("TEST", Direction::Long), &bar_at(100.0));
        let eq = broker.equity(&prices("TEST", 105.0));
        assert!((eq - (broker.cash() + 10.0 * 105.0)).abs() < 1e-9);

        broker.execute(&OrderIntent::exit("TEST", Direction::Long), &bar_at(105.0));
        let eq = broker.equity(&prices("TEST", 105.0));
        assert!((eq - broker.cash()).abs() < 1e-9);
    }
}
