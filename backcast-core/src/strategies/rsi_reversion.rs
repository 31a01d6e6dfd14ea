//! RSI mean-reversion.
//!
//! Flat to Long when RSI falls below the oversold threshold, Long to Flat
//! when RSI rises above the overbought threshold. Level tests, not crosses.

use crate::domain::{Direction, OrderIntent, Position};
use crate::indicators::{Indicator, Rsi};

use super::{MarketView, Strategy, StrategyState};

#[derive(Debug, Clone)]
pub struct RsiReversion {
    period: usize,
    oversold: f64,
    overbought: f64,
    rsi_key: String,
}

impl RsiReversion {
    pub fn new(period: usize, oversold: f64, overbought: f64) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        assert!(
            oversold < overbought,
            "oversold threshold must be below overbought"
        );
        Self {
            period,
            oversold,
            overbought,
            rsi_key: format!("rsi_{period}"),
        }
    }
}

impl Strategy for RsiReversion {
    fn id(&self) -> &'static str {
        "RsiStrategy"
    }

    fn warmup_bars(&self) -> usize {
        self.period
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![Box::new(Rsi::new(self.period))]
    }

    fn evaluate(
        &self,
        view: &MarketView<'_>,
        position: Option<&Position>,
        _state: &mut StrategyState,
    ) -> Option<OrderIntent> {
        let rsi = view.indicator(&self.rsi_key)?;
        if rsi.is_nan() {
            return None;
        }

        let symbol = &view.bar().symbol;
        match position {
            None if rsi < self.oversold => {
                Some(OrderIntent::enter(symbol.clone(), Direction::Long))
            }
            Some(pos) if pos.is_long() && rsi > self.overbought => {
                Some(OrderIntent::exit(symbol.clone(), Direction::Long))
            }
            _ => None,
        }
    }
}
