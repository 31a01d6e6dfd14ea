//! Moving average crossover, simple or exponential.
//!
//! Flat to Long when the fast average crosses above the slow average, Long to
//! Flat on the reverse cross. A cross is detected by comparing fast vs slow
//! between the previous and current bar.

use crate::domain::{Direction, OrderIntent, Position};
use crate::indicators::{Ema, Indicator, Sma};

use super::{crossed_above, crossed_below, MarketView, Strategy, StrategyState};

/// Moving average flavor selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaType {
    Sma,
    Ema,
}

impl MaType {
    fn prefix(&self) -> &'static str {
        match self {
            MaType::Sma => "sma",
            MaType::Ema => "ema",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaCross {
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
    fast_key: String,
    slow_key: String,
}

impl MaCross {
    pub fn new(fast_period: usize, slow_period: usize, ma_type: MaType) -> Self {
        assert!(fast_period >= 1, "fast period must be >= 1");
        assert!(slow_period > fast_period, "slow period must be > fast period");

        let prefix = ma_type.prefix();
        Self {
            fast_period,
            slow_period,
            ma_type,
            fast_key: format!("{prefix}_{fast_period}"),
            slow_key: format!("{prefix}_{slow_period}"),
        }
    }
}

impl Strategy for MaCross {
    fn id(&self) -> &'static str {
        match self.ma_type {
            MaType::Sma => "SmaCrossStrategy",
            MaType::Ema => "EmaCrossStrategy",
        }
    }

    fn warmup_bars(&self) -> usize {
        // Crossover needs a valid previous value too.
        self.slow_period
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        match self.ma_type {
            MaType::Sma => vec![
                Box::new(Sma::new(self.fast_period)),
                Box::new(Sma::new(self.slow_period)),
            ],
            MaType::Ema => vec![
                Box::new(Ema::new(self.fast_period)),
                Box::new(Ema::new(self.slow_period)),
            ],
        }
    }

    fn evaluate(
        &self,
        view: &MarketView<'_>,
        position: Option<&Position>,
        _state: &mut StrategyState,
    ) -> Option<OrderIntent> {
        if view.bar_index == 0 || view.bar_index < self.warmup_bars() {
            return None;
        }

        let fast_cur = view.indicator(&self.fast_key)?;
        let slow_cur = view.indicator(&self.slow_key)?;
        let fast_prev = view.indicator_prev(&self.fast_key)?;
        let slow_prev = view.indicator_prev(&self.slow_key)?;
        if fast_cur.is_nan() || slow_cur.is_nan() || fast_prev.is_nan() || slow_prev.is_nan() {
            return None;
        }

        let symbol = &view.bar().symbol;
        match position {
            None if crossed_above(fast_prev, slow_prev, fast_cur, slow_cur) => {
                Some(OrderIntent::enter(symbol.clone(), Direction::Long))
            }
            Some(pos)
                if pos.is_long() && crossed_below(fast_prev, slow_prev, fast_cur, slow_cur) =>
            {
                Some(OrderIntent::exit(symbol.clone(), Direction::Long))
            }
            _ => None,
        }
    }
}
