//! Stochastic oscillator crossover in the extreme zones.
//!
//! Flat to Long when %K crosses above %D while both sit below the oversold
//! level; Long to Flat when %K crosses below %D while both sit above the
//! overbought level. Crosses outside the zones are ignored.

use crate::domain::{Direction, OrderIntent, Position};
use crate::indicators::{Indicator, PercentD, PercentK};

use super::{crossed_above, crossed_below, MarketView, Strategy, StrategyState};

#[derive(Debug, Clone)]
pub struct StochasticCross {
    k_period: usize,
    d_period: usize,
    oversold: f64,
    overbought: f64,
    k_key: String,
    d_key: String,
}

impl StochasticCross {
    pub fn new(k_period: usize, d_period: usize, oversold: f64, overbought: f64) -> Self {
        assert!(k_period >= 1 && d_period >= 1, "periods must be >= 1");
        assert!(
            oversold < overbought,
            "oversold level must be below overbought"
        );
        let k = PercentK::new(k_period);
        let d = PercentD::new(k_period, d_period);
        Self {
            k_period,
            d_period,
            oversold,
            overbought,
            k_key: k.name().to_string(),
            d_key: d.name().to_string(),
        }
    }
}

impl Strategy for StochasticCross {
    fn id(&self) -> &'static str {
        "StochasticStrategy"
    }

    fn warmup_bars(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(PercentK::new(self.k_period)),
            Box::new(PercentD::new(self.k_period, self.d_period)),
        ]
    }

    fn evaluate(
        &self,
        view: &MarketView<'_>,
        position: Option<&Position>,
        _state: &mut StrategyState,
    ) -> Option<OrderIntent> {
        if view.bar_index == 0 {
            return None;
        }

        let k_cur = view.indicator(&self.k_key)?;
        let d_cur = view.indicator(&self.d_key)?;
        let k_prev = view.indicator_prev(&self.k_key)?;
        let d_prev = view.indicator_prev(&self.d_key)?;
        if k_cur.is_nan() || d_cur.is_nan() || k_prev.is_nan() || d_prev.is_nan() {
            return None;
        }

        let symbol = &view.bar().symbol;
        match position {
            None if k_cur < self.oversold
                && d_cur < self.oversold
                && crossed_above(k_prev, d_prev, k_cur, d_cur) =>
            {
                Some(OrderIntent::enter(symbol.clone(), Direction::Long))
            }
            Some(pos)
                if pos.is_long()
                    && k_cur > self.overbought
                    && d_cur > self.overbought
                    && crossed_below(k_prev, d_prev, k_cur, d_cur) =>
            {
                Some(OrderIntent::exit(symbol.clone(), Direction::Long))
            }
            _ => None,
        }
    }
}
