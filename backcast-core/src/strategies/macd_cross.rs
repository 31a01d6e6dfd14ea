//! MACD line vs signal line crossover.
//!
//! Flat to Long when the MACD line crosses above its signal line, Long to
//! Flat on the reverse cross.

use crate::domain::{Direction, OrderIntent, Position};
use crate::indicators::{Indicator, MacdLine, MacdSignal};

use super::{crossed_above, crossed_below, MarketView, Strategy, StrategyState};

#[derive(Debug, Clone)]
pub struct MacdCross {
    fast_ema: usize,
    slow_ema: usize,
    signal_ema: usize,
    line_key: String,
    signal_key: String,
}

impl MacdCross {
    pub fn new(fast_ema: usize, slow_ema: usize, signal_ema: usize) -> Self {
        let line = MacdLine::new(fast_ema, slow_ema);
        let signal = MacdSignal::new(fast_ema, slow_ema, signal_ema);
        Self {
            fast_ema,
            slow_ema,
            signal_ema,
            line_key: line.name().to_string(),
            signal_key: signal.name().to_string(),
        }
    }
}

impl Strategy for MacdCross {
    fn id(&self) -> &'static str {
        "MACDStrategy"
    }

    fn warmup_bars(&self) -> usize {
        // One past the signal lookback so the previous bar is valid too.
        self.slow_ema + self.signal_ema - 1
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(MacdLine::new(self.fast_ema, self.slow_ema)),
            Box::new(MacdSignal::new(
                self.fast_ema,
                self.slow_ema,
                self.signal_ema,
            )),
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

        let line_cur = view.indicator(&self.line_key)?;
        let sig_cur = view.indicator(&self.signal_key)?;
        let line_prev = view.indicator_prev(&self.line_key)?;
        let sig_prev = view.indicator_prev(&self.signal_key)?;
        if line_cur.is_nan() || sig_cur.is_nan() || line_prev.is_nan() || sig_prev.is_nan() {
            return None;
        }

        let symbol = &view.bar().symbol;
        match position {
            None if crossed_above(line_prev, sig_prev, line_cur, sig_cur) => {
                Some(OrderIntent::enter(symbol.clone(), Direction::Long))
            }
            Some(pos) if pos.is_long() && crossed_below(line_prev, sig_prev, line_cur, sig_cur) => {
                Some(OrderIntent::exit(symbol.clone(), Direction::Long))
            }
            _ => None,
        }
    }
}
