//! Breakout entry with an ATR-based trailing stop.
//!
//! Flat to Long when the close exceeds the prior 20-bar high, initializing
//! the stop at close - multiplier * ATR. While long, the stop only ratchets
//! upward: max of the previous stop and the new close - multiplier * ATR.
//! Long to Flat when the close falls below the current stop. After a
//! stop-out the strategy stays flat for the remainder of the run.

use crate::domain::{Direction, OrderIntent, Position};
use crate::indicators::{Atr, Indicator, RollingHigh};

use super::{MarketView, Strategy, StrategyState};

/// Entry breakout window, fixed by the rule rather than parameterized.
const ENTRY_LOOKBACK: usize = 20;

#[derive(Debug, Clone)]
pub struct AtrTrailingStop {
    atr_period: usize,
    atr_multiplier: f64,
    atr_key: String,
    high_key: String,
}

impl AtrTrailingStop {
    pub fn new(atr_period: usize, atr_multiplier: f64) -> Self {
        assert!(atr_period >= 1, "ATR period must be >= 1");
        assert!(atr_multiplier > 0.0, "ATR multiplier must be positive");
        let atr = Atr::new(atr_period);
        let high = RollingHigh::new(ENTRY_LOOKBACK);
        Self {
            atr_period,
            atr_multiplier,
            atr_key: atr.name().to_string(),
            high_key: high.name().to_string(),
        }
    }
}

impl Strategy for AtrTrailingStop {
    fn id(&self) -> &'static str {
        "ATRTrailingStopStrategy"
    }

    fn warmup_bars(&self) -> usize {
        self.atr_period.max(ENTRY_LOOKBACK)
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Atr::new(self.atr_period)),
            Box::new(RollingHigh::new(ENTRY_LOOKBACK)),
        ]
    }

    fn evaluate(
        &self,
        view: &MarketView<'_>,
        position: Option<&Position>,
        state: &mut StrategyState,
    ) -> Option<OrderIntent> {
        let atr = view.indicator(&self.atr_key)?;
        if atr.is_nan() {
            return None;
        }

        let bar = view.bar();
        match position {
            None => {
                if state.stopped_out {
                    return None;
                }
                let prior_high = view.indicator(&self.high_key)?;
                if prior_high.is_nan() || bar.close <= prior_high {
                    return None;
                }
                state.trailing_stop = Some(bar.close - atr * self.atr_multiplier);
                Some(OrderIntent::enter(bar.symbol.clone(), Direction::Long))
            }
            Some(pos) if pos.is_long() => {
                let candidate = bar.close - atr * self.atr_multiplier;
                let stop = match state.trailing_stop {
                    Some(prev) => prev.max(candidate),
                    None => candidate,
                };
                state.trailing_stop = Some(stop);

                if bar.close < stop {
                    state.trailing_stop = None;
                    state.stopped_out = true;
                    Some(OrderIntent::exit(bar.symbol.clone(), Direction::Long))
                } else {
                    None
                }
            }
            Some(_) => None,
        }
    }
}
