//! Multi-instrument basket signal.
//!
//! Trades one target symbol from the average single-bar return of a basket
//! of signal symbols. Strongly negative average opens a short, strongly
//! positive opens a long, and a near-zero average flattens whatever is open.
//! The thresholds are policy constants; callers cannot override them.

use crate::domain::{Direction, OrderIntent, Position};
use crate::indicators::Indicator;

use super::{MarketView, Strategy, StrategyState};

/// Average basket return beyond which a position is opened.
const ENTRY_THRESHOLD: f64 = 0.005;
/// Average basket return inside which an open position is flattened.
const EXIT_THRESHOLD: f64 = 0.001;

#[derive(Debug, Clone, Default)]
pub struct MultiInstrumentSignal;

impl MultiInstrumentSignal {
    pub fn new() -> Self {
        Self
    }

    /// Average of the signal feeds' single-bar returns at `bar_index`.
    /// None before any feed has two bars.
    fn basket_return(view: &MarketView<'_>) -> Option<f64> {
        if view.bar_index == 0 {
            return None;
        }
        let mut returns = Vec::with_capacity(view.signal_feeds.len());
        for feed in view.signal_feeds {
            let cur = feed.get(view.bar_index)?;
            let prev = feed.get(view.bar_index - 1)?;
            if prev.close != 0.0 {
                returns.push((cur.close - prev.close) / prev.close);
            }
        }
        if returns.is_empty() {
            return None;
        }
        Some(returns.iter().sum::<f64>() / returns.len() as f64)
    }
}

impl Strategy for MultiInstrumentSignal {
    fn id(&self) -> &'static str {
        "MultiInstrumentSignal"
    }

    fn warmup_bars(&self) -> usize {
        1
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        Vec::new()
    }

    fn is_multi_feed(&self) -> bool {
        true
    }

    fn evaluate(
        &self,
        view: &MarketView<'_>,
        position: Option<&Position>,
        _state: &mut StrategyState,
    ) -> Option<OrderIntent> {
        let avg_return = Self::basket_return(view)?;
        let symbol = &view.bar().symbol;

        if avg_return < -ENTRY_THRESHOLD && position.is_none() {
            Some(OrderIntent::enter(symbol.clone(), Direction::Short))
        } else if avg_return > ENTRY_THRESHOLD && position.is_none() {
            Some(OrderIntent::enter(symbol.clone(), Direction::Long))
        } else if avg_return.abs() < EXIT_THRESHOLD {
            position.map(|pos| OrderIntent::exit(symbol.clone(), pos.direction()))
        } else {
            None
        }
    }
}
