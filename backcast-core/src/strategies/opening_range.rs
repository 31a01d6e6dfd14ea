//! Opening-range breakout, registered but inert.
//!
//! The rule needs the first N minutes of each session, and the bar model
//! makes no intraday guarantee: a feed of daily bars has no opening range to
//! measure. Rather than misfire on daily data, this strategy never emits an
//! intent. It stays in the registry so callers can discover it and read the
//! limitation from its catalog description.

use crate::domain::{OrderIntent, Position};
use crate::indicators::Indicator;

use super::{MarketView, Strategy, StrategyState};

#[derive(Debug, Clone)]
pub struct OpeningRangeBreakout {
    #[allow(dead_code)]
    minutes: usize,
}

impl OpeningRangeBreakout {
    pub fn new(minutes: usize) -> Self {
        Self { minutes }
    }
}

impl Strategy for OpeningRangeBreakout {
    fn id(&self) -> &'static str {
        "OpeningRangeBreakout"
    }

    fn warmup_bars(&self) -> usize {
        0
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        Vec::new()
    }

    fn evaluate(
        &self,
        _view: &MarketView<'_>,
        _position: Option<&Position>,
        _state: &mut StrategyState,
    ) -> Option<OrderIntent> {
        None
    }
}
