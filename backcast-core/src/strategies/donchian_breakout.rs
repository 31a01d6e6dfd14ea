//! Donchian channel breakout, turtle style.
//!
//! Flat to Long when the close exceeds the prior N-bar high, Long to Flat
//! when the close falls below the prior N-bar low. The channel excludes the
//! current bar, so a new high is a breakout rather than a self-comparison.

use crate::domain::{Direction, OrderIntent, Position};
use crate::indicators::{Donchian, Indicator};

use super::{MarketView, Strategy, StrategyState};

#[derive(Debug, Clone)]
pub struct DonchianBreakout {
    period: usize,
    upper_key: String,
    lower_key: String,
}

impl DonchianBreakout {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        let upper = Donchian::upper(period);
        let lower = Donchian::lower(period);
        Self {
            period,
            upper_key: upper.name().to_string(),
            lower_key: lower.name().to_string(),
        }
    }
}

impl Strategy for DonchianBreakout {
    fn id(&self) -> &'static str {
        "DonchianChannelBreakout"
    }

    fn warmup_bars(&self) -> usize {
        self.period
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Donchian::upper(self.period)),
            Box::new(Donchian::lower(self.period)),
        ]
    }

    fn evaluate(
        &self,
        view: &MarketView<'_>,
        position: Option<&Position>,
        _state: &mut StrategyState,
    ) -> Option<OrderIntent> {
        let upper = view.indicator(&self.upper_key)?;
        let lower = view.indicator(&self.lower_key)?;
        if upper.is_nan() || lower.is_nan() {
            return None;
        }

        let bar = view.bar();
        match position {
            None if bar.close > upper => {
                Some(OrderIntent::enter(bar.symbol.clone(), Direction::Long))
            }
            Some(pos) if pos.is_long() && bar.close < lower => {
                Some(OrderIntent::exit(bar.symbol.clone(), Direction::Long))
            }
            _ => None,
        }
    }
}
