//! Bollinger Band mean-reversion.
//!
//! Flat to Long when the close touches or drops through the lower band,
//! Long to Flat when it touches or rises through the upper band.

use crate::domain::{Direction, OrderIntent, Position};
use crate::indicators::{Bollinger, Indicator};

use super::{MarketView, Strategy, StrategyState};

#[derive(Debug, Clone)]
pub struct BollingerReversion {
    period: usize,
    devfactor: f64,
    upper_key: String,
    lower_key: String,
}

impl BollingerReversion {
    pub fn new(period: usize, devfactor: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(devfactor > 0.0, "devfactor must be positive");
        let upper = Bollinger::upper(period, devfactor);
        let lower = Bollinger::lower(period, devfactor);
        Self {
            period,
            devfactor,
            upper_key: upper.name().to_string(),
            lower_key: lower.name().to_string(),
        }
    }
}

impl Strategy for BollingerReversion {
    fn id(&self) -> &'static str {
        "BollingerBandsReversion"
    }

    fn warmup_bars(&self) -> usize {
        self.period - 1
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Bollinger::upper(self.period, self.devfactor)),
            Box::new(Bollinger::lower(self.period, self.devfactor)),
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
            None if bar.close <= lower => {
                Some(OrderIntent::enter(bar.symbol.clone(), Direction::Long))
            }
            Some(pos) if pos.is_long() && bar.close >= upper => {
                Some(OrderIntent::exit(bar.symbol.clone(), Direction::Long))
            }
            _ => None,
        }
    }
}
