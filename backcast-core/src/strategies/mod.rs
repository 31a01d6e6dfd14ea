//! Strategy state machines.
//!
//! Each strategy maps current indicator values plus the current position to
//! an order intent, one bar at a time, in timestamp order. Strategies are
//! position-conditional but portfolio-blind: they see the position for their
//! own symbol and nothing else of the ledger.
//!
//! Per-run mutable strategy state (trailing stop level, stopped-out latch)
//! lives in an explicit `StrategyState` value owned by the engine and passed
//! in by mutable reference. Strategy structs themselves hold only
//! configuration and are shared freely across runs.

pub mod atr_trailing;
pub mod bollinger_reversion;
pub mod donchian_breakout;
pub mod ma_cross;
pub mod macd_cross;
pub mod multi_instrument;
pub mod opening_range;
pub mod rsi_reversion;
pub mod stochastic;

pub use atr_trailing::AtrTrailingStop;
pub use bollinger_reversion::BollingerReversion;
pub use donchian_breakout::DonchianBreakout;
pub use ma_cross::{MaCross, MaType};
pub use macd_cross::MacdCross;
pub use multi_instrument::MultiInstrumentSignal;
pub use opening_range::OpeningRangeBreakout;
pub use rsi_reversion::RsiReversion;
pub use stochastic::StochasticCross;

use crate::domain::{Bar, OrderIntent, Position};
use crate::indicators::{Indicator, IndicatorValues};

/// Read-only view of the market state at one bar.
///
/// `trade_bars` is the traded symbol's full history; implementations must
/// only read `trade_bars[0..=bar_index]`. `signal_feeds` is empty except for
/// the multi-instrument strategy, where it holds the index-aligned signal
/// symbol histories.
pub struct MarketView<'a> {
    pub trade_bars: &'a [Bar],
    pub signal_feeds: &'a [&'a [Bar]],
    pub bar_index: usize,
    pub indicators: &'a IndicatorValues,
}

impl<'a> MarketView<'a> {
    /// The current bar of the traded symbol.
    pub fn bar(&self) -> &'a Bar {
        &self.trade_bars[self.bar_index]
    }

    /// Indicator value at the current bar, None when absent or out of range.
    pub fn indicator(&self, name: &str) -> Option<f64> {
        self.indicators.get(name, self.bar_index)
    }

    /// Indicator value at the previous bar.
    pub fn indicator_prev(&self, name: &str) -> Option<f64> {
        if self.bar_index == 0 {
            return None;
        }
        self.indicators.get(name, self.bar_index - 1)
    }
}

/// Per-run mutable strategy state, owned by the engine.
#[derive(Debug, Clone, Default)]
pub struct StrategyState {
    /// Current trailing stop level, if the strategy maintains one.
    pub trailing_stop: Option<f64>,
    /// Latched after a stop-out; strategies that do not re-enter check this.
    pub stopped_out: bool,
}

/// Trait for trading strategies.
///
/// `evaluate` is called once per bar in timestamp order. Returning `None`
/// means no order this bar; warm-up abstention is expected, silent behavior.
pub trait Strategy: Send + Sync {
    /// Registry identifier (e.g. "SmaCrossStrategy").
    fn id(&self) -> &'static str;

    /// Number of leading bars on which this strategy never emits.
    fn warmup_bars(&self) -> usize;

    /// Indicators to precompute over the trade feed before the bar loop.
    fn indicators(&self) -> Vec<Box<dyn Indicator>>;

    /// Whether this strategy consumes multiple feeds (signal feeds plus one
    /// trade feed, last feed = trade symbol).
    fn is_multi_feed(&self) -> bool {
        false
    }

    fn evaluate(
        &self,
        view: &MarketView<'_>,
        position: Option<&Position>,
        state: &mut StrategyState,
    ) -> Option<OrderIntent>;
}

/// Crossover detection: `a` crossed above `b` between the previous and
/// current bar. False when any input is NaN.
pub(crate) fn crossed_above(prev_a: f64, prev_b: f64, cur_a: f64, cur_b: f64) -> bool {
    cur_a > cur_b && prev_a <= prev_b
}

/// Crossover detection in the other direction.
pub(crate) fn crossed_below(prev_a: f64, prev_b: f64, cur_a: f64, cur_b: f64) -> bool {
    cur_a < cur_b && prev_a >= prev_b
}
