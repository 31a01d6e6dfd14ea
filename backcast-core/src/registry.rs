//! Strategy registry: the metadata catalog and the id-to-implementation
//! dispatch table.
//!
//! Dispatch is a closed enum over the known strategy kinds; unknown ids are
//! rejected with a typed error before any bar is touched. Definitions carry
//! the catalog text an external retrieval layer indexes; the engine itself
//! only uses ids, parameter names, and defaults.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::BacktestError;
use crate::strategies::{
    AtrTrailingStop, BollingerReversion, DonchianBreakout, MaCross, MaType, MacdCross,
    MultiInstrumentSignal, OpeningRangeBreakout, RsiReversion, StochasticCross, Strategy,
};

/// Parameter values by name. Integers ride as f64; `ParamKind` in the
/// definition records the declared type for catalog consumers.
pub type ParameterSet = HashMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamKind {
    Int,
    Float,
}

/// One declared parameter of a strategy.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: f64,
    pub description: &'static str,
}

/// Immutable strategy metadata, loaded once into the registry.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyDefinition {
    pub id: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
}

/// Closed enumeration of the known strategy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    SmaCross,
    RsiReversion,
    MultiInstrument,
    BollingerReversion,
    MacdCross,
    Stochastic,
    DonchianBreakout,
    EmaCross,
    AtrTrailingStop,
    OpeningRange,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 10] = [
        StrategyKind::SmaCross,
        StrategyKind::RsiReversion,
        StrategyKind::MultiInstrument,
        StrategyKind::BollingerReversion,
        StrategyKind::MacdCross,
        StrategyKind::Stochastic,
        StrategyKind::DonchianBreakout,
        StrategyKind::EmaCross,
        StrategyKind::AtrTrailingStop,
        StrategyKind::OpeningRange,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            StrategyKind::SmaCross => "SmaCrossStrategy",
            StrategyKind::RsiReversion => "RsiStrategy",
            StrategyKind::MultiInstrument => "MultiInstrumentSignal",
            StrategyKind::BollingerReversion => "BollingerBandsReversion",
            StrategyKind::MacdCross => "MACDStrategy",
            StrategyKind::Stochastic => "StochasticStrategy",
            StrategyKind::DonchianBreakout => "DonchianChannelBreakout",
            StrategyKind::EmaCross => "EmaCrossStrategy",
            StrategyKind::AtrTrailingStop => "ATRTrailingStopStrategy",
            StrategyKind::OpeningRange => "OpeningRangeBreakout",
        }
    }

    /// Catalog entry: description plus declared parameters with defaults.
    pub fn definition(&self) -> StrategyDefinition {
        match self {
            StrategyKind::SmaCross => StrategyDefinition {
                id: self.id(),
                description: "A simple trend-following strategy. It buys when a short-term \
                    moving average (n1) crosses above a long-term one (n2) and sells on the \
                    reverse cross. Best for simple, trending markets. Also known as a 'Golden \
                    Cross' or 'Death Cross'.",
                parameters: vec![
                    ParameterSpec {
                        name: "n1",
                        kind: ParamKind::Int,
                        default: 20.0,
                        description: "The period for the fast moving average, e.g., 50",
                    },
                    ParameterSpec {
                        name: "n2",
                        kind: ParamKind::Int,
                        default: 50.0,
                        description: "The period for the slow moving average, e.g., 200",
                    },
                ],
            },
            StrategyKind::RsiReversion => StrategyDefinition {
                id: self.id(),
                description: "A mean-reversion strategy. It buys when the Relative Strength \
                    Index (RSI) crosses below an 'oversold' level (e.g., 30) and sells when it \
                    crosses above an 'overbought' level (e.g., 70).",
                parameters: vec![
                    ParameterSpec {
                        name: "period",
                        kind: ParamKind::Int,
                        default: 14.0,
                        description: "The lookback period for the RSI, typically 14.",
                    },
                    ParameterSpec {
                        name: "oversold",
                        kind: ParamKind::Int,
                        default: 30.0,
                        description: "The RSI level considered oversold, typically 30.",
                    },
                    ParameterSpec {
                        name: "overbought",
                        kind: ParamKind::Int,
                        default: 70.0,
                        description: "The RSI level considered overbought, typically 70.",
                    },
                ],
            },
            StrategyKind::MultiInstrument => StrategyDefinition {
                id: self.id(),
                description: "A complex multi-asset strategy. It trades one target instrument \
                    (e.g., Nifty) based on the average performance of a basket of other \
                    'signal' instruments (e.g., 10 stocks). All signal symbols must be \
                    provided first, and the target trade symbol last.",
                parameters: vec![],
            },
            StrategyKind::BollingerReversion => StrategyDefinition {
                id: self.id(),
                description: "A mean-reversion strategy. It buys when the price touches or \
                    crosses below the lower Bollinger Band and sells when it touches or \
                    crosses above the upper Bollinger Band.",
                parameters: vec![
                    ParameterSpec {
                        name: "period",
                        kind: ParamKind::Int,
                        default: 20.0,
                        description: "The lookback period for the moving average, typically 20.",
                    },
                    ParameterSpec {
                        name: "devfactor",
                        kind: ParamKind::Float,
                        default: 2.0,
                        description: "The number of standard deviations for the bands, \
                            typically 2.0.",
                    },
                ],
            },
            StrategyKind::MacdCross => StrategyDefinition {
                id: self.id(),
                description: "A trend-following strategy based on the Moving Average \
                    Convergence Divergence (MACD). It buys when the MACD line crosses above \
                    the signal line and sells when it crosses below.",
                parameters: vec![
                    ParameterSpec {
                        name: "fast_ema",
                        kind: ParamKind::Int,
                        default: 12.0,
                        description: "The period for the fast EMA, typically 12.",
                    },
                    ParameterSpec {
                        name: "slow_ema",
                        kind: ParamKind::Int,
                        default: 26.0,
                        description: "The period for the slow EMA, typically 26.",
                    },
                    ParameterSpec {
                        name: "signal_ema",
                        kind: ParamKind::Int,
                        default: 9.0,
                        description: "The period for the signal line EMA, typically 9.",
                    },
                ],
            },
            StrategyKind::Stochastic => StrategyDefinition {
                id: self.id(),
                description: "A momentum oscillator strategy. It buys when the %K line \
                    crosses above the %D line in the oversold region (e.g., below 20) and \
                    sells when it crosses below in the overbought region (e.g., above 80).",
                parameters: vec![
                    ParameterSpec {
                        name: "k_period",
                        kind: ParamKind::Int,
                        default: 14.0,
                        description: "The lookback period for %K, typically 14.",
                    },
                    ParameterSpec {
                        name: "d_period",
                        kind: ParamKind::Int,
                        default: 3.0,
                        description: "The smoothing period for %D, typically 3.",
                    },
                    ParameterSpec {
                        name: "oversold",
                        kind: ParamKind::Int,
                        default: 20.0,
                        description: "The oversold level, typically 20.",
                    },
                    ParameterSpec {
                        name: "overbought",
                        kind: ParamKind::Int,
                        default: 80.0,
                        description: "The overbought level, typically 80.",
                    },
                ],
            },
            StrategyKind::DonchianBreakout => StrategyDefinition {
                id: self.id(),
                description: "A trend-following breakout strategy (like Turtle Trading). It \
                    buys when the price breaks above the upper channel (N-period high) and \
                    sells when it breaks below the lower channel (N-period low).",
                parameters: vec![ParameterSpec {
                    name: "period",
                    kind: ParamKind::Int,
                    default: 20.0,
                    description: "The lookback period for the channel, typically 20.",
                }],
            },
            StrategyKind::EmaCross => StrategyDefinition {
                id: self.id(),
                description: "A simple trend-following strategy using Exponential Moving \
                    Averages (EMAs), which are faster to react than SMAs. Buys when the fast \
                    EMA (n1) crosses above the slow EMA (n2).",
                parameters: vec![
                    ParameterSpec {
                        name: "n1",
                        kind: ParamKind::Int,
                        default: 12.0,
                        description: "The period for the fast EMA, e.g., 12.",
                    },
                    ParameterSpec {
                        name: "n2",
                        kind: ParamKind::Int,
                        default: 26.0,
                        description: "The period for the slow EMA, e.g., 26.",
                    },
                ],
            },
            StrategyKind::AtrTrailingStop => StrategyDefinition {
                id: self.id(),
                description: "A trend-following strategy that uses an Average True Range \
                    (ATR) based trailing stop-loss. It buys on a signal (e.g., new high) and \
                    holds until the price crosses below the trailing stop.",
                parameters: vec![
                    ParameterSpec {
                        name: "atr_period",
                        kind: ParamKind::Int,
                        default: 14.0,
                        description: "The lookback period for the ATR, typically 14.",
                    },
                    ParameterSpec {
                        name: "atr_multiplier",
                        kind: ParamKind::Float,
                        default: 3.0,
                        description: "The multiplier for the ATR value, e.g., 3.0.",
                    },
                ],
            },
            StrategyKind::OpeningRange => StrategyDefinition {
                id: self.id(),
                description: "An intraday strategy. It buys if the price breaks above the \
                    high of the first N minutes (e.g., 15) and sells/shorts if it breaks \
                    below the low. (Note: Requires intraday data, which this engine's bar \
                    model does not guarantee; on daily bars it never trades.)",
                parameters: vec![ParameterSpec {
                    name: "minutes",
                    kind: ParamKind::Int,
                    default: 15.0,
                    description: "The opening range period in minutes, e.g., 15 or 30.",
                }],
            },
        }
    }

    /// Construct the strategy, filling unspecified parameters from defaults.
    pub fn build(&self, params: &ParameterSet) -> Box<dyn Strategy> {
        let defn = self.definition();
        match self {
            StrategyKind::SmaCross => Box::new(MaCross::new(
                param_usize(params, &defn, "n1"),
                param_usize(params, &defn, "n2"),
                MaType::Sma,
            )),
            StrategyKind::EmaCross => Box::new(MaCross::new(
                param_usize(params, &defn, "n1"),
                param_usize(params, &defn, "n2"),
                MaType::Ema,
            )),
            StrategyKind::RsiReversion => Box::new(RsiReversion::new(
                param_usize(params, &defn, "period"),
                param(params, &defn, "oversold"),
                param(params, &defn, "overbought"),
            )),
            StrategyKind::MultiInstrument => Box::new(MultiInstrumentSignal::new()),
            StrategyKind::BollingerReversion => Box::new(BollingerReversion::new(
                param_usize(params, &defn, "period"),
                param(params, &defn, "devfactor"),
            )),
            StrategyKind::MacdCross => Box::new(MacdCross::new(
                param_usize(params, &defn, "fast_ema"),
                param_usize(params, &defn, "slow_ema"),
                param_usize(params, &defn, "signal_ema"),
            )),
            StrategyKind::Stochastic => Box::new(StochasticCross::new(
                param_usize(params, &defn, "k_period"),
                param_usize(params, &defn, "d_period"),
                param(params, &defn, "oversold"),
                param(params, &defn, "overbought"),
            )),
            StrategyKind::DonchianBreakout => Box::new(DonchianBreakout::new(param_usize(
                params, &defn, "period",
            ))),
            StrategyKind::AtrTrailingStop => Box::new(AtrTrailingStop::new(
                param_usize(params, &defn, "atr_period"),
                param(params, &defn, "atr_multiplier"),
            )),
            StrategyKind::OpeningRange => Box::new(OpeningRangeBreakout::new(param_usize(
                params, &defn, "minutes",
            ))),
        }
    }
}

/// Named f64 parameter, falling back to the declared default.
fn param(params: &ParameterSet, defn: &StrategyDefinition, name: &str) -> f64 {
    params.get(name).copied().unwrap_or_else(|| {
        defn.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.default)
            .unwrap_or(0.0)
    })
}

/// Named usize parameter, falling back to the declared default.
fn param_usize(params: &ParameterSet, defn: &StrategyDefinition, name: &str) -> usize {
    param(params, defn, name) as usize
}

/// Read-only after construction; the only object shared across runs.
#[derive(Debug)]
pub struct StrategyRegistry {
    by_id: HashMap<&'static str, StrategyKind>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        let by_id = StrategyKind::ALL.iter().map(|k| (k.id(), *k)).collect();
        Self { by_id }
    }

    /// Resolve an id to its kind, or fail with `UnknownStrategy`.
    pub fn resolve(&self, id: &str) -> Result<StrategyKind, BacktestError> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| BacktestError::UnknownStrategy(id.to_string()))
    }

    /// Resolve and construct in one step.
    pub fn build(
        &self,
        id: &str,
        params: &ParameterSet,
    ) -> Result<Box<dyn Strategy>, BacktestError> {
        Ok(self.resolve(id)?.build(params))
    }

    /// All catalog entries, in declaration order.
    pub fn definitions(&self) -> Vec<StrategyDefinition> {
        StrategyKind::ALL.iter().map(|k| k.definition()).collect()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
