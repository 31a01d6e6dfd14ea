//! The bar-by-bar loop.
//!
//! One pass per run: validate feeds, precompute indicators over the trade
//! feed, then for each bar in timestamp order evaluate the strategy, execute
//! any admissible intent at the bar's close, and append an equity point.
//! Execution is single-threaded and fully deterministic; the run owns every
//! piece of mutable state it touches.

use std::collections::HashMap;

use crate::broker::Broker;
use crate::domain::{Bar, EquityPoint, IntentAction};
use crate::error::BacktestError;
use crate::indicators::IndicatorValues;
use crate::strategies::{MarketView, Strategy, StrategyState};

use super::feeds::{validate_feeds, BarFeed};
use super::state::{EngineConfig, RunResult};

/// Run a strategy over the supplied feeds.
///
/// For single-symbol strategies the first feed drives the run and any extra
/// feeds are ignored. For the multi-instrument strategy the last feed is the
/// trade symbol and the rest form the signal basket, aligned by index.
pub fn run_strategy(
    strategy: &dyn Strategy,
    feeds: &[BarFeed],
    config: &EngineConfig,
) -> Result<RunResult, BacktestError> {
    validate_feeds(feeds, strategy.is_multi_feed())?;

    let trade_feed = if strategy.is_multi_feed() {
        &feeds[feeds.len() - 1]
    } else {
        &feeds[0]
    };
    let signal_slices: Vec<&[Bar]> = if strategy.is_multi_feed() {
        feeds[..feeds.len() - 1]
            .iter()
            .map(|f| f.bars.as_slice())
            .collect()
    } else {
        Vec::new()
    };

    // Precompute every indicator the strategy declared, over the trade feed.
    let indicators = strategy.indicators();
    let mut indicator_values = IndicatorValues::new();
    for indicator in &indicators {
        indicator_values.insert(indicator.name().to_string(), indicator.compute(&trade_feed.bars));
    }
    let indicator_warmup = indicators.iter().map(|i| i.lookback()).max().unwrap_or(0);
    let warmup_bars = strategy.warmup_bars().max(indicator_warmup);

    let mut broker = Broker::new(
        config.starting_cash,
        config.order_size,
        config.commission_rate,
    );
    let mut strategy_state = StrategyState::default();
    let bar_count = trade_feed.bars.len();
    let mut equity_curve = Vec::with_capacity(bar_count);
    let mut prices: HashMap<String, f64> = HashMap::new();

    for t in 0..bar_count {
        let bar = &trade_feed.bars[t];

        if t >= warmup_bars {
            let view = MarketView {
                trade_bars: &trade_feed.bars,
                signal_feeds: &signal_slices,
                bar_index: t,
                indicators: &indicator_values,
            };
            let position = broker.position(&trade_feed.symbol);
            if let Some(intent) = strategy.evaluate(&view, position, &mut strategy_state) {
                // The broker also ignores inadmissible intents; the guard
                // here keeps the no-double-entry invariant engine-owned.
                let positioned = broker.position(&intent.symbol).is_some();
                let admissible = match intent.action {
                    IntentAction::Enter => !positioned,
                    IntentAction::Exit => positioned,
                };
                if admissible {
                    broker.execute(&intent, bar);
                }
            }
        }

        // Mark-to-market at this bar's close.
        prices.insert(trade_feed.symbol.clone(), bar.close);
        equity_curve.push(EquityPoint {
            timestamp: bar.timestamp,
            equity: broker.equity(&prices),
        });
    }

    let final_equity = equity_curve
        .last()
        .map(|p| p.equity)
        .unwrap_or(config.starting_cash);

    Ok(RunResult {
        equity_curve,
        trades: broker.into_trades(),
        starting_cash: config.starting_cash,
        final_equity,
        bar_count,
        warmup_bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;
    use crate::registry::{ParameterSet, StrategyRegistry};

    fn feed_from(symbol: &str, closes: &[f64]) -> BarFeed {
        let mut bars = make_bars(closes);
        for bar in &mut bars {
            bar.symbol = symbol.to_string();
        }
        BarFeed::new(symbol, bars)
    }

    fn build(id: &str) -> Box<dyn crate::strategies::Strategy> {
        StrategyRegistry::new().build(id, &ParameterSet::new()).unwrap()
    }

    #[test]
    fn one_equity_point_per_bar() {
        let strategy = build("DonchianChannelBreakout");
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let result = run_strategy(
            &*strategy,
            &[feed_from("TEST", &closes)],
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(result.equity_curve.len(), 40);
        assert_eq!(result.bar_count, 40);
        assert_eq!(
            result.final_equity,
            result.equity_curve.last().unwrap().equity
        );
    }

    #[test]
    fn flat_market_never_trades() {
        let strategy = build("DonchianChannelBreakout");
        let result = run_strategy(
            &*strategy,
            &[feed_from("TEST", &vec![100.0; 60])],
            &EngineConfig::default(),
        )
        .unwrap();

        assert!(result.trades.is_empty());
        assert!(result
            .equity_curve
            .iter()
            .all(|p| p.equity == 100_000.0));
    }

    #[test]
    fn validation_errors_propagate() {
        let strategy = build("SmaCrossStrategy");
        let err = run_strategy(&*strategy, &[], &EngineConfig::default()).unwrap_err();
        assert_eq!(err, BacktestError::NoData);
    }

    #[test]
    fn extra_feeds_are_ignored_for_single_symbol() {
        let strategy = build("DonchianChannelBreakout");
        let result = run_strategy(
            &*strategy,
            &[
                feed_from("MAIN", &vec![100.0; 30]),
                feed_from("EXTRA", &vec![1.0; 7]),
            ],
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(result.bar_count, 30);
    }

    #[test]
    fn multi_feed_uses_last_feed_as_trade_symbol() {
        let strategy = build("MultiInstrumentSignal");
        // Basket up 1% on bar 1: long entry on the trade symbol that bar.
        let result = run_strategy(
            &*strategy,
            &[
                feed_from("SIG1", &[100.0, 101.0, 101.1]),
                feed_from("TRADE", &[500.0, 500.0, 500.0]),
            ],
            &EngineConfig::default(),
        )
        .unwrap();

        // Entry at bar 1 close 500: commission 10 * 500 * 0.001 = 5.
        let eq1 = result.equity_curve[1].equity;
        assert!((eq1 - (100_000.0 - 5.0)).abs() < 1e-9);
    }

    #[test]
    fn equity_identity_holds_with_open_position() {
        let strategy = build("MultiInstrumentSignal");
        // Basket strongly positive on bar 1, then strongly positive again:
        // entry at bar 1, hold through bar 2 while the trade symbol moves.
        let result = run_strategy(
            &*strategy,
            &[
                feed_from("SIG1", &[100.0, 101.0, 102.5]),
                feed_from("TRADE", &[500.0, 500.0, 510.0]),
            ],
            &EngineConfig::default(),
        )
        .unwrap();

        // Cash after entry: 100_000 - 10*500*1.001 = 94_995.
        // Equity at bar 2: cash + 10 * 510.
        let eq2 = result.equity_curve[2].equity;
        assert!((eq2 - (94_995.0 + 5_100.0)).abs() < 1e-9);
    }

    #[test]
    fn deterministic_across_runs() {
        let strategy = build("SmaCrossStrategy");
        let closes: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.15).sin() * 20.0 + i as f64 * 0.1)
            .collect();
        let feeds = [feed_from("TEST", &closes)];
        let a = run_strategy(&*strategy, &feeds, &EngineConfig::default()).unwrap();
        let b = run_strategy(&*strategy, &feeds, &EngineConfig::default()).unwrap();
        assert_eq!(a.final_equity, b.final_equity);
        assert_eq!(a.trades.len(), b.trades.len());
    }
}
