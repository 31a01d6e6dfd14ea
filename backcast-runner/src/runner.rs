//! Run orchestration: resolve the strategy, drive the engine, assemble the
//! report.
//!
//! Two entry points:
//! - `run_backtest()`: the standard path, returning just the `Report`.
//! - `run_backtest_detailed()`: also returns the trade tape and equity curve
//!   for export and diagnostics.
//!
//! Every per-run failure comes back as a `BacktestError` value; nothing here
//! panics on caller input, so an orchestrator can report the error and keep
//! serving other runs. Runs share nothing but the read-only registry, which
//! makes batches embarrassingly parallel.

use rayon::prelude::*;

use backcast_core::engine::{run_strategy, BarFeed};
use backcast_core::fingerprint::run_fingerprint;
use backcast_core::registry::{ParameterSet, StrategyRegistry};
use backcast_core::{BacktestError, RunResult};

use crate::config::RunConfig;
use crate::report::Report;

/// A report-or-error pair: the complete outcome of one requested run.
pub type RunOutcome = Result<Report, BacktestError>;

/// Full result of a run: the report plus the raw material behind it.
#[derive(Debug, Clone)]
pub struct DetailedOutcome {
    pub report: Report,
    pub result: RunResult,
}

/// One requested run, for batch execution.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub strategy_id: String,
    pub params: ParameterSet,
    pub feeds: Vec<BarFeed>,
    pub config: RunConfig,
}

/// Run a single backtest and return its report.
pub fn run_backtest(
    registry: &StrategyRegistry,
    strategy_id: &str,
    params: &ParameterSet,
    feeds: &[BarFeed],
    config: &RunConfig,
) -> RunOutcome {
    run_backtest_detailed(registry, strategy_id, params, feeds, config).map(|d| d.report)
}

/// Run a single backtest, keeping the trade tape and equity curve.
pub fn run_backtest_detailed(
    registry: &StrategyRegistry,
    strategy_id: &str,
    params: &ParameterSet,
    feeds: &[BarFeed],
    config: &RunConfig,
) -> Result<DetailedOutcome, BacktestError> {
    let strategy = registry.build(strategy_id, params)?;
    let engine_config = config.to_engine_config();
    let result = run_strategy(&*strategy, feeds, &engine_config)?;
    let fingerprint = run_fingerprint(strategy_id, params, &engine_config);
    let report = Report::from_run(strategy_id, fingerprint, &result);
    Ok(DetailedOutcome { report, result })
}

/// Execute independent runs in parallel.
///
/// Outcomes come back in request order. A failed run occupies its slot as an
/// error value; it never aborts the batch.
pub fn run_batch(registry: &StrategyRegistry, requests: &[RunRequest]) -> Vec<RunOutcome> {
    requests
        .par_iter()
        .map(|req| {
            run_backtest(
                registry,
                &req.strategy_id,
                &req.params,
                &req.feeds,
                &req.config,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use backcast_core::domain::Bar;
    use chrono::NaiveDate;

    fn make_feed(symbol: &str, closes: &[f64]) -> BarFeed {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();
        BarFeed::new(
            symbol,
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| Bar {
                    symbol: symbol.to_string(),
                    timestamp: base + chrono::Duration::days(i as i64),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1000,
                })
                .collect(),
        )
    }

    #[test]
    fn unknown_strategy_is_an_error_outcome() {
        let registry = StrategyRegistry::new();
        let outcome = run_backtest(
            &registry,
            "NoSuchStrategy",
            &ParameterSet::new(),
            &[make_feed("TEST", &[100.0, 101.0])],
            &RunConfig::default(),
        );
        assert_eq!(
            outcome.unwrap_err(),
            BacktestError::UnknownStrategy("NoSuchStrategy".into())
        );
    }

    #[test]
    fn quiet_run_produces_a_report() {
        let registry = StrategyRegistry::new();
        let report = run_backtest(
            &registry,
            "DonchianChannelBreakout",
            &ParameterSet::new(),
            &[make_feed("TEST", &vec![100.0; 40])],
            &RunConfig::default(),
        )
        .unwrap();

        assert_eq!(report.strategy_id, "DonchianChannelBreakout");
        assert_eq!(report.total_trades, 0);
        assert_eq!(report.win_rate_pct, 0.0);
        assert_eq!(report.final_equity, 100_000.0);
        assert_eq!(report.sharpe, None);
        assert_eq!(report.bar_count, 40);
    }

    #[test]
    fn detailed_outcome_carries_curve_and_trades() {
        let registry = StrategyRegistry::new();
        let detailed = run_backtest_detailed(
            &registry,
            "DonchianChannelBreakout",
            &ParameterSet::new(),
            &[make_feed("TEST", &vec![100.0; 30])],
            &RunConfig::default(),
        )
        .unwrap();

        assert_eq!(detailed.result.equity_curve.len(), 30);
        assert!(detailed.result.trades.is_empty());
        assert_eq!(detailed.report.fingerprint.len(), 64);
    }

    #[test]
    fn batch_preserves_order_and_isolates_failures() {
        let registry = StrategyRegistry::new();
        let good = RunRequest {
            strategy_id: "DonchianChannelBreakout".into(),
            params: ParameterSet::new(),
            feeds: vec![make_feed("TEST", &vec![100.0; 30])],
            config: RunConfig::default(),
        };
        let bad = RunRequest {
            strategy_id: "NoSuchStrategy".into(),
            params: ParameterSet::new(),
            feeds: vec![make_feed("TEST", &vec![100.0; 30])],
            config: RunConfig::default(),
        };

        let outcomes = run_batch(&registry, &[good.clone(), bad, good]);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(matches!(
            outcomes[1],
            Err(BacktestError::UnknownStrategy(_))
        ));
        assert!(outcomes[2].is_ok());
    }

    #[test]
    fn identical_requests_share_a_fingerprint() {
        let registry = StrategyRegistry::new();
        let feeds = [make_feed("TEST", &vec![100.0; 30])];
        let a = run_backtest(
            &registry,
            "RsiStrategy",
            &ParameterSet::new(),
            &feeds,
            &RunConfig::default(),
        )
        .unwrap();
        let b = run_backtest(
            &registry,
            "RsiStrategy",
            &ParameterSet::new(),
            &feeds,
            &RunConfig::default(),
        )
        .unwrap();
        assert_eq!(a.fingerprint, b.fingerprint);

        let mut params = ParameterSet::new();
        params.insert("period".into(), 7.0);
        let c = run_backtest(&registry, "RsiStrategy", &params, &feeds, &RunConfig::default())
            .unwrap();
        assert_ne!(a.fingerprint, c.fingerprint);
    }
}
