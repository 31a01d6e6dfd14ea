//! The performance report: the run's single output artifact.

use std::fmt;

use serde::{Deserialize, Serialize};

use backcast_core::RunResult;

use crate::metrics;

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Aggregate performance report for a single backtest run.
///
/// `sharpe` is `None` when the statistic is undefined (fewer than two return
/// observations, or zero variance); it renders as "unavailable", never NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub strategy_id: String,
    /// Content hash of (strategy id, parameters, run config).
    pub fingerprint: String,
    pub starting_cash: f64,
    pub final_equity: f64,
    pub total_return_pct: f64,
    pub sharpe: Option<f64>,
    pub max_drawdown_pct: f64,
    pub total_trades: usize,
    pub win_rate_pct: f64,
    pub bar_count: usize,
    pub warmup_bars: usize,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Report {
    /// Assemble the report from a finished run.
    pub fn from_run(strategy_id: &str, fingerprint: String, result: &RunResult) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            strategy_id: strategy_id.to_string(),
            fingerprint,
            starting_cash: result.starting_cash,
            final_equity: result.final_equity,
            total_return_pct: metrics::total_return_pct(
                result.starting_cash,
                result.final_equity,
            ),
            sharpe: metrics::sharpe_ratio(&result.equity_curve),
            max_drawdown_pct: metrics::max_drawdown_pct(&result.equity_curve),
            total_trades: result.trades.len(),
            win_rate_pct: metrics::win_rate_pct(&result.trades),
            bar_count: result.bar_count,
            warmup_bars: result.warmup_bars,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Backtest for '{}' Complete.", self.strategy_id)?;
        writeln!(f, "  Final Portfolio Value: {:.2}", self.final_equity)?;
        writeln!(f, "  Total Return: {:.2}%", self.total_return_pct)?;
        match self.sharpe {
            Some(sharpe) => writeln!(f, "  Sharpe Ratio: {sharpe:.4}")?,
            None => writeln!(f, "  Sharpe Ratio: unavailable")?,
        }
        writeln!(f, "  Max. Drawdown: {:.2}%", self.max_drawdown_pct)?;
        writeln!(f, "  Total Trades: {}", self.total_trades)?;
        write!(f, "  Win Rate: {:.2}%", self.win_rate_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backcast_core::domain::EquityPoint;
    use chrono::NaiveDate;

    fn sample_result(values: &[f64]) -> RunResult {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();
        let equity_curve: Vec<EquityPoint> = values
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                timestamp: base + chrono::Duration::days(i as i64),
                equity,
            })
            .collect();
        let final_equity = values.last().copied().unwrap_or(100_000.0);
        RunResult {
            equity_curve,
            trades: vec![],
            starting_cash: 100_000.0,
            final_equity,
            bar_count: values.len(),
            warmup_bars: 0,
        }
    }

    #[test]
    fn report_computes_summary_stats() {
        let result = sample_result(&[100_000.0, 101_000.0, 99_000.0, 102_000.0]);
        let report = Report::from_run("SmaCrossStrategy", "abc123".into(), &result);

        assert_eq!(report.strategy_id, "SmaCrossStrategy");
        assert!((report.total_return_pct - 2.0).abs() < 1e-10);
        assert_eq!(report.total_trades, 0);
        assert_eq!(report.win_rate_pct, 0.0);
        assert!(report.max_drawdown_pct > 0.0);
        assert!(report.sharpe.is_some());
    }

    #[test]
    fn degenerate_sharpe_renders_unavailable() {
        let result = sample_result(&[100_000.0; 10]);
        let report = Report::from_run("RsiStrategy", "abc".into(), &result);
        assert_eq!(report.sharpe, None);
        let rendered = report.to_string();
        assert!(rendered.contains("Sharpe Ratio: unavailable"));
        assert!(!rendered.contains("NaN"));
    }

    #[test]
    fn rendering_contains_every_line() {
        let result = sample_result(&[100_000.0, 100_500.0, 100_250.0]);
        let rendered = Report::from_run("MACDStrategy", "abc".into(), &result).to_string();
        assert!(rendered.starts_with("Backtest for 'MACDStrategy' Complete."));
        assert!(rendered.contains("Final Portfolio Value:"));
        assert!(rendered.contains("Total Return:"));
        assert!(rendered.contains("Max. Drawdown:"));
        assert!(rendered.contains("Total Trades: 0"));
        assert!(rendered.contains("Win Rate: 0.00%"));
    }

    #[test]
    fn serialization_roundtrip() {
        let result = sample_result(&[100_000.0, 100_500.0]);
        let report = Report::from_run("RsiStrategy", "fp".into(), &result);
        let json = serde_json::to_string(&report).unwrap();
        let deser: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(report.strategy_id, deser.strategy_id);
        assert_eq!(report.final_equity, deser.final_equity);
        assert_eq!(report.sharpe, deser.sharpe);
    }

    #[test]
    fn missing_schema_version_defaults() {
        let json = r#"{
            "strategy_id": "RsiStrategy",
            "fingerprint": "fp",
            "starting_cash": 100000.0,
            "final_equity": 100000.0,
            "total_return_pct": 0.0,
            "sharpe": null,
            "max_drawdown_pct": 0.0,
            "total_trades": 0,
            "win_rate_pct": 0.0,
            "bar_count": 10,
            "warmup_bars": 2
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.schema_version, SCHEMA_VERSION);
    }
}
