//! Performance metrics: pure functions over the equity curve and trade list.
//!
//! No dependencies on the runner or the engine loop; everything here is
//! equity curve and/or trades in, scalar out.

use backcast_core::domain::{EquityPoint, Trade};

/// Total return as a percentage of starting cash.
pub fn total_return_pct(starting_cash: f64, final_equity: f64) -> f64 {
    if starting_cash <= 0.0 {
        return 0.0;
    }
    (final_equity - starting_cash) / starting_cash * 100.0
}

/// Sharpe ratio: mean of per-bar returns over their standard deviation.
///
/// `None` when fewer than two return observations exist or the variance is
/// zero; callers render that as "unavailable" rather than a NaN.
pub fn sharpe_ratio(equity_curve: &[EquityPoint]) -> Option<f64> {
    let returns = bar_returns(equity_curve);
    if returns.len() < 2 {
        return None;
    }
    let mean = mean(&returns);
    let std = std_dev(&returns);
    if std < 1e-15 {
        return None;
    }
    Some(mean / std)
}

/// Maximum drawdown as a positive percentage of the peak.
///
/// [100, 120, 90, 110] yields 25: the 120 to 90 decline is 25% of 120.
pub fn max_drawdown_pct(equity_curve: &[EquityPoint]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let mut peak = equity_curve[0].equity;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        }
        if peak > 0.0 {
            let dd = (peak - point.equity) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Win rate as a percentage. Zero trades yields 0, not a division error.
pub fn win_rate_pct(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64 * 100.0
}

/// Per-bar simple returns of the equity curve.
pub fn bar_returns(equity_curve: &[EquityPoint]) -> Vec<f64> {
    if equity_curve.len() < 2 {
        return Vec::new();
    }
    equity_curve
        .windows(2)
        .map(|w| {
            if w[0].equity > 0.0 {
                (w[1].equity - w[0].equity) / w[0].equity
            } else {
                0.0
            }
        })
        .collect()
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (divide by n - 1).
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
