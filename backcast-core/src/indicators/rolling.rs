//! Rolling prior-window extremes.
//!
//! The window for bar t is `t-period .. t`, exclusive of bar t itself, so a
//! breakout rule can compare the current close against the prior extreme
//! without the current bar raising its own bar.

use super::Indicator;
use crate::domain::Bar;

/// Max of each prior `period`-wide window. `result[t]` covers `values[t-period..t]`.
pub fn prior_window_max(values: &[f64], period: usize) -> Vec<f64> {
    prior_window_extreme(values, period, f64::max, f64::MIN)
}

/// Min of each prior `period`-wide window.
pub fn prior_window_min(values: &[f64], period: usize) -> Vec<f64> {
    prior_window_extreme(values, period, f64::min, f64::MAX)
}

fn prior_window_extreme(
    values: &[f64],
    period: usize,
    pick: fn(f64, f64) -> f64,
    identity: f64,
) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in period..n {
        result[i] = values[i - period..i].iter().copied().fold(identity, pick);
    }
    result
}

/// Highest high over the prior `period` bars.
#[derive(Debug, Clone)]
pub struct RollingHigh {
    period: usize,
    name: String,
}

impl RollingHigh {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "rolling high period must be >= 1");
        Self {
            period,
            name: format!("rolling_high_{period}"),
        }
    }
}

impl Indicator for RollingHigh {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        prior_window_max(&highs, self.period)
    }
}

/// Lowest low over the prior `period` bars.
#[derive(Debug, Clone)]
pub struct RollingLow {
    period: usize,
    name: String,
}

impl RollingLow {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "rolling low period must be >= 1");
        Self {
            period,
            name: format!("rolling_low_{period}"),
        }
    }
}

impl Indicator for RollingLow {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        prior_window_min(&lows, self.period)
    }
}
