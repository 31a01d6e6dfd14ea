//! Moving Average Convergence Divergence.
//!
//! Two series as separate Indicator instances:
//! - MACD line: EMA(close, fast) - EMA(close, slow)
//! - Signal line: EMA(macd line, signal)
//!
//! The signal line seeds once the MACD line has produced `signal` values, so
//! its first valid index is slow + signal - 2.

use super::ema::ema_of_series;
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct MacdLine {
    fast: usize,
    slow: usize,
    name: String,
}

impl MacdLine {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast >= 1, "MACD fast period must be >= 1");
        assert!(slow > fast, "MACD slow period must be > fast period");
        Self {
            fast,
            slow,
            name: format!("macd_{fast}_{slow}"),
        }
    }

    fn line(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);
        fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
    }
}

impl Indicator for MacdLine {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        self.line(bars)
    }
}

#[derive(Debug, Clone)]
pub struct MacdSignal {
    line: MacdLine,
    signal: usize,
    name: String,
}

impl MacdSignal {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(signal >= 1, "MACD signal period must be >= 1");
        Self {
            line: MacdLine::new(fast, slow),
            signal,
            name: format!("macd_signal_{fast}_{slow}_{signal}"),
        }
    }
}

impl Indicator for MacdSignal {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.line.lookback() + self.signal - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        ema_of_series(&self.line.line(bars), self.signal)
    }
}
