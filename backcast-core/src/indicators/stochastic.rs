//! Stochastic oscillator.
//!
//! %K = 100 * (close - lowest low) / (highest high - lowest low) over the
//! last `k_period` bars, current bar included. %D = SMA(%K, d_period).
//! A zero high/low range yields %K = 50 (close is the whole range).

use super::sma::sma_of_series;
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct PercentK {
    k_period: usize,
    name: String,
}

impl PercentK {
    pub fn new(k_period: usize) -> Self {
        assert!(k_period >= 1, "%K period must be >= 1");
        Self {
            k_period,
            name: format!("stoch_k_{k_period}"),
        }
    }

    fn series(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.k_period {
            return result;
        }

        for i in (self.k_period - 1)..n {
            let window = &bars[i + 1 - self.k_period..=i];
            let highest = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let lowest = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
            let range = highest - lowest;
            result[i] = if range == 0.0 {
                50.0
            } else {
                100.0 * (bars[i].close - lowest) / range
            };
        }

        result
    }
}

impl Indicator for PercentK {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.k_period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        self.series(bars)
    }
}

#[derive(Debug, Clone)]
pub struct PercentD {
    k: PercentK,
    d_period: usize,
    name: String,
}

impl PercentD {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        assert!(d_period >= 1, "%D period must be >= 1");
        Self {
            k: PercentK::new(k_period),
            d_period,
            name: format!("stoch_d_{k_period}_{d_period}"),
        }
    }
}

impl Indicator for PercentD {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.k.lookback() + self.d_period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        sma_of_series(&self.k.series(bars), self.d_period)
    }
}
