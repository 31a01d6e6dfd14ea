//! Donchian Channel: highest high / lowest low over the prior window.
//!
//! Two series as separate Indicator instances. The window for bar t is
//! `t-period .. t`, exclusive of bar t, so close[t] breaking the upper
//! channel is a genuine breakout of the prior range.

use super::rolling::{prior_window_max, prior_window_min};
use super::Indicator;
use crate::domain::Bar;

/// Which band of the Donchian channel to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonchianBand {
    Upper,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Donchian {
    period: usize,
    band: DonchianBand,
    name: String,
}

impl Donchian {
    pub fn upper(period: usize) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        Self {
            period,
            band: DonchianBand::Upper,
            name: format!("donchian_upper_{period}"),
        }
    }

    pub fn lower(period: usize) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        Self {
            period,
            band: DonchianBand::Lower,
            name: format!("donchian_lower_{period}"),
        }
    }
}

impl Indicator for Donchian {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        match self.band {
            DonchianBand::Upper => {
                let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
                prior_window_max(&highs, self.period)
            }
            DonchianBand::Lower => {
                let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
                prior_window_min(&lows, self.period)
            }
        }
    }
}
