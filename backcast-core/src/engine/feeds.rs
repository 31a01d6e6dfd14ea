//! Bar feeds and input validation.
//!
//! A run receives one feed per required symbol. Single-symbol strategies are
//! driven by the first feed; the multi-instrument strategy takes every feed,
//! with the last one as the trade symbol and the rest as the signal basket,
//! aligned by index. Validation happens before any bar is processed: a run
//! either starts on clean inputs or fails with a typed error.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::error::BacktestError;

/// One symbol's ordered bar sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarFeed {
    pub symbol: String,
    pub bars: Vec<Bar>,
}

impl BarFeed {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    fn is_strictly_ordered(&self) -> bool {
        self.bars
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp)
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.bars.iter().map(|b| b.timestamp)
    }
}

/// Validate feeds for a run.
///
/// Checks, in order: something was supplied at all, every named feed is
/// non-empty, every feed is strictly timestamp-ordered, and (for
/// multi-instrument runs) a signal basket exists and all feeds are
/// index-aligned with the trade feed.
pub fn validate_feeds(feeds: &[BarFeed], multi_feed: bool) -> Result<(), BacktestError> {
    if feeds.is_empty() || feeds.iter().all(BarFeed::is_empty) {
        return Err(BacktestError::NoData);
    }

    for feed in feeds {
        if feed.is_empty() {
            return Err(BacktestError::MissingSymbolData(feed.symbol.clone()));
        }
        if !feed.is_strictly_ordered() {
            return Err(BacktestError::UnorderedFeed(feed.symbol.clone()));
        }
    }

    if multi_feed {
        if feeds.len() < 2 {
            return Err(BacktestError::MissingSymbolData("signal basket".into()));
        }
        let expected = feeds[feeds.len() - 1].bars.len();
        for feed in &feeds[..feeds.len() - 1] {
            if feed.bars.len() != expected {
                return Err(BacktestError::MisalignedFeeds {
                    symbol: feed.symbol.clone(),
                    expected,
                    actual: feed.bars.len(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn feed(symbol: &str, n: usize) -> BarFeed {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let mut bars = make_bars(&closes);
        for bar in &mut bars {
            bar.symbol = symbol.to_string();
        }
        BarFeed::new(symbol, bars)
    }

    #[test]
    fn no_feeds_is_no_data() {
        assert_eq!(validate_feeds(&[], false), Err(BacktestError::NoData));
    }

    #[test]
    fn all_empty_is_no_data() {
        let feeds = vec![BarFeed::new("A", vec![]), BarFeed::new("B", vec![])];
        assert_eq!(validate_feeds(&feeds, false), Err(BacktestError::NoData));
    }

    #[test]
    fn one_empty_among_many_names_the_symbol() {
        let feeds = vec![feed("A", 5), BarFeed::new("B", vec![])];
        assert_eq!(
            validate_feeds(&feeds, false),
            Err(BacktestError::MissingSymbolData("B".into()))
        );
    }

    #[test]
    fn unordered_feed_is_rejected() {
        let mut bad = feed("A", 5);
        bad.bars.swap(1, 3);
        assert_eq!(
            validate_feeds(&[bad], false),
            Err(BacktestError::UnorderedFeed("A".into()))
        );
    }

    #[test]
    fn duplicate_timestamps_are_rejected() {
        let mut bad = feed("A", 5);
        bad.bars[2].timestamp = bad.bars[1].timestamp;
        assert_eq!(
            validate_feeds(&[bad], false),
            Err(BacktestError::UnorderedFeed("A".into()))
        );
    }

    #[test]
    fn multi_needs_a_signal_basket() {
        let feeds = vec![feed("TRADE", 5)];
        assert_eq!(
            validate_feeds(&feeds, true),
            Err(BacktestError::MissingSymbolData("signal basket".into()))
        );
    }

    #[test]
    fn multi_rejects_misaligned_lengths() {
        let feeds = vec![feed("SIG1", 4), feed("TRADE", 5)];
        assert_eq!(
            validate_feeds(&feeds, true),
            Err(BacktestError::MisalignedFeeds {
                symbol: "SIG1".into(),
                expected: 5,
                actual: 4,
            })
        );
    }

    #[test]
    fn aligned_multi_passes() {
        let feeds = vec![feed("SIG1", 5), feed("SIG2", 5), feed("TRADE", 5)];
        assert!(validate_feeds(&feeds, true).is_ok());
    }

    #[test]
    fn single_feed_passes() {
        assert!(validate_feeds(&[feed("A", 5)], false).is_ok());
    }
}
