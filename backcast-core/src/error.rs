//! Typed error taxonomy for backtest runs.
//!
//! Every variant is a per-run condition returned as data. The engine never
//! panics on bad input and never aborts the caller's process: a failed run
//! yields an error value the orchestrator can report and move on from.

use thiserror::Error;

/// Errors that can abort a single backtest run before or during setup.
///
/// Indicator warm-up and degenerate statistics are deliberately absent:
/// warm-up bars silently produce no intents, and an undefined Sharpe ratio
/// is rendered as "unavailable" in the report rather than failing the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BacktestError {
    #[error("strategy '{0}' not found in registry")]
    UnknownStrategy(String),

    #[error("no bar data provided")]
    NoData,

    #[error("missing bar data for '{0}'")]
    MissingSymbolData(String),

    #[error("feed for '{symbol}' has {actual} bars, expected {expected} to align with the trade feed")]
    MisalignedFeeds {
        symbol: String,
        expected: usize,
        actual: usize,
    },

    #[error("feed for '{0}' is not strictly timestamp-ordered")]
    UnorderedFeed(String),
}
