//! Backtesting engine: feed validation and the bar-by-bar loop.

pub mod feeds;
pub mod loop_runner;
pub mod state;

pub use feeds::{validate_feeds, BarFeed};
pub use loop_runner::run_strategy;
pub use state::{EngineConfig, RunResult};
