//! Backcast runner: orchestration on top of the engine.
//!
//! - Run configuration (cash, order size, commission) with TOML loading
//! - The run orchestrator: strategy id + parameters + feeds in, report out
//! - Pure metric functions (total return, Sharpe, max drawdown, win rate)
//! - Report assembly and text rendering
//! - JSON/CSV export of run artifacts
//! - Seeded synthetic bar generation for tests and benches

pub mod config;
pub mod export;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod synthetic;

pub use config::RunConfig;
pub use report::Report;
pub use runner::{run_backtest, run_backtest_detailed, run_batch, RunOutcome, RunRequest};
