//! Backcast core: the backtesting engine.
//!
//! This crate contains:
//! - Domain types (bars, positions, trades, order intents, equity points)
//! - Streaming indicator library, precomputed over the trade feed
//! - Strategy state machines behind the `Strategy` trait
//! - Broker simulator (cash ledger, close-price fills, commission)
//! - Bar-by-bar run loop producing a `RunResult`
//! - Strategy registry with a typed-error id dispatch
//!
//! A run is single-threaded and deterministic; the `StrategyRegistry` is the
//! only object meant to be shared across concurrent runs.

pub mod broker;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod registry;
pub mod strategies;

pub use broker::Broker;
pub use engine::{run_strategy, BarFeed, EngineConfig, RunResult};
pub use error::BacktestError;
pub use registry::{ParameterSet, StrategyRegistry};
