//! Deterministic run fingerprints.
//!
//! A fingerprint identifies the configuration of a run: strategy id,
//! parameter set, and engine config. Two runs with the same fingerprint and
//! the same data produce the same report, so callers can recognize repeats
//! without re-running.

use crate::engine::EngineConfig;
use crate::registry::ParameterSet;

/// Content hash of (strategy id, parameters, engine config), as hex.
///
/// Parameters are folded in sorted-key order so insertion order in the map
/// cannot change the hash.
pub fn run_fingerprint(strategy_id: &str, params: &ParameterSet, config: &EngineConfig) -> String {
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort_unstable();

    let mut canonical = String::new();
    canonical.push_str(strategy_id);
    for key in keys {
        canonical.push_str(&format!("|{key}={}", params[key]));
    }
    canonical.push_str(&format!(
        "|cash={}|size={}|commission={}",
        config.starting_cash, config.order_size, config.commission_rate
    ));

    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}
