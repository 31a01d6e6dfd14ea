//! Serializable run configuration.
//!
//! Captures the cash/sizing/commission knobs of a run. Every field has a
//! default, so an empty TOML table (or an omitted config) reproduces the
//! stock setup: 100 000 starting cash, 10-unit orders, 0.1% commission.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use backcast_core::EngineConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Run-level configuration, distinct from strategy parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_starting_cash")]
    pub starting_cash: f64,
    #[serde(default = "default_order_size")]
    pub order_size: f64,
    #[serde(default = "default_commission_rate")]
    pub commission_rate: f64,
}

fn default_starting_cash() -> f64 {
    backcast_core::broker::DEFAULT_STARTING_CASH
}

fn default_order_size() -> f64 {
    backcast_core::broker::DEFAULT_ORDER_SIZE
}

fn default_commission_rate() -> f64 {
    backcast_core::broker::DEFAULT_COMMISSION_RATE
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            starting_cash: default_starting_cash(),
            order_size: default_order_size(),
            commission_rate: default_commission_rate(),
        }
    }
}

impl RunConfig {
    /// Parse from TOML text; missing fields fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_cash <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "starting_cash must be positive, got {}",
                self.starting_cash
            )));
        }
        if self.order_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "order_size must be positive, got {}",
                self.order_size
            )));
        }
        if !(0.0..1.0).contains(&self.commission_rate) {
            return Err(ConfigError::Invalid(format!(
                "commission_rate must be in [0, 1), got {}",
                self.commission_rate
            )));
        }
        Ok(())
    }

    pub fn to_engine_config(self) -> EngineConfig {
        EngineConfig {
            starting_cash: self.starting_cash,
            order_size: self.order_size,
            commission_rate: self.commission_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_setup() {
        let config = RunConfig::default();
        assert_eq!(config.starting_cash, 100_000.0);
        assert_eq!(config.order_size, 10.0);
        assert_eq!(config.commission_rate, 0.001);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = RunConfig::from_toml_str("").unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let config = RunConfig::from_toml_str("starting_cash = 250000.0").unwrap();
        assert_eq!(config.starting_cash, 250_000.0);
        assert_eq!(config.order_size, 10.0);
    }

    #[test]
    fn full_toml_roundtrip() {
        let config = RunConfig {
            starting_cash: 50_000.0,
            order_size: 25.0,
            commission_rate: 0.002,
        };
        let text = toml::to_string(&config).unwrap();
        let parsed = RunConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn rejects_nonpositive_cash() {
        let err = RunConfig::from_toml_str("starting_cash = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_commission_of_one() {
        let err = RunConfig::from_toml_str("commission_rate = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn to_engine_config_copies_fields() {
        let config = RunConfig {
            starting_cash: 5_000.0,
            order_size: 2.0,
            commission_rate: 0.0005,
        };
        let engine = config.to_engine_config();
        assert_eq!(engine.starting_cash, 5_000.0);
        assert_eq!(engine.order_size, 2.0);
        assert_eq!(engine.commission_rate, 0.0005);
    }
}
