use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::pair;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "SIGNAL_DESK_CONFIG";

/// Runtime settings for the signal feed and market endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Maximum number of signals kept in the feed (newest first)
    pub max_signals: usize,
    /// Signals created when the feed is empty
    pub seed_signals: usize,
    /// Minimum seconds between two generated signals
    pub signal_interval_secs: u64,
    /// Extra random delay added on top of the interval, in seconds
    pub signal_jitter_secs: u64,
    /// Upper bound for requested market history (168 = one week)
    pub max_market_hours: u32,
    pub default_hours: u32,
    pub default_pair: String,
    /// Pairs quoted in the market overview
    pub major_pairs: Vec<String>,
    /// Number of synthetic historical trades in the history view
    pub history_trades: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        DeskConfig {
            max_signals: 10,
            seed_signals: 3,
            signal_interval_secs: 30,
            signal_jitter_secs: 30,
            max_market_hours: 168,
            default_hours: 24,
            default_pair: "EUR/USD".to_string(),
            major_pairs: pair::MAJOR_PAIRS.iter().map(|p| p.to_string()).collect(),
            history_trades: 25,
        }
    }
}

impl DeskConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::ConfigRead(format!("{}: {}", path.display(), e)))?;
        let config: DeskConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `SIGNAL_DESK_CONFIG`, or use defaults.
    pub fn from_env() -> Result<Self, AppError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_signals == 0 {
            return Err(AppError::InvalidConfig("max_signals must be at least 1".into()));
        }
        if self.seed_signals > self.max_signals {
            return Err(AppError::InvalidConfig(format!(
                "seed_signals ({}) exceeds max_signals ({})",
                self.seed_signals, self.max_signals
            )));
        }
        if self.max_market_hours == 0 {
            return Err(AppError::InvalidConfig("max_market_hours must be at least 1".into()));
        }
        if self.default_hours > self.max_market_hours {
            return Err(AppError::InvalidConfig(format!(
                "default_hours ({}) exceeds max_market_hours ({})",
                self.default_hours, self.max_market_hours
            )));
        }
        if self.default_pair.trim().is_empty() {
            return Err(AppError::InvalidConfig("default_pair is empty".into()));
        }
        Ok(())
    }
}
