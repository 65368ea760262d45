pub mod memory;
pub mod register;
pub mod sqlite;

pub use memory::MemoryStore;
pub use register::{NewsLedger, SignalRegister};
pub use sqlite::SqliteStore;

use chrono::Duration;

use common::{Config, Error, Portfolio, Result};

/// Time windows applied by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    /// An identical signal for the same coin is suppressed for this long.
    pub cooldown: Duration,
    /// A sent news URL counts as sent for this long.
    pub news_horizon: Duration,
}

impl GateConfig {
    pub fn new(cooldown: std::time::Duration, news_horizon: std::time::Duration) -> Result<Self> {
        let convert = |d: std::time::Duration, what: &str| {
            Duration::from_std(d).map_err(|e| Error::Config(format!("{what} out of range: {e}")))
        };
        Ok(Self {
            cooldown: convert(cooldown, "signal cooldown")?,
            news_horizon: convert(news_horizon, "news dedupe horizon")?,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.signal_cooldown, cfg.news_dedupe_horizon)
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::minutes(60),
            news_horizon: Duration::hours(24),
        }
    }
}

/// Values a store reports before anything has been written.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreDefaults {
    pub portfolio: Portfolio,
    pub followed: Vec<String>,
}

impl StoreDefaults {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            portfolio: cfg.default_portfolio.clone(),
            followed: cfg.top_coins.clone(),
        }
    }
}

impl Default for StoreDefaults {
    fn default() -> Self {
        Self {
            portfolio: Portfolio::default(),
            followed: common::config::DEFAULT_TOP_COINS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}
