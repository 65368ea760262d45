pub mod bollinger;
pub mod macd;
pub mod rsi;
pub mod slope;

pub use bollinger::{BollingerBands, BollingerIndicator};
pub use macd::{MacdIndicator, MacdOutput};
pub use rsi::RsiIndicator;
pub use slope::SlopeIndicator;

use crate::config::StrategyConfig;

/// Every indicator value the scorer needs for the latest bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub macd: MacdOutput,
    /// `None` until the Bollinger window is full.
    pub bollinger: Option<BollingerBands>,
    pub slope: f64,
}

/// The configured indicator instances, evaluated together.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub rsi: RsiIndicator,
    pub macd: MacdIndicator,
    pub bollinger: BollingerIndicator,
    pub slope: SlopeIndicator,
}

impl IndicatorSet {
    pub fn from_config(cfg: &StrategyConfig) -> Self {
        Self {
            rsi: RsiIndicator::new(cfg.rsi.period),
            macd: MacdIndicator::new(cfg.macd.fast, cfg.macd.slow, cfg.macd.signal),
            bollinger: BollingerIndicator::new(cfg.bollinger.window, cfg.bollinger.num_std),
            slope: SlopeIndicator::new(cfg.slope.window),
        }
    }

    pub fn snapshot(&self, closes: &[f64]) -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi: self.rsi.compute(closes),
            macd: self.macd.compute(closes),
            bollinger: self.bollinger.compute(closes),
            slope: self.slope.compute(closes),
        }
    }
}

impl Default for IndicatorSet {
    fn default() -> Self {
        Self::from_config(&StrategyConfig::default())
    }
}
