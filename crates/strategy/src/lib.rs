pub mod analyzer;
pub mod config;
pub mod indicators;
pub mod scorer;

pub use analyzer::{Analyzer, MIN_HISTORY};
pub use config::StrategyConfig;
pub use indicators::{IndicatorSet, IndicatorSnapshot};
pub use scorer::{score, Scorecard};
