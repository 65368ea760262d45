use serde::{Deserialize, Serialize};

use common::{Error, Result};

/// Indicator parameters (TOML). Every section and field is optional.
///
/// Example `config/strategy.toml`:
/// ```toml
/// [rsi]
/// period = 14
///
/// [macd]
/// fast = 12
/// slow = 26
/// signal = 9
///
/// [bollinger]
/// window = 20
/// num_std = 2.0
///
/// [slope]
/// window = 6
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub rsi: RsiParams,
    pub macd: MacdParams,
    pub bollinger: BollingerParams,
    pub slope: SlopeParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BollingerParams {
    pub window: usize,
    pub num_std: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            window: 20,
            num_std: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SlopeParams {
    pub window: usize,
}

impl Default for SlopeParams {
    fn default() -> Self {
        Self { window: 6 }
    }
}

impl StrategyConfig {
    /// Load and validate a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("strategy config at '{path}': {e}")))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rsi.period == 0 {
            return Err(Error::Config("rsi.period must be >= 1".into()));
        }
        if self.macd.fast == 0 || self.macd.signal == 0 || self.macd.fast >= self.macd.slow {
            return Err(Error::Config(
                "macd periods must be positive with fast < slow".into(),
            ));
        }
        if self.bollinger.window == 0
            || !self.bollinger.num_std.is_finite()
            || self.bollinger.num_std < 0.0
        {
            return Err(Error::Config(
                "bollinger.window must be >= 1 and num_std a finite value >= 0".into(),
            ));
        }
        if self.slope.window < 2 {
            return Err(Error::Config("slope.window must be >= 2".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = StrategyConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, StrategyConfig::default());
        assert_eq!(cfg.macd.slow, 26);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = StrategyConfig::from_toml_str("[macd]\nfast = 5\n").unwrap();
        assert_eq!(cfg.macd.fast, 5);
        assert_eq!(cfg.macd.slow, 26);
        assert_eq!(cfg.rsi.period, 14);
    }

    #[test]
    fn inverted_macd_periods_rejected() {
        let err = StrategyConfig::from_toml_str("[macd]\nfast = 30\nslow = 10\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn tiny_slope_window_rejected() {
        assert!(StrategyConfig::from_toml_str("[slope]\nwindow = 1\n").is_err());
    }

    #[test]
    fn non_finite_band_width_rejected() {
        assert!(StrategyConfig::from_toml_str("[bollinger]\nnum_std = nan\n").is_err());

        let mut cfg = StrategyConfig::default();
        cfg.bollinger.num_std = f64::INFINITY;
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }
}
