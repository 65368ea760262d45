use tracing::debug;

use common::{CoinAnalysis, Error, PriceSeries, Result};

use crate::config::StrategyConfig;
use crate::indicators::IndicatorSet;
use crate::scorer;

/// Minimum number of price points before a coin is analysed at all.
pub const MIN_HISTORY: usize = 30;

/// Turns a coin's price series into a scored decision.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    indicators: IndicatorSet,
}

impl Analyzer {
    pub fn from_config(cfg: &StrategyConfig) -> Self {
        Self {
            indicators: IndicatorSet::from_config(cfg),
        }
    }

    /// Analyse `series` for `coin`.
    ///
    /// Fails with `InsufficientHistory` for series shorter than
    /// [`MIN_HISTORY`]; callers treat that as a silent skip.
    pub fn analyze(&self, coin: &str, series: &PriceSeries) -> Result<CoinAnalysis> {
        if series.len() < MIN_HISTORY {
            return Err(Error::InsufficientHistory {
                coin: coin.to_string(),
                points: series.len(),
                required: MIN_HISTORY,
            });
        }

        let last_price = series
            .last_price()
            .ok_or_else(|| Error::DataUnavailable(coin.to_string()))?;
        let closes = series.prices();
        let snapshot = self.indicators.snapshot(&closes);
        let card = scorer::score(last_price, &snapshot);

        debug!(
            coin = %coin,
            rsi = snapshot.rsi,
            macd = snapshot.macd.line,
            slope = snapshot.slope,
            score = card.score,
            decision = %card.decision,
            "Coin analysed"
        );

        Ok(CoinAnalysis {
            coin: coin.to_string(),
            price: round_to(last_price, 4),
            rsi: round_to(snapshot.rsi, 2),
            macd: round_to(snapshot.macd.line, 4),
            macd_signal: round_to(snapshot.macd.signal, 4),
            boll_upper: snapshot.bollinger.map(|b| round_to(b.upper, 4)),
            boll_lower: snapshot.bollinger.map(|b| round_to(b.lower, 4)),
            decision: card.decision,
            reasons: card.reasons.into_iter().map(String::from).collect(),
            score: card.score,
        })
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use common::{Decision, PricePoint};

    fn series(prices: &[f64]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, &price)| PricePoint {
                    timestamp: start + Duration::hours(i as i64),
                    price,
                })
                .collect(),
        )
    }

    #[test]
    fn short_series_is_unavailable() {
        let prices: Vec<f64> = (0..29).map(|i| 100.0 + i as f64).collect();
        let err = Analyzer::default().analyze("bitcoin", &series(&prices)).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientHistory { points: 29, required: 30, .. }
        ));
    }

    #[test]
    fn steady_rally_reads_as_oversold() {
        // No losses: RSI saturates to 0 (+2), steady slope (+1), no cross
        let prices: Vec<f64> = (0..48).map(|i| 100.0 + i as f64).collect();
        let analysis = Analyzer::default().analyze("bitcoin", &series(&prices)).unwrap();
        assert_eq!(analysis.rsi, 0.0);
        assert_eq!(analysis.score, 3);
        assert_eq!(analysis.decision, Decision::Buy);
        assert_eq!(analysis.reasons[0], "RSI oversold (<30)");
        assert_eq!(analysis.price, 147.0);
    }

    #[test]
    fn flat_series_holds() {
        let analysis = Analyzer::default()
            .analyze("ethereum", &series(&[2000.0; 40]))
            .unwrap();
        // Flat: RSI 0 (+2) only, slope 0, bands collapsed without breakout
        assert_eq!(analysis.score, 2);
        assert_eq!(analysis.decision, Decision::Hold);
        assert_eq!(analysis.boll_upper, Some(2000.0));
    }

    #[test]
    fn values_are_rounded_for_display() {
        assert_eq!(round_to(1.234_567, 4), 1.2346);
        assert_eq!(round_to(55.556, 2), 55.56);
    }
}
