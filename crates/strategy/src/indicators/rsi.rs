/// RSI (Relative Strength Index) indicator.
///
/// Uses a simple rolling mean of the last `period` gains and losses (not
/// Wilder smoothing). When the average loss over the window is zero the ratio
/// is undefined and the RSI is reported as 0, not 100. Downstream scoring
/// depends on that saturation, so it is kept as is.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
}

impl RsiIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self { period }
    }

    /// Compute RSI from a slice of close prices (oldest first).
    /// Returns 0.0 when fewer than `period + 1` values are available.
    pub fn compute(&self, closes: &[f64]) -> f64 {
        if closes.len() < self.period + 1 {
            return 0.0;
        }

        let window = &closes[closes.len() - self.period - 1..];
        let (gains, losses) = window
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold((0.0, 0.0), |(g, l), change| {
                if change > 0.0 {
                    (g + change, l)
                } else {
                    (g, l - change)
                }
            });

        let avg_gain = gains / self.period as f64;
        let avg_loss = losses / self.period as f64;

        if avg_loss == 0.0 {
            return 0.0;
        }

        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_is_zero_when_insufficient_data() {
        let rsi = RsiIndicator::new(14);
        // Need at least period+1 = 15 values
        let prices: Vec<f64> = (0..14).map(|i| 100.0 - i as f64).collect();
        assert_eq!(rsi.compute(&prices), 0.0);
    }

    #[test]
    fn rsi_all_gains_saturates_to_zero() {
        let rsi = RsiIndicator::new(3);
        // No losses in the window: the ratio is undefined and RSI reads 0
        let prices = vec![10.0, 11.0, 12.0, 13.0, 14.0];
        assert_eq!(rsi.compute(&prices), 0.0);
    }

    #[test]
    fn rsi_flat_prices_is_zero() {
        let rsi = RsiIndicator::new(14);
        assert_eq!(rsi.compute(&[50.0; 20]), 0.0);
    }

    #[test]
    fn rsi_all_losses_returns_0() {
        let rsi = RsiIndicator::new(3);
        let prices = vec![14.0, 13.0, 12.0, 11.0, 10.0];
        let value = rsi.compute(&prices);
        assert!(value.abs() < 1e-9, "Expected ~0, got {value}");
    }

    #[test]
    fn rsi_uses_only_trailing_window() {
        let rsi = RsiIndicator::new(2);
        // Early crash is outside the window; last two deltas are +2 and -1
        let prices = vec![100.0, 10.0, 12.0, 11.0];
        let value = rsi.compute(&prices);
        // avg_gain = 1.0, avg_loss = 0.5, RS = 2 -> 100 - 100/3
        assert!((value - 66.666_666_666).abs() < 1e-6, "got {value}");
    }

    #[test]
    fn rsi_known_value_in_range() {
        let rsi = RsiIndicator::new(14);
        let prices = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.15, 43.61, 44.33, 44.83, 45.10,
            45.15, 44.34, 44.09,
        ];
        let v = rsi.compute(&prices);
        assert!(v > 0.0 && v < 100.0, "RSI out of range: {v}");
    }
}
