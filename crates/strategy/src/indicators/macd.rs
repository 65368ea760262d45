/// MACD (Moving Average Convergence/Divergence) indicator.
///
/// Computes: MACD line = EMA(fast) − EMA(slow), Signal = EMA(macd_line, signal_period).
/// EMAs are seeded with the first value and are not bias-corrected.
/// Crossovers compare only the last two points of the two lines.
#[derive(Debug, Clone)]
pub struct MacdIndicator {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// The result of a MACD computation on the latest bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacdOutput {
    pub line: f64,
    pub signal: f64,
    /// MACD line crossed above the signal line on the latest bar.
    pub cross_up: bool,
    /// MACD line crossed below the signal line on the latest bar.
    pub cross_down: bool,
}

impl MacdIndicator {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(
            fast < slow,
            "MACD fast period must be less than slow period"
        );
        Self { fast, slow, signal }
    }

    /// Compute MACD from a slice of close prices (oldest first).
    /// An empty slice yields all-zero lines; fewer than two points never cross.
    pub fn compute(&self, closes: &[f64]) -> MacdOutput {
        if closes.is_empty() {
            return MacdOutput::default();
        }

        let fast = ema_series(closes, self.fast);
        let slow = ema_series(closes, self.slow);
        let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal_line = ema_series(&macd_line, self.signal);

        let n = macd_line.len();
        let curr_macd = macd_line[n - 1];
        let curr_sig = signal_line[n - 1];

        let (cross_up, cross_down) = if n >= 2 {
            let prev_macd = macd_line[n - 2];
            let prev_sig = signal_line[n - 2];
            (
                prev_macd < prev_sig && curr_macd > curr_sig,
                prev_macd > prev_sig && curr_macd < curr_sig,
            )
        } else {
            (false, false)
        };

        MacdOutput {
            line: curr_macd,
            signal: curr_sig,
            cross_up,
            cross_down,
        }
    }
}

/// Exponential moving average over the whole series, one value per input.
/// Starts from the first value; weight `2 / (span + 1)` applies thereafter.
pub fn ema_series(data: &[f64], span: usize) -> Vec<f64> {
    let k = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(data.len());
    let mut prev: Option<f64> = None;
    for &value in data {
        let next = match prev {
            None => value,
            Some(p) => value * k + p * (1.0 - k),
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending_up(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 * 0.5).collect()
    }

    #[test]
    fn ema_seeds_from_first_value() {
        let ema = ema_series(&[10.0, 20.0, 20.0], 3);
        // k = 0.5
        assert_eq!(ema, vec![10.0, 15.0, 17.5]);
    }

    #[test]
    fn macd_single_point_never_crosses() {
        let macd = MacdIndicator::new(12, 26, 9);
        let out = macd.compute(&[100.0]);
        assert_eq!(out.line, 0.0);
        assert!(!out.cross_up && !out.cross_down);
    }

    #[test]
    fn macd_empty_is_neutral() {
        let macd = MacdIndicator::new(12, 26, 9);
        assert_eq!(macd.compute(&[]), MacdOutput::default());
    }

    #[test]
    fn macd_detects_bullish_crossover() {
        let macd = MacdIndicator::new(3, 6, 3);
        // Long slide keeps MACD under its signal, then one sharp jump flips it
        let mut prices: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        prices.push(120.0);
        let out = macd.compute(&prices);
        assert!(out.cross_up, "expected bullish cross: {out:?}");
        assert!(!out.cross_down);
    }

    #[test]
    fn macd_detects_bearish_crossover() {
        let macd = MacdIndicator::new(3, 6, 3);
        let mut prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        prices.push(80.0);
        let out = macd.compute(&prices);
        assert!(out.cross_down, "expected bearish cross: {out:?}");
        assert!(!out.cross_up);
    }

    #[test]
    fn macd_no_cross_on_steady_trend() {
        let macd = MacdIndicator::new(12, 26, 9);
        let out = macd.compute(&trending_up(60));
        assert!(out.line > 0.0);
        assert!(!out.cross_up && !out.cross_down);
    }
}
