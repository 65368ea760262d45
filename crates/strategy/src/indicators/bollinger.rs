/// Bollinger Bands: rolling SMA ± `num_std` population standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerIndicator {
    pub window: usize,
    pub num_std: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerIndicator {
    pub fn new(window: usize, num_std: f64) -> Self {
        assert!(window >= 1, "Bollinger window must be >= 1");
        Self { window, num_std }
    }

    /// Bands over the trailing `window` closes. `None` until the window is full.
    pub fn compute(&self, closes: &[f64]) -> Option<BollingerBands> {
        if closes.len() < self.window {
            return None;
        }
        let slice = &closes[closes.len() - self.window..];
        let n = self.window as f64;
        let middle = slice.iter().sum::<f64>() / n;
        let variance = slice.iter().map(|p| (p - middle).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();

        Some(BollingerBands {
            upper: middle + self.num_std * std,
            middle,
            lower: middle - self.num_std * std,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_absent_until_window_full() {
        let bb = BollingerIndicator::new(20, 2.0);
        assert!(bb.compute(&[1.0; 19]).is_none());
        assert!(bb.compute(&[1.0; 20]).is_some());
    }

    #[test]
    fn bands_use_population_std() {
        let bb = BollingerIndicator::new(4, 2.0);
        // mean 5, population variance 5, sample variance would be 6.67
        let bands = bb.compute(&[99.0, 2.0, 4.0, 6.0, 8.0]).unwrap();
        assert!((bands.middle - 5.0).abs() < 1e-12);
        let std = 5.0_f64.sqrt();
        assert!((bands.upper - (5.0 + 2.0 * std)).abs() < 1e-12);
        assert!((bands.lower - (5.0 - 2.0 * std)).abs() < 1e-12);
    }

    #[test]
    fn flat_series_collapses_bands() {
        let bands = BollingerIndicator::new(20, 2.0).compute(&[42.0; 25]).unwrap();
        assert_eq!(bands.upper, 42.0);
        assert_eq!(bands.lower, 42.0);
    }
}
