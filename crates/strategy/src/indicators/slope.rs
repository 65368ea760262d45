/// Short-window trend: least-squares slope of the last `window` closes
/// against x = 0..window-1.
#[derive(Debug, Clone)]
pub struct SlopeIndicator {
    pub window: usize,
}

impl SlopeIndicator {
    pub fn new(window: usize) -> Self {
        assert!(window >= 2, "Slope window must be >= 2");
        Self { window }
    }

    /// Returns 0.0 (neutral) when fewer than `window` closes are available.
    pub fn compute(&self, closes: &[f64]) -> f64 {
        if closes.len() < self.window {
            return 0.0;
        }
        let ys = &closes[closes.len() - self.window..];
        let n = self.window as f64;
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = ys.iter().sum::<f64>() / n;

        let (num, den) = ys.iter().enumerate().fold((0.0, 0.0), |(num, den), (i, y)| {
            let dx = i as f64 - x_mean;
            (num + dx * (y - y_mean), den + dx * dx)
        });
        num / den
    }
}
