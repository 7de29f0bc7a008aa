use std::f64::consts::PI;

use crate::error::StatsError;

// ---------------------------------------------------------------------------
// Normal distribution fit
// ---------------------------------------------------------------------------

/// Mean and sample standard deviation of the filtered values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalFit {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormalFit {
    /// Fit with the `n - 1` sample variance.  Needs at least two values that
    /// are not all identical.
    pub fn from_values(values: &[f64]) -> Result<Self, StatsError> {
        let n = values.len();
        if n <= 1 {
            return Err(StatsError::InsufficientData { n });
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        let std_dev = variance.sqrt();

        if std_dev == 0.0 {
            return Err(StatsError::ZeroSpread { value: values[0] });
        }
        if !std_dev.is_finite() {
            return Err(StatsError::NonFiniteSpread);
        }

        Ok(NormalFit { mean, std_dev })
    }

    /// Probability density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        1.0 / (self.std_dev * (2.0 * PI).sqrt()) * (-0.5 * z * z).exp()
    }

    /// `samples` points of the density, evenly spaced over `[lo, hi]`.
    pub fn curve(&self, lo: f64, hi: f64, samples: usize) -> Vec<[f64; 2]> {
        linspace(lo, hi, samples)
            .map(|x| [x, self.pdf(x)])
            .collect()
    }
}

/// `n` evenly spaced values from `lo` to `hi` inclusive.
pub fn linspace(lo: f64, hi: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 { (hi - lo) / (n - 1) as f64 } else { 0.0 };
    (0..n).map(move |i| if n > 1 && i == n - 1 { hi } else { lo + step * i as f64 })
}
