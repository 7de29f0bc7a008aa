//! Statistics over a filtered series: Sturges bins, percentile rank and
//! thresholds, nearest observations, normal fit, and density histogram.

pub mod histogram;
pub mod normal;
pub mod percentile;

pub use histogram::Histogram;
pub use normal::NormalFit;
pub use percentile::{nearest_observation, percentile, percentile_rank, sorted_copy};

/// Percent ranks marked on every chart.
pub const THRESHOLD_RANKS: [u32; 5] = [50, 80, 90, 95, 99];

/// Points sampled along the fitted curve.
pub const CURVE_SAMPLES: usize = 1000;

/// Sturges' rule: `ceil(log2(n) + 1)`, at least one bin.
pub fn bin_count(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    ((n as f64).log2() + 1.0).ceil() as usize
}
