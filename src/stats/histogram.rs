// ---------------------------------------------------------------------------
// Density histogram
// ---------------------------------------------------------------------------

/// Equal-width histogram normalised so the bar areas sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// `count / (n * width)` per bin.
    pub densities: Vec<f64>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// Every bin is half-open except the last, which also takes `max`.  When
    /// all values are equal the range is widened to `value ± 0.5`.
    pub fn density(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        if values.is_empty() {
            return Histogram {
                edges: vec![0.0, 1.0],
                counts: vec![0],
                densities: vec![0.0],
            };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
        let width = (hi - lo) / bins as f64;

        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let n = values.len() as f64;
        let densities = counts.iter().map(|&c| c as f64 / (n * width)).collect();

        Histogram {
            edges,
            counts,
            densities,
        }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        (self.range().1 - self.range().0) / self.bins() as f64
    }

    /// First and last edge.
    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }

    /// Midpoint of each bin, paired with its density.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.densities)
            .map(|(edge, &density)| ((edge[0] + edge[1]) / 2.0, density))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn densities_integrate_to_one() {
        let values = [1.0, 2.0, 2.5, 3.0, 7.0, 8.0, 9.5, 10.0];
        let h = Histogram::density(&values, 4);
        let area: f64 = h.densities.iter().map(|d| d * h.bin_width()).sum();
        assert!((area - 1.0).abs() < 1e-12);
        assert_eq!(h.counts.iter().sum::<usize>(), values.len());
    }

    #[test]
    fn max_lands_in_last_bin() {
        let h = Histogram::density(&[0.0, 1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(h.edges, vec![0.0, 2.0, 4.0]);
        assert_eq!(h.counts, vec![2, 3]);
    }

    #[test]
    fn constant_values_widen_range() {
        let h = Histogram::density(&[5.0, 5.0, 5.0], 1);
        assert_eq!(h.range(), (4.5, 5.5));
        assert_eq!(h.counts, vec![3]);
        assert!((h.densities[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bars_are_centred_in_bins() {
        let h = Histogram::density(&[0.0, 10.0], 2);
        let bars: Vec<(f64, f64)> = h.bars().collect();
        assert_eq!(bars.len(), 2);
        assert!((bars[0].0 - 2.5).abs() < 1e-12);
        assert!((bars[1].0 - 7.5).abs() < 1e-12);
    }
}
