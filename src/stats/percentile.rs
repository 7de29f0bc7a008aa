use crate::data::model::Observation;

// ---------------------------------------------------------------------------
// Percentile rank and thresholds
// ---------------------------------------------------------------------------

/// Percent of `values` at or below `value`.  Ties count toward the rank, so
/// the maximum always ranks at 100.  Empty input ranks at 0.
pub fn percentile_rank(value: f64, values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let at_or_below = values.iter().filter(|&&v| v <= value).count();
    100.0 * at_or_below as f64 / values.len() as f64
}

/// Linear-interpolation percentile of an ascending slice.
///
/// `p` is in percent and clamped to `[0, 100]`; the order statistic sits at
/// position `p/100 * (n-1)`.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }

    if n == 1 {
        return sorted[0];
    }

    let p = p.clamp(0.0, 100.0) / 100.0;
    let idx = p * ((n - 1) as f64);
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;

    if lo == hi {
        sorted[lo]
    } else {
        let w = idx - (lo as f64);
        sorted[lo] * (1.0 - w) + sorted[hi] * w
    }
}

/// Sorted copy of `values`, for repeated [`percentile`] lookups.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// The observation whose value is closest to `target`.  On a tie the first
/// one in slice order wins.
pub fn nearest_observation(observations: &[Observation], target: f64) -> Option<&Observation> {
    let mut best: Option<(&Observation, f64)> = None;
    for o in observations {
        let distance = (o.value - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((o, distance)),
        }
    }
    best.map(|(o, _)| o)
}
