use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::data::filter;
use crate::data::model::{Observation, ObservationSeries};
use crate::error::StatsError;
use crate::stats::{
    bin_count, nearest_observation, percentile, percentile_rank, sorted_copy, Histogram,
    NormalFit, CURVE_SAMPLES, THRESHOLD_RANKS,
};

// ---------------------------------------------------------------------------
// Per-refresh analysis result
// ---------------------------------------------------------------------------

/// A fixed percentile rank, its interpolated value, and the real observation
/// closest to that value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdResult {
    pub rank: u32,
    pub threshold_value: f64,
    pub nearest: Observation,
}

/// The chosen observation and where it ranks within the filtered data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionResult {
    pub selected: Observation,
    pub percentile_rank: f64,
}

/// Everything the panels and the plot draw for one selection.
#[derive(Debug, Clone)]
pub struct Report {
    pub selection: SelectionResult,
    /// Rows on or before the selected date.
    pub sample_size: usize,
    pub bins: usize,
    pub thresholds: Vec<ThresholdResult>,
    pub histogram: Histogram,
    pub fit: NormalFit,
    /// Fitted density sampled across the histogram range.
    pub curve: Vec<[f64; 2]>,
}

/// Analyse the series up to and including the date of `series[selected]`.
///
/// Fails when the selection is out of range or the filtered rows cannot
/// support a normal fit; nothing is drawn in that case.
pub fn analyze(series: &ObservationSeries, selected: usize) -> Result<Report, StatsError> {
    let selected_obs = *series.get(selected).ok_or(StatsError::SelectionOutOfRange {
        index: selected,
        len: series.len(),
    })?;

    let filtered = filter::up_to(series, selected_obs.date);
    let values: Vec<f64> = filtered.iter().map(|o| o.value).collect();

    let fit = NormalFit::from_values(&values)?;
    let bins = bin_count(values.len());

    let sorted = sorted_copy(&values);
    let thresholds = THRESHOLD_RANKS
        .iter()
        .filter_map(|&rank| {
            let threshold_value = percentile(&sorted, rank as f64);
            let nearest = *nearest_observation(filtered, threshold_value)?;
            Some(ThresholdResult {
                rank,
                threshold_value,
                nearest,
            })
        })
        .collect();

    let histogram = Histogram::density(&values, bins);
    let (lo, hi) = histogram.range();
    let curve = fit.curve(lo, hi, CURVE_SAMPLES);

    Ok(Report {
        selection: SelectionResult {
            selected: selected_obs,
            percentile_rank: percentile_rank(selected_obs.value, &values),
        },
        sample_size: values.len(),
        bins,
        thresholds,
        histogram,
        fit,
        curve,
    })
}

// ---------------------------------------------------------------------------
// Text summaries
// ---------------------------------------------------------------------------

impl Report {
    /// `"90th Percentile: 12.34 (Date: 2024-01-02)"`, one per threshold.
    pub fn percentile_lines(&self) -> Vec<String> {
        self.thresholds
            .iter()
            .map(|t| {
                format!(
                    "{}th Percentile: {:.2} (Date: {})",
                    t.rank,
                    t.nearest.value,
                    t.nearest.date.format("%Y-%m-%d")
                )
            })
            .collect()
    }

    /// Selected date, value and percentile rank.
    pub fn selection_lines(&self) -> [String; 3] {
        let s = &self.selection;
        [
            format!("Selected Date: {}", s.selected.date.format("%Y-%m-%d")),
            format!("Selected Value: {:?}", s.selected.value),
            format!("Percentile: {:.2}%", s.percentile_rank),
        ]
    }

    /// Highest point of the fitted curve.
    pub fn curve_peak(&self) -> f64 {
        self.curve.iter().map(|p| p[1]).fold(0.0, f64::max)
    }
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SummaryRow {
    marker: &'static str,
    percentile: f64,
    date: NaiveDate,
    value: f64,
    threshold_value: Option<f64>,
}

impl Report {
    /// Write the selection and the threshold markers as CSV.
    pub fn write_summary_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);

        let s = &self.selection;
        out.serialize(SummaryRow {
            marker: "selected",
            percentile: s.percentile_rank,
            date: s.selected.date,
            value: s.selected.value,
            threshold_value: None,
        })
        .context("writing selection row")?;

        for t in &self.thresholds {
            out.serialize(SummaryRow {
                marker: "threshold",
                percentile: t.rank as f64,
                date: t.nearest.date,
                value: t.nearest.value,
                threshold_value: Some(t.threshold_value),
            })
            .with_context(|| format!("writing {}th percentile row", t.rank))?;
        }

        out.flush().context("flushing summary CSV")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn three_days() -> ObservationSeries {
        ObservationSeries::from_unsorted(vec![
            Observation::new(d(2024, 1, 1), 10.0),
            Observation::new(d(2024, 1, 2), 20.0),
            Observation::new(d(2024, 1, 3), 30.0),
        ])
    }

    #[test]
    fn middle_selection_uses_rows_up_to_its_date() {
        let series = three_days();
        let report = analyze(&series, 1).unwrap();

        assert_eq!(report.sample_size, 2);
        assert_eq!(report.selection.selected, Observation::new(d(2024, 1, 2), 20.0));
        assert_eq!(report.selection.percentile_rank, 100.0);
        assert_eq!(report.bins, 2);
        assert_eq!(report.histogram.counts.iter().sum::<usize>(), 2);
        assert!((report.fit.mean - 15.0).abs() < 1e-12);
    }

    #[test]
    fn latest_selection_uses_whole_series() {
        let series = three_days();
        let report = analyze(&series, series.latest_index().unwrap()).unwrap();
        assert_eq!(report.sample_size, series.len());
    }

    #[test]
    fn thresholds_point_at_real_observations() {
        let series = ObservationSeries::from_unsorted(
            (0..40u64)
                .map(|i| Observation::new(d(2024, 1, 1) + chrono::Days::new(i), ((i * 37) % 23) as f64))
                .collect(),
        );
        let report = analyze(&series, 39).unwrap();

        let ranks: Vec<u32> = report.thresholds.iter().map(|t| t.rank).collect();
        assert_eq!(ranks, vec![50, 80, 90, 95, 99]);
        for t in &report.thresholds {
            assert!(series.iter().any(|o| *o == t.nearest));
        }
        let values: Vec<f64> = report.thresholds.iter().map(|t| t.threshold_value).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn first_row_alone_is_insufficient_for_a_fit() {
        let series = three_days();
        let err = analyze(&series, 0).unwrap_err();
        assert_eq!(err, StatsError::InsufficientData { n: 1 });
        assert!(err.to_string().contains("insufficient data for distribution fit"));
    }

    #[test]
    fn out_of_range_selection_is_reported() {
        assert_eq!(
            analyze(&three_days(), 7).unwrap_err(),
            StatsError::SelectionOutOfRange { index: 7, len: 3 }
        );
    }

    #[test]
    fn curve_spans_histogram_range() {
        let report = analyze(&three_days(), 2).unwrap();
        assert_eq!(report.curve.len(), CURVE_SAMPLES);
        assert_eq!(report.curve[0][0], 10.0);
        assert_eq!(report.curve[CURVE_SAMPLES - 1][0], 30.0);
        assert!(report.curve_peak() > 0.0);
    }

    #[test]
    fn summary_lines_format() {
        let report = analyze(&three_days(), 1).unwrap();
        let lines = report.percentile_lines();
        assert_eq!(lines.len(), 5);
        // median of [10, 20] is 15, equidistant from both; the first row wins
        assert_eq!(lines[0], "50th Percentile: 10.00 (Date: 2024-01-01)");
        assert_eq!(lines[4], "99th Percentile: 20.00 (Date: 2024-01-02)");

        assert_eq!(
            report.selection_lines(),
            [
                "Selected Date: 2024-01-02".to_string(),
                "Selected Value: 20.0".to_string(),
                "Percentile: 100.00%".to_string(),
            ]
        );
    }

    #[test]
    fn exports_selection_and_thresholds() {
        let report = analyze(&three_days(), 2).unwrap();
        let mut out = Vec::new();
        report.write_summary_csv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "marker,percentile,date,value,threshold_value");
        assert_eq!(lines[1], "selected,100.0,2024-01-03,30.0,");
        assert!(lines[2].starts_with("threshold,50.0,2024-01-02,20.0,20.0"));
    }
}
