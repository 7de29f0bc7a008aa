use chrono::NaiveDate;

use super::model::{Observation, ObservationSeries};

// ---------------------------------------------------------------------------
// Dropdown labels
// ---------------------------------------------------------------------------

/// Round to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Display label for one observation: `"2024-01-02 | 20.0"`.
///
/// The value is rounded to two decimals and printed in its shortest
/// round-trip form, so parsing the label text yields the rounded `f64` again.
pub fn label_for(observation: &Observation) -> String {
    format!(
        "{} | {:?}",
        observation.date.format("%Y-%m-%d"),
        round2(observation.value)
    )
}

/// Labels for every observation, in series order.
pub fn labels(series: &ObservationSeries) -> Vec<String> {
    series.iter().map(label_for).collect()
}

/// Split a label back into its date and (rounded) value.
pub fn parse_label(label: &str) -> Option<(NaiveDate, f64)> {
    let (date_part, value_part) = label.split_once('|')?;
    let date = NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").ok()?;
    let value = value_part.trim().parse::<f64>().ok()?;
    Some((date, value))
}

/// A dropdown choice that can be re-found in a freshly loaded series.
///
/// Rows on the same date can round to the same label, so the choice also
/// records which of those identical labels it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    /// Number of identical labels before this one.
    pub occurrence: usize,
}

impl Choice {
    /// The choice for `labels[index]`.
    pub fn at(labels: &[String], index: usize) -> Option<Self> {
        let label = labels.get(index)?;
        let occurrence = labels[..index].iter().filter(|l| *l == label).count();
        Some(Choice {
            label: label.clone(),
            occurrence,
        })
    }
}

/// Resolve a label to the index of the stored observation it was built from.
///
/// The label only carries the rounded value; observations on that date whose
/// rounded value equals it match, and the `occurrence`-th match in series
/// order is returned.  Callers get the exact stored value rather than the
/// display value.
pub fn resolve_label(series: &ObservationSeries, label: &str, occurrence: usize) -> Option<usize> {
    let (date, value) = parse_label(label)?;
    series
        .iter()
        .enumerate()
        .filter(|(_, o)| o.date == date && round2(o.value) == value)
        .map(|(i, _)| i)
        .nth(occurrence)
}

/// Resolve a [`Choice`] in `series`.
pub fn resolve_choice(series: &ObservationSeries, choice: &Choice) -> Option<usize> {
    resolve_label(series, &choice.label, choice.occurrence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn label_format_matches_display_convention() {
        assert_eq!(label_for(&Observation::new(d(2024, 1, 2), 20.0)), "2024-01-02 | 20.0");
        assert_eq!(label_for(&Observation::new(d(2024, 1, 2), 12.345_6)), "2024-01-02 | 12.35");
        assert_eq!(label_for(&Observation::new(d(2024, 1, 2), -3.1)), "2024-01-02 | -3.1");
    }

    #[test]
    fn resolves_to_the_exact_stored_value() {
        let series = ObservationSeries::from_unsorted(vec![
            Observation::new(d(2024, 1, 1), 10.0),
            Observation::new(d(2024, 1, 2), 12.3449),
        ]);
        let label = label_for(series.get(1).unwrap());
        assert_eq!(label, "2024-01-02 | 12.34");

        let idx = resolve_label(&series, &label, 0).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(series.get(idx).unwrap().value, 12.3449);
    }

    #[test]
    fn identical_labels_on_same_date_resolve_by_occurrence() {
        let series = ObservationSeries::from_unsorted(vec![
            Observation::new(d(2024, 1, 1), 1.001),
            Observation::new(d(2024, 1, 1), 1.004),
        ]);
        assert_eq!(resolve_label(&series, "2024-01-01 | 1.0", 0), Some(0));
        assert_eq!(resolve_label(&series, "2024-01-01 | 1.0", 1), Some(1));
        assert_eq!(resolve_label(&series, "2024-01-01 | 1.0", 2), None);
    }

    #[test]
    fn choice_round_trips_to_the_same_row() {
        let series = ObservationSeries::from_unsorted(vec![
            Observation::new(d(2024, 1, 1), 5.0),
            Observation::new(d(2024, 1, 2), 1.001),
            Observation::new(d(2024, 1, 2), 1.004),
            Observation::new(d(2024, 1, 2), 1.002),
        ]);
        let labels = labels(&series);
        for i in 0..series.len() {
            let choice = Choice::at(&labels, i).unwrap();
            assert_eq!(resolve_choice(&series, &choice), Some(i));
        }
        assert_eq!(Choice::at(&labels, 2).unwrap().occurrence, 1);
        assert_eq!(Choice::at(&labels, 9), None);
    }

    #[test]
    fn every_label_round_trips_within_display_precision() {
        let series = ObservationSeries::from_unsorted(
            (0..50)
                .map(|i| Observation::new(d(2024, 1, 1) + chrono::Days::new(i), i as f64 * 0.377 - 4.0))
                .collect(),
        );
        for (i, label) in labels(&series).iter().enumerate() {
            let (_, shown) = parse_label(label).unwrap();
            assert!((shown - series.get(i).unwrap().value).abs() <= 0.005 + 1e-12);
            assert_eq!(resolve_label(&series, label, 0), Some(i));
        }
    }

    #[test]
    fn unknown_or_malformed_labels_do_not_resolve() {
        let series = ObservationSeries::from_unsorted(vec![Observation::new(d(2024, 1, 1), 10.0)]);
        assert_eq!(resolve_label(&series, "2024-01-05 | 10.0", 0), None);
        assert_eq!(resolve_label(&series, "2024-01-01 | 11.0", 0), None);
        assert_eq!(resolve_label(&series, "no separator", 0), None);
        assert_eq!(resolve_label(&series, "01/01/2024 | 10.0", 0), None);
    }
}
