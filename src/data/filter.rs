use chrono::NaiveDate;

use super::model::{Observation, ObservationSeries};

// ---------------------------------------------------------------------------
// Date cutoff filter
// ---------------------------------------------------------------------------

/// Observations dated on or before `cutoff`.
///
/// The series is sorted by date, so the matching rows always form a prefix
/// and the cutoff position is found by binary search.
pub fn up_to(series: &ObservationSeries, cutoff: NaiveDate) -> &[Observation] {
    let rows = series.as_slice();
    let end = rows.partition_point(|o| o.date <= cutoff);
    &rows[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series() -> ObservationSeries {
        ObservationSeries::from_unsorted(vec![
            Observation::new(d(2024, 1, 1), 10.0),
            Observation::new(d(2024, 1, 2), 20.0),
            Observation::new(d(2024, 1, 2), 25.0),
            Observation::new(d(2024, 1, 3), 30.0),
        ])
    }

    #[test]
    fn includes_every_row_on_the_cutoff_date() {
        let s = series();
        let kept = up_to(&s, d(2024, 1, 2));
        let values: Vec<f64> = kept.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 25.0]);
    }

    #[test]
    fn latest_date_keeps_whole_series() {
        let s = series();
        let latest = s.get(s.latest_index().unwrap()).unwrap().date;
        assert_eq!(up_to(&s, latest), s.as_slice());
    }

    #[test]
    fn cutoff_before_first_row_is_empty() {
        let s = series();
        assert!(up_to(&s, d(2023, 12, 31)).is_empty());
    }
}
