use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Observation – one row of the source sheet
// ---------------------------------------------------------------------------

/// A single dated NetMargin reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

// ---------------------------------------------------------------------------
// ObservationSeries – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All observations, ascending by date.
///
/// The ordering is established once in [`ObservationSeries::from_unsorted`]
/// and relied upon by the filter, which takes a prefix instead of scanning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSeries {
    observations: Vec<Observation>,
}

impl ObservationSeries {
    /// Sort rows by date. The sort is stable, so rows sharing a date keep
    /// their input order.
    pub fn from_unsorted(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.date);
        Self { observations }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Index of the most recent observation (the last one after sorting).
    pub fn latest_index(&self) -> Option<usize> {
        self.observations.len().checked_sub(1)
    }

    /// Earliest and latest dates covered.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.observations.first()?.date, self.observations.last()?.date))
    }
}
