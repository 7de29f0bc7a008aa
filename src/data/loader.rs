use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value as JsonValue};

use super::model::{Observation, ObservationSeries};
use crate::config::DataSource;
use crate::error::LoadError;

/// Column holding the analysed metric.
pub const VALUE_COLUMN: &str = "NetMargin";
/// Column holding the observation date.
pub const DATE_COLUMN: &str = "Date";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a fresh series from wherever the app is pointed.
pub fn load_source(source: &DataSource) -> Result<ObservationSeries, LoadError> {
    match source {
        DataSource::Url(url) => fetch_url(url),
        DataSource::File(path) => load_file(path),
    }
}

/// Download a CSV export and parse it.
pub fn fetch_url(url: &str) -> Result<ObservationSeries, LoadError> {
    log::info!("Fetching CSV from {url}");
    let body = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|source| LoadError::Fetch {
            url: url.to_string(),
            source,
        })?;
    parse_csv(body.as_bytes())
}

/// Load a series from a local export.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with `Date` and `NetMargin` columns (others ignored)
/// * `.json` – `[{ "Date": "2024-01-02", "NetMargin": 12.5 }, ...]`
pub fn load_file(path: &Path) -> Result<ObservationSeries, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let read = || {
        std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match ext.as_str() {
        "csv" => parse_csv(read()?.as_bytes()),
        "json" => parse_json(&read()?),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row.  Header cells are trimmed before they
/// are matched, extra columns are ignored.
pub fn parse_csv<R: Read>(input: R) -> Result<ObservationSeries, LoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    let value_idx = headers.iter().position(|h| h.trim() == VALUE_COLUMN);
    let date_idx = headers.iter().position(|h| h.trim() == DATE_COLUMN);
    let (value_idx, date_idx) = match (value_idx, date_idx) {
        (Some(v), Some(d)) => (v, d),
        (v, d) => {
            return Err(missing_columns(v.is_none(), d.is_none()));
        }
    };

    let mut observations = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;
        let raw_value = record.get(value_idx).unwrap_or("");
        let raw_date = record.get(date_idx).unwrap_or("");
        observations.push(coerce_row(row, raw_date, raw_value)?);
    }

    finish(observations)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON array.  `NetMargin` may be a number or a
/// numeric string; `Date` must be a string.
pub fn parse_json(text: &str) -> Result<ObservationSeries, LoadError> {
    let records: Vec<Map<String, JsonValue>> = serde_json::from_str(text)?;

    let mut observations = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let row = i + 1;
        let (value, date) = match (record.get(VALUE_COLUMN), record.get(DATE_COLUMN)) {
            (Some(v), Some(d)) => (v, d),
            (v, d) => return Err(missing_columns(v.is_none(), d.is_none())),
        };

        let raw_value = match value {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        let raw_date = match date {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        observations.push(coerce_row(row, &raw_date, &raw_value)?);
    }

    finish(observations)
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

fn missing_columns(value_missing: bool, date_missing: bool) -> LoadError {
    let missing: Vec<&str> = [(value_missing, VALUE_COLUMN), (date_missing, DATE_COLUMN)]
        .iter()
        .filter(|(is_missing, _)| *is_missing)
        .map(|(_, name)| *name)
        .collect();
    LoadError::MissingColumns {
        missing: missing.join(", "),
    }
}

fn coerce_row(row: usize, raw_date: &str, raw_value: &str) -> Result<Observation, LoadError> {
    let value = parse_value(raw_value).ok_or_else(|| LoadError::InvalidValue {
        row,
        raw: raw_value.to_string(),
    })?;
    let date = parse_date(raw_date).ok_or_else(|| LoadError::InvalidDate {
        row,
        raw: raw_date.to_string(),
    })?;
    Ok(Observation::new(date, value))
}

fn finish(observations: Vec<Observation>) -> Result<ObservationSeries, LoadError> {
    let series = ObservationSeries::from_unsorted(observations);
    if series.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(series)
}

/// Parse a finite real number; blanks, `NaN` and infinities are rejected.
pub fn parse_value(s: &str) -> Option<f64> {
    let v = s.trim().parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Parse a calendar date from the formats spreadsheets commonly export.
///
/// Slash dates are read month first.  A time of day, if present, is dropped.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FMTS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%b %d, %Y"];
    const DATETIME_FMTS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];

    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
