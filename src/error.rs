use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load errors – anything that stops a series from being built
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the data must contain 'NetMargin' and 'Date' columns (missing: {missing})")]
    MissingColumns { missing: String },

    #[error("row {row}: '{raw}' is not a number")]
    InvalidValue { row: usize, raw: String },

    #[error("row {row}: '{raw}' is not a recognised date")]
    InvalidDate { row: usize, raw: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("the data contains no observations")]
    Empty,
}

// ---------------------------------------------------------------------------
// Statistics errors – degenerate inputs the fit cannot handle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("insufficient data for distribution fit: {n} observation(s), need at least 2")]
    InsufficientData { n: usize },

    #[error("cannot fit a distribution: every observation equals {value}")]
    ZeroSpread { value: f64 },

    #[error("cannot fit a distribution: the spread of the values overflows")]
    NonFiniteSpread,

    #[error("selection {index} is out of range for {len} observations")]
    SelectionOutOfRange { index: usize, len: usize },
}
