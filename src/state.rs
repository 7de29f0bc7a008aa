use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::config::{Config, DataSource, REFRESH_MAX_SECS, REFRESH_MIN_SECS};
use crate::data::loader;
use crate::data::model::ObservationSeries;
use crate::data::selector::{self, Choice};
use crate::report::{self, Report};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Source used on every refresh.
    pub source: DataSource,

    /// Source from the startup configuration, restored from the File menu.
    pub configured_source: DataSource,

    /// Latest successfully loaded series (None until the first load, and
    /// after a failed one).
    pub series: Option<ObservationSeries>,

    /// Dropdown labels for `series`, in series order.
    pub labels: Vec<String>,

    /// Index into `series` of the chosen observation.
    pub selected: Option<usize>,

    /// The user's last explicit choice; survives refreshes.
    pub choice: Option<Choice>,

    /// Analysis of the current selection.
    pub report: Option<Report>,

    /// Seconds between refreshes, kept within 1..=60 by the slider.
    pub refresh_interval_secs: u64,

    /// When the pipeline last ran.
    pub last_refresh: Option<Instant>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            source: config.source.clone(),
            configured_source: config.source,
            series: None,
            labels: Vec::new(),
            selected: None,
            choice: None,
            report: None,
            refresh_interval_secs: config
                .refresh_interval_secs
                .clamp(REFRESH_MIN_SECS, REFRESH_MAX_SECS),
            last_refresh: None,
            status_message: None,
        }
    }

    // -- Loop driver --

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Whether the pipeline should run again at `now`.
    pub fn refresh_due(&self, now: Instant) -> bool {
        match self.last_refresh {
            None => true,
            Some(last) => now.duration_since(last) >= self.refresh_interval(),
        }
    }

    /// Time left until the next refresh.
    pub fn time_until_refresh(&self, now: Instant) -> Duration {
        match self.last_refresh {
            None => Duration::ZERO,
            Some(last) => self
                .refresh_interval()
                .saturating_sub(now.duration_since(last)),
        }
    }

    /// Re-run the whole pipeline from the data source.
    ///
    /// The refresh clock starts when the load finishes, so a slow fetch never
    /// eats into the idle interval that follows it.
    pub fn reload(&mut self) {
        log::debug!("Refreshing from {}", self.source);
        let loaded = loader::load_source(&self.source);
        self.last_refresh = Some(Instant::now());

        match loaded {
            Ok(series) => {
                log::info!("Loaded {} observations from {}", series.len(), self.source);
                self.set_series(series);
            }
            Err(e) => {
                log::error!("Failed to fetch data: {e}");
                self.status_message = Some(format!("Failed to fetch data: {e}"));
                self.series = None;
                self.labels.clear();
                self.selected = None;
                self.report = None;
            }
        }
    }

    /// Point refreshes at a new source and load from it immediately.
    pub fn set_source(&mut self, source: DataSource) {
        log::info!("Switching data source to {source}");
        self.source = source;
        self.choice = None;
        self.reload();
    }

    // -- Selection --

    /// Ingest a freshly loaded series and re-resolve the user's choice in it.
    ///
    /// A previous choice is carried by its label and occurrence; if it no
    /// longer resolves, the latest observation is selected.
    pub fn set_series(&mut self, series: ObservationSeries) {
        self.labels = selector::labels(&series);
        self.selected = self
            .choice
            .as_ref()
            .and_then(|choice| selector::resolve_choice(&series, choice))
            .or_else(|| series.latest_index());
        self.series = Some(series);
        self.status_message = None;
        self.recompute();
    }

    /// Choose the observation at `index` in the current series.
    pub fn select(&mut self, index: usize) {
        if let Some(choice) = Choice::at(&self.labels, index) {
            self.choice = Some(choice);
            self.selected = Some(index);
            self.recompute();
        }
    }

    /// Re-run the statistics for the current selection.
    pub fn recompute(&mut self) {
        self.report = None;
        let (Some(series), Some(index)) = (&self.series, self.selected) else {
            return;
        };

        match report::analyze(series, index) {
            Ok(report) => {
                self.report = Some(report);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Cannot analyse selection {index}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    // -- Export --

    /// Write the current percentile summary as CSV.
    pub fn export_summary(&self, path: &Path) -> Result<()> {
        let report = self
            .report
            .as_ref()
            .context("nothing to export: no analysed selection")?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        report.write_summary_csv(file)?;
        log::info!("Exported percentile summary to {}", path.display());
        Ok(())
    }
}
