use std::env;
use std::fmt;
use std::path::PathBuf;

/// Google Sheets CSV export of the NetMargin sheet.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/124iF_dVpT5HMMHRRq5s3-66lc2EpMPw8cekL2JiTR7s/gviz/tq?tqx=out:csv";

pub const REFRESH_MIN_SECS: u64 = 1;
pub const REFRESH_MAX_SECS: u64 = 60;
pub const REFRESH_DEFAULT_SECS: u64 = 10;

const SOURCE_VAR: &str = "NETMARGIN_SOURCE";
const REFRESH_VAR: &str = "NETMARGIN_REFRESH_SECS";

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Where each refresh pulls its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` strings are URLs, anything else is a path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            DataSource::Url(s.to_string())
        } else {
            DataSource::File(PathBuf::from(s))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_SHEET_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: DataSource,
    pub refresh_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            refresh_interval_secs: REFRESH_DEFAULT_SECS,
        }
    }
}

impl Config {
    /// Read `NETMARGIN_SOURCE` and `NETMARGIN_REFRESH_SECS`, after loading a
    /// `.env` file if one is present.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_vars(env::var(SOURCE_VAR).ok(), env::var(REFRESH_VAR).ok())
    }

    fn from_vars(source: Option<String>, refresh: Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(s) = source.filter(|s| !s.trim().is_empty()) {
            config.source = DataSource::parse(&s);
        }

        if let Some(raw) = refresh {
            match raw.trim().parse::<u64>() {
                Ok(secs) => {
                    let clamped = secs.clamp(REFRESH_MIN_SECS, REFRESH_MAX_SECS);
                    if clamped != secs {
                        log::warn!("{REFRESH_VAR}={secs} is outside {REFRESH_MIN_SECS}-{REFRESH_MAX_SECS}, using {clamped}");
                    }
                    config.refresh_interval_secs = clamped;
                }
                Err(_) => {
                    log::warn!("{REFRESH_VAR}='{raw}' is not a whole number of seconds, using {REFRESH_DEFAULT_SECS}");
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sheet_export() {
        let config = Config::from_vars(None, None);
        assert_eq!(config.source, DataSource::Url(DEFAULT_SHEET_URL.to_string()));
        assert_eq!(config.refresh_interval_secs, 10);
    }

    #[test]
    fn source_can_be_url_or_path() {
        assert_eq!(
            DataSource::parse("https://example.com/data.csv"),
            DataSource::Url("https://example.com/data.csv".into())
        );
        assert_eq!(
            DataSource::parse(" ./exports/netmargin.json "),
            DataSource::File(PathBuf::from("./exports/netmargin.json"))
        );
        let config = Config::from_vars(Some("  ".into()), None);
        assert_eq!(config.source, DataSource::default());
    }

    #[test]
    fn refresh_interval_is_clamped() {
        assert_eq!(Config::from_vars(None, Some("0".into())).refresh_interval_secs, 1);
        assert_eq!(Config::from_vars(None, Some("600".into())).refresh_interval_secs, 60);
        assert_eq!(Config::from_vars(None, Some(" 30 ".into())).refresh_interval_secs, 30);
        assert_eq!(Config::from_vars(None, Some("soon".into())).refresh_interval_secs, 10);
    }
}
