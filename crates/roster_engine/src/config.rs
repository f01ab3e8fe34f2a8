use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::DateFilter;

/// Listing of childcare job offers; the markup parser is written against this page.
pub const LISTING_URL: &str = "https://central.childcare.go.kr/ccef/job/JobOfferSlPL.jsp?flag=SlPL";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";
pub const DEFAULT_OUTPUT_FILE: &str = "address_book.csv";
pub const DEFAULT_DAYS_BACK: u32 = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {what} url {raw:?}: {reason}")]
    InvalidUrl {
        what: &'static str,
        raw: String,
        reason: String,
    },
}

/// Snapshot of everything a run needs; taken once when the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub headless: bool,
    pub date_filter_enabled: bool,
    pub days_back: u32,
    pub output_path: PathBuf,
    pub listing_url: Url,
    pub webdriver_url: Url,
}

impl RunConfig {
    /// Builds a config pointing at the default listing page and WebDriver endpoint.
    pub fn new(output_path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            headless: false,
            date_filter_enabled: false,
            days_back: DEFAULT_DAYS_BACK,
            output_path: output_path.into(),
            listing_url: parse_endpoint("listing", LISTING_URL)?,
            webdriver_url: parse_endpoint("webdriver", DEFAULT_WEBDRIVER_URL)?,
        })
    }

    pub fn with_webdriver_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.webdriver_url = parse_endpoint("webdriver", raw)?;
        Ok(self)
    }

    pub fn date_filter(&self) -> DateFilter {
        if self.date_filter_enabled {
            DateFilter::DaysBack(self.days_back)
        } else {
            DateFilter::Disabled
        }
    }
}

/// Parses the user's "days back" entry, falling back to 7 for anything that
/// is not a non-negative integer.
pub fn parse_days_back(input: &str) -> u32 {
    input.trim().parse().unwrap_or(DEFAULT_DAYS_BACK)
}

fn parse_endpoint(what: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidUrl {
        what,
        raw: raw.to_string(),
        reason: err.to_string(),
    })
}
