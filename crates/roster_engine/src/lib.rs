//! Roster engine: browser-driven listing walk, parsing and CSV output.
mod adapter;
mod browser;
mod config;
mod controller;
mod cutoff;
mod engine;
mod events;
pub mod markup;
mod output;
mod types;

pub use adapter::{AdapterError, ListingLauncher, ListingPage};
pub use browser::{WebDriverLauncher, WebDriverListing};
pub use config::{
    parse_days_back, ConfigError, RunConfig, DEFAULT_DAYS_BACK, DEFAULT_OUTPUT_FILE,
    DEFAULT_WEBDRIVER_URL, LISTING_URL,
};
pub use controller::{RunController, RunError};
pub use cutoff::{DateFilter, CREATION_DATE_FORMAT};
pub use engine::EngineHandle;
pub use events::{ChannelEventSink, EventSink, LogTone, RunEvent, RunGeneration, StatsUpdate};
pub use markup::MarkupError;
pub use output::{write_atomically, CsvRecordWriter, OutputError, CSV_HEADER};
pub use types::{JobDetail, JobRecord, RowSummary, RunOutcome};
