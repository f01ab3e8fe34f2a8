#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::NaiveDate;
use roster_engine::{
    AdapterError, EventSink, JobDetail, ListingLauncher, ListingPage, LogTone, MarkupError,
    RowSummary, RunConfig, RunEvent,
};
use tokio_util::sync::CancellationToken;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

pub fn config(output: &Path) -> RunConfig {
    RunConfig::new(output).unwrap()
}

#[derive(Clone)]
pub struct FakeRow {
    pub title: String,
    pub creation_date: String,
    pub detail: Result<JobDetail, MarkupError>,
}

pub fn row(title: &str, creation_date: &str) -> FakeRow {
    FakeRow {
        title: title.to_string(),
        creation_date: creation_date.to_string(),
        detail: Ok(JobDetail {
            facility_type: format!("{title} facility"),
            region: "Seoul".to_string(),
            name: format!("{title} director"),
            email: format!("{}@example.com", title.to_lowercase().replace(' ', ".")),
        }),
    }
}

pub fn broken_row(title: &str, creation_date: &str) -> FakeRow {
    FakeRow {
        detail: Err(MarkupError::TooFewRows { found: 3 }),
        ..row(title, creation_date)
    }
}

/// Shared counters so tests can inspect what the controller asked for.
#[derive(Default)]
pub struct Calls {
    pub fetched: AtomicUsize,
    pub returned: AtomicUsize,
    pub closed: AtomicUsize,
}

pub struct FakeLauncher {
    pages: Vec<Vec<FakeRow>>,
    pub calls: Arc<Calls>,
    fail_launch: bool,
    cancel_after_fetches: Option<(usize, CancellationToken)>,
    cancel_on_advance: Option<CancellationToken>,
}

impl FakeLauncher {
    pub fn new(pages: Vec<Vec<FakeRow>>) -> Self {
        Self {
            pages,
            calls: Arc::new(Calls::default()),
            fail_launch: false,
            cancel_after_fetches: None,
            cancel_on_advance: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::new(Vec::new())
        }
    }

    /// Cancels `token` once `count` detail pages have been fetched.
    pub fn cancel_after(mut self, count: usize, token: CancellationToken) -> Self {
        self.cancel_after_fetches = Some((count, token));
        self
    }

    /// Cancels `token` while the next-page control is being followed.
    pub fn cancel_during_advance(mut self, token: CancellationToken) -> Self {
        self.cancel_on_advance = Some(token);
        self
    }
}

#[async_trait]
impl ListingLauncher for FakeLauncher {
    async fn launch(&self, _config: &RunConfig) -> Result<Box<dyn ListingPage>, AdapterError> {
        if self.fail_launch {
            return Err(AdapterError::Closed);
        }
        Ok(Box::new(FakeListing {
            pages: self.pages.clone(),
            current: 0,
            calls: self.calls.clone(),
            cancel_after_fetches: self.cancel_after_fetches.clone(),
            cancel_on_advance: self.cancel_on_advance.clone(),
        }))
    }
}

struct FakeListing {
    pages: Vec<Vec<FakeRow>>,
    current: usize,
    calls: Arc<Calls>,
    cancel_after_fetches: Option<(usize, CancellationToken)>,
    cancel_on_advance: Option<CancellationToken>,
}

#[async_trait]
impl ListingPage for FakeListing {
    async fn list_rows(&mut self) -> Result<Vec<RowSummary>, AdapterError> {
        let rows = self.pages.get(self.current).cloned().unwrap_or_default();
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| RowSummary {
                index,
                title: row.title,
                creation_date: row.creation_date,
            })
            .collect())
    }

    async fn fetch_detail(&mut self, row: &RowSummary) -> Result<JobDetail, AdapterError> {
        let fetched = self.calls.fetched.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((limit, token)) = &self.cancel_after_fetches {
            if fetched >= *limit {
                token.cancel();
            }
        }
        let fake = &self.pages[self.current][row.index];
        Ok(fake.detail.clone()?)
    }

    async fn return_to_listing(&mut self) -> Result<(), AdapterError> {
        self.calls.returned.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn advance_page(&mut self) -> Result<bool, AdapterError> {
        if let Some(token) = &self.cancel_on_advance {
            token.cancel();
        }
        if self.current + 1 < self.pages.len() {
            self.current += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn close(&mut self) -> Result<(), AdapterError> {
        self.calls.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<RunEvent>>,
}

impl CollectingSink {
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, wanted: &RunEvent) -> usize {
        self.events().iter().filter(|event| *event == wanted).count()
    }

    pub fn logs(&self, tone: LogTone) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RunEvent::Log { tone: t, text } if t == tone => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_saved(&self) -> Option<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RunEvent::Stats(stats) => stats.total_saved,
                _ => None,
            })
            .last()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn csv_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(ToOwned::to_owned)
        .collect()
}

pub const HEADER_LINE: &str = "Job Title,Name,Region,Email,Facility Type,Creation Date";
