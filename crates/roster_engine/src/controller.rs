//! The run state machine: walk listing pages row by row, stop on cutoff,
//! cancellation or the last page, and write each job as it completes.
use chrono::NaiveDate;
use engine_logging::{engine_error, engine_info, engine_warn};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::{
    AdapterError, CsvRecordWriter, DateFilter, EventSink, JobRecord, ListingLauncher,
    ListingPage, LogTone, OutputError, RowSummary, RunConfig, RunEvent, RunOutcome, StatsUpdate,
};

/// Failures that end the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("could not prepare output file: {0}")]
    Output(#[from] OutputError),
    #[error("browser session failed: {0}")]
    Session(#[from] AdapterError),
}

/// Failures confined to a single row; the run moves on.
#[derive(Debug, Error)]
enum RowError {
    #[error(transparent)]
    Page(#[from] AdapterError),
    #[error("could not append record: {0}")]
    Output(#[from] OutputError),
}

#[derive(Debug, Default)]
struct Tally {
    page: usize,
    saved: usize,
    skipped: usize,
}

/// Drives one end-to-end pass over the listing.
pub struct RunController<'a> {
    config: &'a RunConfig,
    sink: &'a dyn EventSink,
    cancel: CancellationToken,
    filter: DateFilter,
    today: NaiveDate,
}

impl<'a> RunController<'a> {
    pub fn new(
        config: &'a RunConfig,
        sink: &'a dyn EventSink,
        cancel: CancellationToken,
        today: NaiveDate,
    ) -> Self {
        Self {
            config,
            sink,
            cancel,
            filter: config.date_filter(),
            today,
        }
    }

    /// Runs to completion and reports how it ended.
    ///
    /// A fatal error is emitted once as [`RunEvent::Error`]; per-row errors
    /// only show up in the log.
    pub async fn run(&self, launcher: &dyn ListingLauncher) -> RunOutcome {
        match self.drive(launcher).await {
            Ok(outcome) => {
                engine_info!("Run finished: {}", outcome);
                outcome
            }
            Err(err) => {
                engine_error!("Run failed: {}", err);
                self.sink
                    .emit(RunEvent::Error(format!("Automation error: {err}")));
                self.log(LogTone::Error, format!("Error: {err}"));
                RunOutcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    async fn drive(&self, launcher: &dyn ListingLauncher) -> Result<RunOutcome, RunError> {
        let mut output = CsvRecordWriter::create(&self.config.output_path)?;
        self.log(
            LogTone::Info,
            format!("Output file reset: {}", output.path().display()),
        );
        self.log_settings();

        self.log(LogTone::Progress, "Navigating to job listings page...");
        let mut page = launcher.launch(self.config).await?;
        let walked = self.walk(page.as_mut(), &mut output).await;
        if let Err(err) = page.close().await {
            engine_warn!("Failed to close browser session: {}", err);
        }

        let outcome = walked?;
        if let RunOutcome::Completed { .. } = outcome {
            self.sink.emit(RunEvent::Complete);
            self.log(
                LogTone::Info,
                format!("Results saved to {}", output.path().display()),
            );
        }
        Ok(outcome)
    }

    async fn walk(
        &self,
        page: &mut dyn ListingPage,
        output: &mut CsvRecordWriter,
    ) -> Result<RunOutcome, RunError> {
        let mut tally = Tally {
            page: 1,
            ..Tally::default()
        };

        loop {
            if self.cancel.is_cancelled() {
                return Ok(RunOutcome::Stopped { saved: tally.saved });
            }

            self.log(LogTone::Progress, format!("Processing page {}", tally.page));
            let rows = page.list_rows().await?;
            let total = rows.len();
            self.stats(StatsUpdate {
                current_job_index: Some(0),
                total_jobs_on_page: Some(total),
                ..StatsUpdate::default()
            });
            if rows.is_empty() {
                self.log(LogTone::Warning, "No job listings found on this page");
                return Ok(self.finished(tally.saved));
            }

            for (offset, row) in rows.iter().enumerate() {
                if self.cancel.is_cancelled() {
                    return Ok(RunOutcome::Stopped { saved: tally.saved });
                }

                let position = offset + 1;
                self.stats(StatsUpdate {
                    current_job_index: Some(position),
                    ..StatsUpdate::default()
                });
                self.log(
                    LogTone::Progress,
                    format!("Processing job {position}/{total}"),
                );

                if !self.filter.is_within_range(&row.creation_date, self.today) {
                    self.report_cutoff(row, tally.saved);
                    return Ok(RunOutcome::CutoffReached { saved: tally.saved });
                }

                match self.process_row(page, row, output).await {
                    Ok(record) => {
                        tally.saved += 1;
                        self.stats(StatsUpdate {
                            total_saved: Some(tally.saved),
                            ..StatsUpdate::default()
                        });
                        self.log(
                            LogTone::Success,
                            format!(
                                "Saved: {} (Created: {})",
                                record.title, record.creation_date
                            ),
                        );
                    }
                    Err(err) => {
                        tally.skipped += 1;
                        engine_warn!("Skipping job {} on page {}: {}", position, tally.page, err);
                        self.stats(StatsUpdate {
                            total_skipped: Some(tally.skipped),
                            ..StatsUpdate::default()
                        });
                        self.log(
                            LogTone::Error,
                            format!("Error processing job {position}: {err}"),
                        );
                        if let Err(back_err) = page.return_to_listing().await {
                            engine_warn!("Could not return to listing: {}", back_err);
                        }
                    }
                }
            }

            if self.cancel.is_cancelled() {
                return Ok(RunOutcome::Stopped { saved: tally.saved });
            }

            if !page.advance_page().await? {
                let outcome = self.finished(tally.saved);
                if let RunOutcome::Completed { .. } = outcome {
                    self.log(LogTone::Info, "No more pages found. Automation complete.");
                }
                return Ok(outcome);
            }
            tally.page += 1;
            self.log(LogTone::Progress, "Moved to next page");
            self.stats(StatsUpdate {
                current_page: Some(tally.page),
                ..StatsUpdate::default()
            });
        }
    }

    /// A stop that lands while the page was loading still wins over completion.
    fn finished(&self, saved: usize) -> RunOutcome {
        if self.cancel.is_cancelled() {
            RunOutcome::Stopped { saved }
        } else {
            RunOutcome::Completed { saved }
        }
    }

    async fn process_row(
        &self,
        page: &mut dyn ListingPage,
        row: &RowSummary,
        output: &mut CsvRecordWriter,
    ) -> Result<JobRecord, RowError> {
        let mut record = JobRecord::from_row(row);
        self.sink.emit(RunEvent::CurrentJob(record.clone()));
        self.log(LogTone::Info, format!("Job title: {}", record.title));

        let detail = page.fetch_detail(row).await?;
        record.apply_detail(detail);
        self.sink.emit(RunEvent::CurrentJob(record.clone()));

        output.append(&record)?;
        Ok(record)
    }

    fn report_cutoff(&self, row: &RowSummary, saved: usize) {
        self.sink
            .emit(RunEvent::CurrentJob(JobRecord::from_row(row)));
        self.log(
            LogTone::Warning,
            format!("Found old job: {} (Created: {})", row.title, row.creation_date),
        );
        self.log(
            LogTone::Info,
            format!("Final results: {saved} jobs saved from recent listings"),
        );
        self.sink.emit(RunEvent::DateCutoffHit);
    }

    fn log_settings(&self) {
        let mode = if self.config.headless {
            "Hidden (Headless)"
        } else {
            "Visible"
        };
        self.log(LogTone::Info, format!("Browser mode: {mode}"));

        let policy = match self.filter {
            DateFilter::Disabled => "Smart cutoff disabled: processing all jobs".to_string(),
            DateFilter::DaysBack(days) => format!(
                "Smart cutoff enabled: will stop at the first job older than {days} days"
            ),
        };
        self.log(LogTone::Info, policy);
    }

    fn stats(&self, update: StatsUpdate) {
        self.sink.emit(RunEvent::Stats(update));
    }

    fn log(&self, tone: LogTone, text: impl Into<String>) {
        self.sink.emit(RunEvent::log(tone, text));
    }
}
