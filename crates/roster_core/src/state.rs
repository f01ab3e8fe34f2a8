use crate::view_model::{AppViewModel, JobFieldsView, LogLineView};

/// Lifecycle label shown on the status card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Ready,
    Running,
    Stopped,
    DateCutoff,
    Complete,
    Failed,
}

/// Counters and flags of the current (or last) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub is_running: bool,
    pub stop_requested: bool,
    pub date_cutoff_reached: bool,
    /// 1-based.
    pub current_page: usize,
    pub current_job_index: usize,
    pub total_jobs_on_page: usize,
    pub total_saved: usize,
    pub total_skipped: usize,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            is_running: false,
            stop_requested: false,
            date_cutoff_reached: false,
            current_page: 1,
            current_job_index: 0,
            total_jobs_on_page: 0,
            total_saved: 0,
            total_skipped: 0,
        }
    }
}

/// Partial counter update coming from the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsPatch {
    pub current_page: Option<usize>,
    pub current_job_index: Option<usize>,
    pub total_jobs_on_page: Option<usize>,
    pub total_saved: Option<usize>,
    pub total_skipped: Option<usize>,
}

impl RunState {
    pub(crate) fn apply(&mut self, patch: StatsPatch) {
        if let Some(page) = patch.current_page {
            self.current_page = page;
        }
        if let Some(index) = patch.current_job_index {
            self.current_job_index = index;
        }
        if let Some(total) = patch.total_jobs_on_page {
            self.total_jobs_on_page = total;
        }
        if let Some(saved) = patch.total_saved {
            self.total_saved = saved;
        }
        if let Some(skipped) = patch.total_skipped {
            self.total_skipped = skipped;
        }
    }
}

/// Most recent job the worker reported, possibly only half filled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobSnapshot {
    pub title: String,
    pub name: String,
    pub region: String,
    pub email: String,
    pub facility_type: String,
    pub creation_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Progress,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Wall-clock label, `HH:MM:SS`.
    pub at: String,
    pub severity: Severity,
    pub text: String,
}

/// User-editable run options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub headless: bool,
    pub date_filter_enabled: bool,
    /// Raw text of the "days back" entry; parsed when a run starts.
    pub days_back_input: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            headless: false,
            date_filter_enabled: false,
            days_back_input: DEFAULT_DAYS_BACK_INPUT.to_string(),
        }
    }
}

pub const DEFAULT_DAYS_BACK_INPUT: &str = "7";
pub(crate) const MAX_DAYS_BACK_DIGITS: usize = 4;
/// Newest activity lines carried into the view; more never fit on screen.
pub const ACTIVITY_VIEW_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    run: RunState,
    status: RunStatus,
    current_job: JobSnapshot,
    activity: Vec<LogEntry>,
    settings: Settings,
    alert: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn activity(&self) -> &[LogEntry] {
        &self.activity
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn current_job(&self) -> &JobSnapshot {
        &self.current_job
    }

    pub fn view(&self) -> AppViewModel {
        let progress_percent = if self.run.total_jobs_on_page > 0 {
            let ratio = self.run.current_job_index.min(self.run.total_jobs_on_page) * 100
                / self.run.total_jobs_on_page;
            ratio as u16
        } else {
            0
        };

        AppViewModel {
            status: self.status,
            status_label: status_label(self.status),
            is_running: self.run.is_running,
            can_start: !self.run.is_running,
            can_stop: self.run.is_running,
            total_saved: self.run.total_saved,
            total_skipped: self.run.total_skipped,
            current_page: self.run.current_page,
            progress_label: format!(
                "{}/{}",
                self.run.current_job_index, self.run.total_jobs_on_page
            ),
            progress_percent,
            job: JobFieldsView::from_snapshot(&self.current_job),
            activity: self.activity[self.activity.len().saturating_sub(ACTIVITY_VIEW_LIMIT)..]
                .iter()
                .map(|entry| LogLineView {
                    text: format!("[{}] {}", entry.at, entry.text),
                    severity: entry.severity,
                })
                .collect(),
            headless: self.settings.headless,
            date_filter_enabled: self.settings.date_filter_enabled,
            days_back_input: self.settings.days_back_input.clone(),
            alert: self.alert.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn push_log(&mut self, at: String, severity: Severity, text: impl Into<String>) {
        self.activity.push(LogEntry {
            at,
            severity,
            text: text.into(),
        });
        self.mark_dirty();
    }

    /// Resets counters for a fresh run and marks it running.
    pub(crate) fn begin_run(&mut self) {
        self.run = RunState {
            is_running: true,
            ..RunState::default()
        };
        self.status = RunStatus::Running;
        self.current_job = JobSnapshot::default();
        self.alert = None;
        self.mark_dirty();
    }

    /// Common stop path for the Stop button, the cutoff and completion.
    ///
    /// Returns false when no run was active.
    pub(crate) fn halt_run(&mut self) -> bool {
        if !self.run.is_running {
            return false;
        }
        self.run.stop_requested = true;
        self.run.is_running = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_status(&mut self, status: RunStatus) {
        self.status = status;
        self.mark_dirty();
    }

    pub(crate) fn mark_date_cutoff(&mut self) {
        self.run.date_cutoff_reached = true;
        self.mark_dirty();
    }

    pub(crate) fn apply_stats(&mut self, patch: StatsPatch) {
        self.run.apply(patch);
        self.mark_dirty();
    }

    pub(crate) fn set_current_job(&mut self, job: JobSnapshot) {
        self.current_job = job;
        self.mark_dirty();
    }

    pub(crate) fn set_alert(&mut self, text: Option<String>) {
        self.alert = text;
        self.mark_dirty();
    }

    pub(crate) fn settings_mut(&mut self) -> &mut Settings {
        self.mark_dirty();
        &mut self.settings
    }
}

fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Ready => "Ready",
        RunStatus::Running => "Running",
        RunStatus::Stopped => "Stopped",
        RunStatus::DateCutoff => "Date Cutoff",
        RunStatus::Complete => "Complete",
        RunStatus::Failed => "Failed",
    }
}
