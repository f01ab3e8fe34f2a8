use crate::{JobSnapshot, RunStatus, Severity};

/// Everything the renderer needs, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: RunStatus,
    pub status_label: &'static str,
    pub is_running: bool,
    pub can_start: bool,
    pub can_stop: bool,
    pub total_saved: usize,
    pub total_skipped: usize,
    pub current_page: usize,
    /// `current/total` jobs on the page.
    pub progress_label: String,
    /// 0..=100.
    pub progress_percent: u16,
    pub job: JobFieldsView,
    pub activity: Vec<LogLineView>,
    pub headless: bool,
    pub date_filter_enabled: bool,
    pub days_back_input: String,
    pub alert: Option<String>,
    pub dirty: bool,
}

/// Job fields with `-` standing in for anything not known yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobFieldsView {
    pub title: String,
    pub name: String,
    pub region: String,
    pub email: String,
    pub facility_type: String,
    pub creation_date: String,
}

impl JobFieldsView {
    pub(crate) fn from_snapshot(job: &JobSnapshot) -> Self {
        Self {
            title: or_dash(&job.title),
            name: or_dash(&job.name),
            region: or_dash(&job.region),
            email: or_dash(&job.email),
            facility_type: or_dash(&job.facility_type),
            creation_date: or_dash(&job.creation_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLineView {
    pub text: String,
    pub severity: Severity,
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
