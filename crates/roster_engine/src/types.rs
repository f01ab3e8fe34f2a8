use std::fmt;

/// One listing row as read from the listing page, before the detail view is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSummary {
    /// Zero-based position among the clickable title links on the page.
    pub index: usize,
    pub title: String,
    /// Raw text of the creation-date cell; empty when the cell is missing.
    pub creation_date: String,
}

/// Fields read from the fixed-shape table on a detail page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobDetail {
    pub facility_type: String,
    pub region: String,
    pub name: String,
    pub email: String,
}

/// A job posting assembled from its listing row and detail page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobRecord {
    pub title: String,
    pub name: String,
    pub region: String,
    pub email: String,
    pub facility_type: String,
    pub creation_date: String,
}

impl JobRecord {
    /// Starts a record from what the listing row exposes.
    pub fn from_row(row: &RowSummary) -> Self {
        Self {
            title: row.title.clone(),
            creation_date: row.creation_date.clone(),
            ..Self::default()
        }
    }

    pub fn apply_detail(&mut self, detail: JobDetail) {
        self.facility_type = detail.facility_type;
        self.region = detail.region;
        self.name = detail.name;
        self.email = detail.email;
    }

    /// Column order matches the CSV header.
    pub fn to_row(&self) -> [&str; 6] {
        [
            &self.title,
            &self.name,
            &self.region,
            &self.email,
            &self.facility_type,
            &self.creation_date,
        ]
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { saved: usize },
    Stopped { saved: usize },
    CutoffReached { saved: usize },
    Failed { message: String },
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Completed { saved } => write!(f, "completed ({saved} saved)"),
            RunOutcome::Stopped { saved } => write!(f, "stopped ({saved} saved)"),
            RunOutcome::CutoffReached { saved } => write!(f, "date cutoff ({saved} saved)"),
            RunOutcome::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}
