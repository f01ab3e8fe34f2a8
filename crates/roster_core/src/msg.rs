use crate::{JobSnapshot, Settings, Severity, StatsPatch};

/// Everything the display reacts to. Timestamps (`at`) are `HH:MM:SS` labels
/// supplied by the caller so `update` stays pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User pressed Start.
    StartClicked { at: String },
    /// User pressed Stop.
    StopClicked { at: String },
    HeadlessToggled,
    DateFilterToggled,
    /// New raw text of the "days back" entry.
    DaysBackEdited(String),
    /// User acknowledged the error alert.
    AlertDismissed,
    /// Restore settings persisted by a previous session.
    RestoreSettings(Settings),
    /// Worker activity line.
    Log {
        at: String,
        severity: Severity,
        text: String,
    },
    /// Worker counter update.
    StatsUpdated(StatsPatch),
    /// Worker is looking at this job.
    CurrentJob(JobSnapshot),
    /// Worker found a job older than the cutoff and halted.
    DateCutoffHit { at: String },
    /// Worker ended on an unrecoverable error.
    RunFailed { text: String },
    /// Worker walked every page.
    RunCompleted { at: String },
    /// Render tick.
    Tick,
    /// Fallback for unmapped input.
    NoOp,
}
