use std::sync::mpsc;

use crate::JobRecord;

/// Identifies one run; events from a superseded run are discarded.
pub type RunGeneration = u64;

/// Coarse classification of activity-feed lines, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTone {
    Info,
    Progress,
    Success,
    Warning,
    Error,
}

/// Partial counter update; `None` fields leave the display value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsUpdate {
    pub current_page: Option<usize>,
    pub current_job_index: Option<usize>,
    pub total_jobs_on_page: Option<usize>,
    pub total_saved: Option<usize>,
    pub total_skipped: Option<usize>,
}

/// Messages sent from the worker to the display, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Log { tone: LogTone, text: String },
    Stats(StatsUpdate),
    CurrentJob(JobRecord),
    DateCutoffHit,
    Error(String),
    Complete,
}

impl RunEvent {
    pub fn log(tone: LogTone, text: impl Into<String>) -> Self {
        RunEvent::Log {
            tone,
            text: text.into(),
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: RunEvent);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Envelope {
    pub generation: RunGeneration,
    pub event: RunEvent,
}

/// Forwards events into the unbounded engine channel, tagged with the run generation.
pub struct ChannelEventSink {
    generation: RunGeneration,
    tx: mpsc::Sender<Envelope>,
}

impl ChannelEventSink {
    pub(crate) fn new(generation: RunGeneration, tx: mpsc::Sender<Envelope>) -> Self {
        Self { generation, tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: RunEvent) {
        // The display may already be gone during shutdown.
        let _ = self.tx.send(Envelope {
            generation: self.generation,
            event,
        });
    }
}
