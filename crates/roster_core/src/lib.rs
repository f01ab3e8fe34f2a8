//! Roster core: pure display state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, RunRequest};
pub use msg::Msg;
pub use state::{
    AppState, JobSnapshot, LogEntry, RunState, RunStatus, Settings, Severity, StatsPatch,
    ACTIVITY_VIEW_LIMIT, DEFAULT_DAYS_BACK_INPUT,
};
pub use update::update;
pub use view_model::{AppViewModel, JobFieldsView, LogLineView};
