use crate::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartRun(RunRequest),
    StopRun,
    PersistSettings(Settings),
}

/// Settings snapshot handed to the worker when a run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub headless: bool,
    pub date_filter_enabled: bool,
    pub days_back_input: String,
}

impl From<&Settings> for RunRequest {
    fn from(settings: &Settings) -> Self {
        Self {
            headless: settings.headless,
            date_filter_enabled: settings.date_filter_enabled,
            days_back_input: settings.days_back_input.clone(),
        }
    }
}
