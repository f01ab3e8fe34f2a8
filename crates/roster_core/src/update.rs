use crate::state::MAX_DAYS_BACK_DIGITS;
use crate::{AppState, Effect, Msg, RunRequest, RunStatus, Severity};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::StartClicked { at } => {
            if state.run().is_running {
                return (state, Vec::new());
            }
            state.begin_run();
            state.push_log(at, Severity::Info, "Automation started!");
            vec![Effect::StartRun(RunRequest::from(state.settings()))]
        }
        Msg::StopClicked { at } => {
            if state.halt_run() {
                if !state.run().date_cutoff_reached {
                    state.set_status(RunStatus::Stopped);
                    state.push_log(at, Severity::Info, "Automation stopped by user");
                }
                vec![Effect::StopRun]
            } else {
                Vec::new()
            }
        }
        Msg::HeadlessToggled => edit_settings(&mut state, |settings| {
            settings.headless = !settings.headless;
        }),
        Msg::DateFilterToggled => edit_settings(&mut state, |settings| {
            settings.date_filter_enabled = !settings.date_filter_enabled;
        }),
        Msg::DaysBackEdited(raw) => {
            let digits: String = raw
                .chars()
                .filter(char::is_ascii_digit)
                .take(MAX_DAYS_BACK_DIGITS)
                .collect();
            if digits == state.settings().days_back_input {
                Vec::new()
            } else {
                edit_settings(&mut state, |settings| settings.days_back_input = digits)
            }
        }
        Msg::AlertDismissed => {
            if state.alert().is_some() {
                state.set_alert(None);
            }
            Vec::new()
        }
        Msg::RestoreSettings(settings) => {
            *state.settings_mut() = settings;
            Vec::new()
        }
        Msg::Log { at, severity, text } => {
            state.push_log(at, severity, text);
            Vec::new()
        }
        Msg::StatsUpdated(patch) => {
            state.apply_stats(patch);
            Vec::new()
        }
        Msg::CurrentJob(job) => {
            state.set_current_job(job);
            Vec::new()
        }
        Msg::DateCutoffHit { at } => {
            state.mark_date_cutoff();
            state.set_status(RunStatus::DateCutoff);
            state.push_log(
                at,
                Severity::Warning,
                "Date cutoff reached! Stopping automation to save resources.",
            );
            if state.halt_run() {
                vec![Effect::StopRun]
            } else {
                Vec::new()
            }
        }
        Msg::RunCompleted { at } => {
            // A run the user already stopped keeps its Stopped status.
            if state.halt_run() {
                state.set_status(RunStatus::Complete);
                state.push_log(at, Severity::Success, "Automation completed!");
            }
            Vec::new()
        }
        Msg::RunFailed { text } => {
            // The worker logs the failure itself; this only raises the alert.
            state.halt_run();
            state.set_status(RunStatus::Failed);
            state.set_alert(Some(text));
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Settings are frozen while a run is active; the worker already has its snapshot.
fn edit_settings(
    state: &mut AppState,
    edit: impl FnOnce(&mut crate::Settings),
) -> Vec<Effect> {
    if state.run().is_running {
        return Vec::new();
    }
    edit(state.settings_mut());
    vec![Effect::PersistSettings(state.settings().clone())]
}
