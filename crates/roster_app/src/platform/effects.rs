use std::thread;
use std::time::{Duration, Instant};

use engine_logging::{engine_info, engine_warn};
use roster_core::{Effect, JobSnapshot, Msg, RunRequest, Severity, StatsPatch};
use roster_engine::{
    parse_days_back, ConfigError, EngineHandle, JobRecord, LogTone, RunConfig, RunEvent,
    StatsUpdate,
};

use super::persistence::{PersistedSettings, SettingsStore};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Executes core effects against the engine and the settings file, and turns
/// engine events back into display messages.
pub struct EffectRunner {
    engine: EngineHandle,
    store: SettingsStore,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: SettingsStore) -> Self {
        Self { engine, store }
    }

    /// Runs the effects; any messages they produce immediately are returned.
    pub fn enqueue(&mut self, effects: Vec<Effect>, at: &str) -> Vec<Msg> {
        let mut replies = Vec::new();
        for effect in effects {
            match effect {
                Effect::StartRun(request) => {
                    match build_config(&request, self.store.current()) {
                        Ok(config) => {
                            let days_invalid =
                                request.days_back_input.trim().parse::<u32>().is_err();
                            if config.date_filter_enabled && days_invalid {
                                replies.push(Msg::Log {
                                    at: at.to_string(),
                                    severity: Severity::Warning,
                                    text: format!(
                                        "Invalid days back {:?}; using default {}",
                                        request.days_back_input, config.days_back
                                    ),
                                });
                            }
                            self.engine.start(config);
                        }
                        Err(err) => {
                            // No worker runs, so the feed line has to come from here.
                            engine_warn!("Cannot start run: {}", err);
                            replies.push(Msg::Log {
                                at: at.to_string(),
                                severity: Severity::Error,
                                text: format!("Error: {err}"),
                            });
                            replies.push(Msg::RunFailed {
                                text: format!("Automation error: {err}"),
                            });
                        }
                    }
                }
                Effect::StopRun => self.engine.stop(),
                Effect::PersistSettings(settings) => {
                    engine_info!("Persisting settings {:?}", settings);
                    self.store.save(&settings);
                }
            }
        }
        replies
    }

    /// Drains every pending engine event, in order, stamped with `at`.
    pub fn poll(&self, at: &str) -> Vec<Msg> {
        self.engine
            .drain()
            .into_iter()
            .map(|event| map_event(event, at))
            .collect()
    }

    /// Stops the active run and gives the worker a moment to close its
    /// browser session before the process exits.
    pub fn shutdown(&self) {
        self.engine.stop();
        let deadline = Instant::now() + SHUTDOWN_GRACE;
        while self.engine.is_worker_alive() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(50));
        }
        if self.engine.is_worker_alive() {
            engine_warn!("Worker still running at exit; browser session may stay open");
        }
    }
}

fn build_config(
    request: &RunRequest,
    persisted: &PersistedSettings,
) -> Result<RunConfig, ConfigError> {
    let mut config = RunConfig::new(&persisted.output_path)?
        .with_webdriver_url(&persisted.webdriver_url)?;
    config.headless = request.headless;
    config.date_filter_enabled = request.date_filter_enabled;
    config.days_back = parse_days_back(&request.days_back_input);
    Ok(config)
}

fn map_event(event: RunEvent, at: &str) -> Msg {
    match event {
        RunEvent::Log { tone, text } => Msg::Log {
            at: at.to_string(),
            severity: map_tone(tone),
            text,
        },
        RunEvent::Stats(stats) => Msg::StatsUpdated(map_stats(stats)),
        RunEvent::CurrentJob(record) => Msg::CurrentJob(map_record(record)),
        RunEvent::DateCutoffHit => Msg::DateCutoffHit { at: at.to_string() },
        RunEvent::Error(text) => Msg::RunFailed { text },
        RunEvent::Complete => Msg::RunCompleted { at: at.to_string() },
    }
}

fn map_tone(tone: LogTone) -> Severity {
    match tone {
        LogTone::Info => Severity::Info,
        LogTone::Progress => Severity::Progress,
        LogTone::Success => Severity::Success,
        LogTone::Warning => Severity::Warning,
        LogTone::Error => Severity::Error,
    }
}

fn map_stats(stats: StatsUpdate) -> StatsPatch {
    StatsPatch {
        current_page: stats.current_page,
        current_job_index: stats.current_job_index,
        total_jobs_on_page: stats.total_jobs_on_page,
        total_saved: stats.total_saved,
        total_skipped: stats.total_skipped,
    }
}

fn map_record(record: JobRecord) -> JobSnapshot {
    JobSnapshot {
        title: record.title,
        name: record.name,
        region: record.region,
        email: record.email,
        facility_type: record.facility_type,
        creation_date: record.creation_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(days: &str) -> RunRequest {
        RunRequest {
            headless: true,
            date_filter_enabled: true,
            days_back_input: days.to_string(),
        }
    }

    #[test]
    fn config_combines_request_and_persisted_paths() {
        let persisted = PersistedSettings {
            output_path: "out/book.csv".into(),
            webdriver_url: "http://127.0.0.1:9515".to_string(),
            ..PersistedSettings::default()
        };
        let config = build_config(&request("14"), &persisted).unwrap();
        assert!(config.headless);
        assert_eq!(config.days_back, 14);
        assert_eq!(config.output_path, std::path::PathBuf::from("out/book.csv"));
        assert_eq!(config.webdriver_url.as_str(), "http://127.0.0.1:9515/");
    }

    #[test]
    fn unparsable_days_back_uses_default() {
        let config = build_config(&request(""), &PersistedSettings::default()).unwrap();
        assert_eq!(config.days_back, 7);
    }

    #[test]
    fn bad_webdriver_url_is_a_config_error() {
        let persisted = PersistedSettings {
            webdriver_url: "::nope".to_string(),
            ..PersistedSettings::default()
        };
        assert!(build_config(&request("7"), &persisted).is_err());
    }

    #[test]
    fn bad_webdriver_url_fails_the_run_with_a_feed_line() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(".roster_settings.ron");
        std::fs::write(&path, r#"(webdriver_url: "::nope")"#).unwrap();
        let mut runner = EffectRunner::new(EngineHandle::new(), SettingsStore::load(&path));

        let replies = runner.enqueue(vec![Effect::StartRun(request("7"))], "10:00:00");

        assert_eq!(replies.len(), 2);
        match &replies[0] {
            Msg::Log { at, severity, text } => {
                assert_eq!(at, "10:00:00");
                assert_eq!(*severity, Severity::Error);
                assert!(text.contains("::nope"));
            }
            other => panic!("expected a log line, got {other:?}"),
        }
        assert!(matches!(&replies[1], Msg::RunFailed { text } if text.starts_with("Automation error")));

        let (state, _) = roster_core::update(
            roster_core::AppState::new(),
            Msg::StartClicked {
                at: "10:00:00".to_string(),
            },
        );
        let state = replies
            .into_iter()
            .fold(state, |state, msg| roster_core::update(state, msg).0);
        assert_eq!(state.status(), roster_core::RunStatus::Failed);
        assert!(state
            .activity()
            .iter()
            .any(|entry| entry.severity == Severity::Error));
    }

    #[test]
    fn engine_events_map_one_to_one() {
        assert_eq!(
            map_event(RunEvent::Error("boom".to_string()), "10:00:00"),
            Msg::RunFailed {
                text: "boom".to_string()
            }
        );
        assert_eq!(
            map_event(RunEvent::log(LogTone::Success, "Saved: x"), "10:00:00"),
            Msg::Log {
                at: "10:00:00".to_string(),
                severity: Severity::Success,
                text: "Saved: x".to_string(),
            }
        );
        assert_eq!(
            map_event(
                RunEvent::Stats(StatsUpdate {
                    total_saved: Some(2),
                    ..StatsUpdate::default()
                }),
                "10:00:00"
            ),
            Msg::StatsUpdated(StatsPatch {
                total_saved: Some(2),
                ..StatsPatch::default()
            })
        );
    }
}
