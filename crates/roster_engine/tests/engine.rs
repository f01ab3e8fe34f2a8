mod common;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::*;
use roster_engine::{EngineHandle, RunEvent};
use tempfile::TempDir;

/// Polls the handle the way the display loop does until `done` matches.
fn collect_until(engine: &EngineHandle, done: impl Fn(&RunEvent) -> bool) -> Vec<RunEvent> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut seen = Vec::new();
    while Instant::now() < deadline {
        for event in engine.drain() {
            let finished = done(&event);
            seen.push(event);
            if finished {
                return seen;
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("run did not finish; saw {seen:?}");
}

#[test]
fn worker_reports_through_the_queue_in_order() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("book.csv");
    let launcher = FakeLauncher::new(vec![vec![
        row("Alpha", "2024-05-19"),
        row("Beta", "2024-05-19"),
        row("Gamma", "2024-05-19"),
    ]]);
    let mut engine = EngineHandle::with_launcher(Arc::new(launcher));

    engine.start(config(&output));
    let events = collect_until(&engine, |event| *event == RunEvent::Complete);

    let saved: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            RunEvent::Stats(stats) => stats.total_saved,
            _ => None,
        })
        .collect();
    assert_eq!(saved, vec![1, 2, 3]);
    assert_eq!(csv_lines(&output).len(), 4);
}

#[test]
fn restart_discards_events_from_the_previous_run() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("book.csv");
    let launcher = FakeLauncher::new(vec![vec![row("Alpha", "2024-05-19")]]);
    let mut engine = EngineHandle::with_launcher(Arc::new(launcher));

    engine.start(config(&output));
    engine.stop();
    engine.start(config(&output));
    let events = collect_until(&engine, |event| *event == RunEvent::Complete);

    let completes = events
        .iter()
        .filter(|event| **event == RunEvent::Complete)
        .count();
    assert_eq!(completes, 1);
    assert_eq!(csv_lines(&output), vec![
        HEADER_LINE.to_string(),
        "Alpha,Alpha director,Seoul,alpha@example.com,Alpha facility,2024-05-19".to_string(),
    ]);
}

#[test]
fn fatal_error_reaches_the_display_side() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("book.csv");
    let mut engine = EngineHandle::with_launcher(Arc::new(FakeLauncher::failing()));

    engine.start(config(&output));
    let events = collect_until(&engine, |event| matches!(event, RunEvent::Error(_)));

    assert!(!events.contains(&RunEvent::Complete));
}
