use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use chrono::Local;
use engine_logging::{engine_error, engine_info, engine_warn};
use tokio_util::sync::CancellationToken;

use crate::events::Envelope;
use crate::{
    ChannelEventSink, EventSink, ListingLauncher, RunConfig, RunController, RunEvent,
    RunGeneration, WebDriverLauncher,
};

struct ActiveRun {
    cancel: CancellationToken,
    worker: JoinHandle<()>,
}

/// Owns the worker thread and the event queue it reports through.
///
/// One run is active at a time. Starting a new run cancels the previous one
/// and the new worker waits for the old thread to exit before it touches the
/// output file.
pub struct EngineHandle {
    launcher: Arc<dyn ListingLauncher>,
    event_tx: mpsc::Sender<Envelope>,
    event_rx: mpsc::Receiver<Envelope>,
    generation: RunGeneration,
    active: Option<ActiveRun>,
}

impl EngineHandle {
    pub fn new() -> Self {
        Self::with_launcher(Arc::new(WebDriverLauncher))
    }

    pub fn with_launcher(launcher: Arc<dyn ListingLauncher>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            launcher,
            event_tx,
            event_rx,
            generation: 0,
            active: None,
        }
    }

    pub fn start(&mut self, config: RunConfig) {
        let previous = self.active.take().map(|run| {
            run.cancel.cancel();
            run.worker
        });

        self.generation += 1;
        let generation = self.generation;
        let cancel = CancellationToken::new();
        let sink = ChannelEventSink::new(generation, self.event_tx.clone());
        let launcher = self.launcher.clone();
        let worker_cancel = cancel.clone();

        engine_info!(
            "Starting run {} (headless={}, filter={:?}, output={:?})",
            generation,
            config.headless,
            config.date_filter(),
            config.output_path
        );
        let worker = thread::spawn(move || {
            if let Some(previous) = previous {
                if previous.join().is_err() {
                    engine_warn!("Previous worker panicked");
                }
            }
            run_worker(config, launcher.as_ref(), &sink, worker_cancel);
        });

        self.active = Some(ActiveRun { cancel, worker });
    }

    /// Requests a cooperative stop; the worker notices at its next checkpoint.
    pub fn stop(&self) {
        if let Some(run) = &self.active {
            engine_info!("Stop requested for run {}", self.generation);
            run.cancel.cancel();
        }
    }

    /// Next pending event of the current run, skipping events from older runs.
    pub fn try_recv(&self) -> Option<RunEvent> {
        while let Ok(envelope) = self.event_rx.try_recv() {
            if envelope.generation == self.generation {
                return Some(envelope.event);
            }
        }
        None
    }

    /// Every pending event of the current run, in arrival order.
    pub fn drain(&self) -> Vec<RunEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    pub fn is_worker_alive(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|run| !run.worker.is_finished())
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        // Let the worker close its browser session at the next checkpoint.
        self.stop();
    }
}

fn run_worker(
    config: RunConfig,
    launcher: &dyn ListingLauncher,
    sink: &dyn EventSink,
    cancel: CancellationToken,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            engine_error!("Failed to build worker runtime: {}", err);
            sink.emit(RunEvent::Error(format!("Automation error: {err}")));
            return;
        }
    };

    let today = Local::now().date_naive();
    let controller = RunController::new(&config, sink, cancel, today);
    runtime.block_on(controller.run(launcher));
}
