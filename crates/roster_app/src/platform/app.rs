use std::collections::VecDeque;
use std::io;
use std::path::Path;

use chrono::Local;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use engine_logging::{engine_info, DEFAULT_LOG_FILE};
use log::LevelFilter;
use ratatui::prelude::*;
use roster_core::{update, AppState, AppViewModel, Msg};
use roster_engine::EngineHandle;

use super::effects::EffectRunner;
use super::input::{next_input, to_msg, Input};
use super::persistence::{SettingsStore, SETTINGS_FILENAME};
use super::ui;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub fn run_app() -> anyhow::Result<()> {
    engine_logging::initialize(Path::new(DEFAULT_LOG_FILE), LevelFilter::Info);
    engine_info!("Starting roster_app");

    let store = SettingsStore::load(Path::new(SETTINGS_FILENAME));
    let restored = store.current().ui_settings();
    let runner = EffectRunner::new(EngineHandle::new(), store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let mut shell = DisplayLoop::new(runner);
    shell.dispatch(Msg::RestoreSettings(restored));
    let result = shell.run(&mut terminal);
    shell.runner.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    engine_info!("roster_app exiting");
    result
}

/// Owns the display state; the only place `update` is called.
struct DisplayLoop {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
    inbox: VecDeque<Msg>,
}

impl DisplayLoop {
    fn new(runner: EffectRunner) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            runner,
            inbox: VecDeque::new(),
        }
    }

    fn run(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        self.redraw(terminal)?;
        loop {
            let input = next_input(ui::constants::TICK_INTERVAL)?;
            let at = timestamp();
            let mut force_redraw = false;
            match input {
                Input::Quit => return Ok(()),
                Input::Resize => force_redraw = true,
                other => {
                    if let Some(msg) = to_msg(other, &self.view, at.clone()) {
                        self.inbox.push_back(msg);
                    }
                }
            }

            self.inbox.extend(self.runner.poll(&at));
            self.process_pending_messages(&at);

            if self.state.consume_dirty() || force_redraw {
                self.view = self.state.view();
                self.redraw(terminal)?;
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        self.inbox.push_back(msg);
        self.process_pending_messages(&timestamp());
    }

    /// Applies queued messages in order, including replies produced by effects.
    fn process_pending_messages(&mut self, at: &str) {
        while let Some(msg) = self.inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            if !effects.is_empty() {
                let replies = self.runner.enqueue(effects, at);
                self.inbox.extend(replies);
            }
        }
        self.view = self.state.view();
    }

    fn redraw(&self, terminal: &mut Tui) -> io::Result<()> {
        terminal.draw(|frame| ui::render::render(frame, &self.view))?;
        Ok(())
    }
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
