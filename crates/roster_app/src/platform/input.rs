use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use roster_core::{AppViewModel, Msg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Tick,
    Quit,
    Resize,
    Start,
    Stop,
    ToggleHeadless,
    ToggleDateFilter,
    Digit(char),
    Backspace,
    Confirm,
}

fn map_key_event(key_event: KeyEvent) -> Input {
    if key_event.kind != KeyEventKind::Press {
        return Input::Tick;
    }
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return Input::Quit;
    }

    match key_event.code {
        KeyCode::Char('q') => Input::Quit,
        KeyCode::Char('s') => Input::Start,
        KeyCode::Char('x') => Input::Stop,
        KeyCode::Char('h') => Input::ToggleHeadless,
        KeyCode::Char('f') => Input::ToggleDateFilter,
        KeyCode::Char(c) if c.is_ascii_digit() => Input::Digit(c),
        KeyCode::Backspace => Input::Backspace,
        KeyCode::Enter | KeyCode::Esc => Input::Confirm,
        _ => Input::Tick,
    }
}

/// Waits up to `timeout` for a terminal event.
pub fn next_input(timeout: Duration) -> io::Result<Input> {
    if event::poll(timeout)? {
        return Ok(match event::read()? {
            Event::Key(key_event) => map_key_event(key_event),
            Event::Resize(..) => Input::Resize,
            _ => Input::Tick,
        });
    }
    Ok(Input::Tick)
}

/// Translates a key into a display message given what is on screen.
///
/// While the error alert is open only the dismiss key gets through.
pub fn to_msg(input: Input, view: &AppViewModel, at: String) -> Option<Msg> {
    if view.alert.is_some() {
        return (input == Input::Confirm).then_some(Msg::AlertDismissed);
    }

    match input {
        Input::Start => Some(Msg::StartClicked { at }),
        Input::Stop => Some(Msg::StopClicked { at }),
        Input::ToggleHeadless => Some(Msg::HeadlessToggled),
        Input::ToggleDateFilter => Some(Msg::DateFilterToggled),
        Input::Digit(c) => {
            let mut text = view.days_back_input.clone();
            text.push(c);
            Some(Msg::DaysBackEdited(text))
        }
        Input::Backspace => {
            let mut text = view.days_back_input.clone();
            text.pop()?;
            Some(Msg::DaysBackEdited(text))
        }
        Input::Tick | Input::Quit | Input::Resize | Input::Confirm => None,
    }
}
