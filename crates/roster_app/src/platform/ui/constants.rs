use std::time::Duration;

use ratatui::style::Color;

pub const APP_TITLE: &str = "Job Listing Automation";

/// How long the loop waits for input before draining the worker queue.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub const HELP_TEXT: &str =
    "s start | x stop | h browser mode | f date filter | 0-9/Backspace days back | q quit";
pub const ALERT_HINT: &str = "Press Enter or Esc to dismiss";

pub const HEADER_HEIGHT: u16 = 3;
pub const CONTROLS_HEIGHT: u16 = 3;
pub const STATS_HEIGHT: u16 = 3;
pub const GAUGE_HEIGHT: u16 = 1;
pub const JOB_HEIGHT: u16 = 8;
pub const HELP_HEIGHT: u16 = 1;
pub const ALERT_WIDTH_PERCENT: u16 = 60;
pub const ALERT_HEIGHT: u16 = 7;

pub const ACCENT: Color = Color::Rgb(90, 145, 200);
pub const MUTED: Color = Color::Rgb(130, 130, 130);
pub const SUCCESS: Color = Color::Green;
pub const WARNING: Color = Color::Yellow;
pub const ERROR: Color = Color::Red;
pub const PROGRESS: Color = Color::Cyan;
