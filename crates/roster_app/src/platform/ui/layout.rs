use ratatui::layout::{Constraint, Flex, Layout, Rect};

use super::constants::*;

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub controls: Rect,
    pub stats: [Rect; 4],
    pub gauge: Rect,
    pub job: Rect,
    pub activity: Rect,
    pub help: Rect,
}

pub fn screen_areas(area: Rect) -> ScreenAreas {
    let [header, controls, stats_row, gauge, job, activity, help] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(CONTROLS_HEIGHT),
        Constraint::Length(STATS_HEIGHT),
        Constraint::Length(GAUGE_HEIGHT),
        Constraint::Length(JOB_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(HELP_HEIGHT),
    ])
    .areas(area);
    let stats = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(stats_row);

    ScreenAreas {
        header,
        controls,
        stats,
        gauge,
        job,
        activity,
        help,
    }
}

/// Horizontally and vertically centred box for the alert popup.
pub fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
