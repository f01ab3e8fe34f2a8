use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Gauge, Paragraph, Wrap};
use roster_core::{AppViewModel, RunStatus, Severity};

use super::constants::*;
use super::layout::{centered_rect, screen_areas};

pub fn render(frame: &mut Frame, view: &AppViewModel) {
    let areas = screen_areas(frame.area());

    frame.render_widget(header(view), areas.header);
    frame.render_widget(controls(view), areas.controls);

    let cards = [
        ("Saved", view.total_saved.to_string()),
        ("Page", view.current_page.to_string()),
        ("Progress", view.progress_label.clone()),
        ("Skipped", view.total_skipped.to_string()),
    ];
    for ((title, value), area) in cards.into_iter().zip(areas.stats) {
        frame.render_widget(stat_card(title, value), area);
    }

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(ACCENT))
            .percent(view.progress_percent.min(100))
            .label(format!("{}%", view.progress_percent.min(100))),
        areas.gauge,
    );
    frame.render_widget(job_panel(view), areas.job);
    frame.render_widget(activity_feed(view, areas.activity.height), areas.activity);
    frame.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(MUTED)),
        areas.help,
    );

    if let Some(text) = &view.alert {
        let popup = centered_rect(ALERT_WIDTH_PERCENT, ALERT_HEIGHT, frame.area());
        frame.render_widget(Clear, popup);
        frame.render_widget(alert(text), popup);
    }
}

fn header(view: &AppViewModel) -> Paragraph<'static> {
    let status_style = Style::default()
        .fg(status_color(view.status))
        .add_modifier(Modifier::BOLD);
    Paragraph::new(Line::from(vec![
        Span::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(view.status_label, status_style),
    ]))
    .block(Block::bordered())
}

fn controls(view: &AppViewModel) -> Paragraph<'static> {
    let editable = if view.is_running {
        Style::default().fg(MUTED)
    } else {
        Style::default()
    };
    let browser = if view.headless {
        "Hidden (Headless)"
    } else {
        "Visible"
    };
    let filter = if view.date_filter_enabled { "On" } else { "Off" };
    let days = if view.days_back_input.is_empty() {
        "_".to_string()
    } else {
        view.days_back_input.clone()
    };

    Paragraph::new(Line::from(vec![
        Span::styled(format!("Browser: {browser}"), editable),
        Span::raw("  "),
        Span::styled(format!("Date filter: {filter}"), editable),
        Span::raw("  "),
        Span::styled(format!("Days back: {days}"), editable),
        Span::raw("    "),
        button("Start", view.can_start),
        Span::raw(" "),
        button("Stop", view.can_stop),
    ]))
    .block(Block::bordered().title("Settings"))
}

fn button(label: &'static str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::Black).bg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    };
    Span::styled(format!("[{label}]"), style)
}

fn stat_card(title: &'static str, value: String) -> Paragraph<'static> {
    Paragraph::new(value)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::bordered().title(title))
}

fn job_panel(view: &AppViewModel) -> Paragraph<'static> {
    let job = &view.job;
    let rows = [
        ("Job Title", &job.title),
        ("Name", &job.name),
        ("Region", &job.region),
        ("Email", &job.email),
        ("Facility Type", &job.facility_type),
        ("Creation Date", &job.creation_date),
    ];
    let lines: Vec<Line<'static>> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<14}"), Style::default().fg(MUTED)),
                Span::raw(value.clone()),
            ])
        })
        .collect();
    Paragraph::new(lines).block(Block::bordered().title("Current Job"))
}

/// Shows the newest lines that fit, oldest first.
fn activity_feed(view: &AppViewModel, height: u16) -> Paragraph<'static> {
    let visible = usize::from(height.saturating_sub(2));
    let skip = view.activity.len().saturating_sub(visible);
    let lines: Vec<Line<'static>> = view
        .activity
        .iter()
        .skip(skip)
        .map(|line| Line::styled(line.text.clone(), severity_style(line.severity)))
        .collect();
    Paragraph::new(lines).block(Block::bordered().title("Activity"))
}

fn alert(text: &str) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::styled(text.to_string(), Style::default().fg(ERROR)),
        Line::raw(""),
        Line::styled(ALERT_HINT, Style::default().fg(MUTED)),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::bordered().title("Error").border_style(Style::default().fg(ERROR)))
}

fn status_color(status: RunStatus) -> Color {
    match status {
        RunStatus::Ready | RunStatus::Stopped => Color::White,
        RunStatus::Running => PROGRESS,
        RunStatus::DateCutoff => WARNING,
        RunStatus::Complete => SUCCESS,
        RunStatus::Failed => ERROR,
    }
}

fn severity_style(severity: Severity) -> Style {
    let color = match severity {
        Severity::Info => Color::White,
        Severity::Progress => PROGRESS,
        Severity::Success => SUCCESS,
        Severity::Warning => WARNING,
        Severity::Error => ERROR,
    };
    Style::default().fg(color)
}
