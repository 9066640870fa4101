//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::features::progress::ProgressSink;
use crate::features::timer::{format_length, format_mmss, Clock, SessionStatus, TimerSnapshot};
use crate::tui::app::{App, Entry};

/// Render the application UI.
pub fn render<C: Clock, S: ProgressSink>(frame: &mut Frame<'_>, app: &App<'_, C, S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_header(frame, app, chunks[0]);
    render_list(frame, app, body[0]);
    render_player(frame, app.snapshot().as_ref(), body[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_header<C: Clock, S: ProgressSink>(frame: &mut Frame<'_>, app: &App<'_, C, S>, area: Rect) {
    let summary = app.runner().catalog().completion_summary();
    let title = format!(
        " mindwell  {}/{} exercises completed ({:.0}%) ",
        summary.completed, summary.total, summary.rate_percent
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_list<C: Clock, S: ProgressSink>(frame: &mut Frame<'_>, app: &App<'_, C, S>, area: Rect) {
    let catalog = app.runner().catalog();

    let items: Vec<ListItem<'_>> = app
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = i == app.selected;
            let name_style = Style::default().add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });

            let spans = match entry {
                Entry::Exercise(id) => match catalog.exercise(id) {
                    Ok(exercise) => vec![
                        Span::styled(
                            if exercise.completed { "[x] " } else { "[ ] " },
                            Style::default().fg(if exercise.completed {
                                Color::Green
                            } else {
                                Color::White
                            }),
                        ),
                        Span::styled(exercise.title.clone(), name_style),
                        Span::styled(
                            format!("  {}", format_length(u64::from(exercise.duration_secs))),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ],
                    Err(_) => vec![Span::raw(id.clone())],
                },
                Entry::Pattern(id) => match catalog.pattern(id) {
                    Ok(pattern) => vec![
                        Span::styled("~   ", Style::default().fg(Color::Blue)),
                        Span::styled(pattern.name.clone(), name_style),
                        Span::styled(
                            format!("  {}", pattern.label()),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ],
                    Err(_) => vec![Span::raw(id.clone())],
                },
            };

            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Catalog ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_player(frame: &mut Frame<'_>, snapshot: Option<&TimerSnapshot>, area: Rect) {
    let block = Block::default()
        .title(" Player ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let Some(snap) = snapshot else {
        let idle = Paragraph::new("Select an exercise or pattern and press Enter")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(idle, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(2), // Countdown
            Constraint::Length(1), // Gauge
            Constraint::Length(2), // Phase
            Constraint::Min(0),    // State
        ])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        snap.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    let countdown = Paragraph::new(format_mmss(snap.remaining_secs))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(countdown, rows[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio((snap.progress_percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}%", snap.progress_percent));
    frame.render_widget(gauge, rows[2]);

    if let Some(phase) = snap.phase {
        let phase_line = Paragraph::new(Line::from(vec![
            Span::styled(
                phase.instruction(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   cycle {}", snap.cycles + 1),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(phase_line, rows[3]);
    }

    let (label, color) = match snap.status {
        SessionStatus::Running => ("Playing", Color::Green),
        SessionStatus::Paused => ("Paused", Color::Yellow),
        SessionStatus::Completed => ("Completed", Color::Green),
    };
    let state = Paragraph::new(Span::styled(label, Style::default().fg(color)))
        .alignment(Alignment::Center);
    frame.render_widget(state, rows[4]);
}

fn render_status_bar<C: Clock, S: ProgressSink>(
    frame: &mut Frame<'_>,
    app: &App<'_, C, S>,
    area: Rect,
) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("j/k:nav | Enter:start | space:play/pause | r:reset | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
