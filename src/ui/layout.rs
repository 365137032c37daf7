//! Layout components (header, status bar)

use crate::app::App;
use crate::state::FormKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Keyboard hints shown in the status bar
const HINTS: &str = "Tab:next  Enter:submit  F2:form  ^R:reset  Esc:cancel/quit";

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Form tabs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the form tabs, highlighting the current one
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.state.screen.kind;
    let mut spans = vec![];
    for kind in FormKind::ALL {
        let style = if kind == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", kind.title()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {HINTS}"),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.state.status_message {
        let color = if app.state.screen.engine.state().has_errors() {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
