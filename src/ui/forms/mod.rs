//! Form rendering module

mod field_renderer;

use crate::app::App;
use crate::ui::components::{render_submit_button, SubmitButton, BUTTON_HEIGHT};
use field_renderer::{draw_field, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the current form: one row per field, form-level error, submit button
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let screen = &app.state.screen;
    let engine = &screen.engine;
    let state = engine.state();

    let block = Block::default()
        .title(format!(" {} ", screen.kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = engine
        .fields()
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(1)); // Form-level error
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Submit
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for (idx, field) in engine.fields().iter().enumerate() {
        draw_field(
            frame,
            chunks[idx],
            field,
            state.value(&field.name),
            state.error(&field.name),
            screen.active_row_index == idx,
        );
    }

    let field_count = engine.fields().len();
    if let Some(message) = &state.form_error {
        let line = Paragraph::new(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(line, chunks[field_count]);
    }

    render_submit_button(
        frame,
        chunks[field_count + 1],
        SubmitButton::new(screen.is_submit_row_active(), state.is_submitting),
    );
}
