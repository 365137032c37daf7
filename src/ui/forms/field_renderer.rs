//! Field rendering utilities for forms

use crate::state::FieldSpec;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus its error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a form field with its current value and error message
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldSpec,
    value: &str,
    error: Option<&str>,
    is_active: bool,
) {
    let border_style = match (is_active, error.is_some()) {
        (true, _) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Red),
        (false, false) => Style::default().fg(Color::DarkGray),
    };

    let display_value = field.display_value(value);
    let placeholder = display_value.is_empty() && !is_active;
    let text = if placeholder {
        Span::styled(field.label.clone(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(display_value)
    };

    let mut spans = vec![text];
    if is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let input_area = Rect {
        height: area.height.min(3),
        ..area
    };
    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input_area);

    if let Some(message) = error {
        if area.height > 3 {
            let error_area = Rect {
                y: area.y + 3,
                height: 1,
                ..area
            };
            let line = Paragraph::new(Span::styled(
                format!(" {message}"),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(line, error_area);
        }
    }
}
