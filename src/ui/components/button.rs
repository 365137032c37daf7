//! Submit button for the form screen

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Widest the button gets, whatever the form width
const MAX_BUTTON_WIDTH: u16 = 20;

/// What the submit button shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitButton {
    Idle,
    Focused,
    /// A submit is in flight; the button ignores focus until it finishes
    Loading,
}

impl SubmitButton {
    pub fn new(is_focused: bool, is_submitting: bool) -> Self {
        match (is_submitting, is_focused) {
            (true, _) => Self::Loading,
            (false, true) => Self::Focused,
            (false, false) => Self::Idle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Loading => "Loading...",
            Self::Idle | Self::Focused => "Submit",
        }
    }

    fn styles(self) -> (Style, Style) {
        match self {
            Self::Idle => (Style::default().fg(Color::DarkGray), Style::default()),
            Self::Focused => (
                Style::default().fg(Color::Cyan),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Self::Loading => (
                Style::default().fg(Color::Yellow),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
        }
    }
}

/// Render the submit button at the top-left of `area`
pub fn render_submit_button(frame: &mut Frame, area: Rect, button: SubmitButton) {
    let area = Rect {
        width: area.width.min(MAX_BUTTON_WIDTH),
        ..area
    };
    let (border_style, text_style) = button.styles();

    let paragraph = Paragraph::new(format!(" {} ", button.label())).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(button: SubmitButton) -> ratatui::buffer::Buffer {
        let mut terminal = Terminal::new(TestBackend::new(30, BUTTON_HEIGHT)).unwrap();
        terminal
            .draw(|frame| render_submit_button(frame, frame.area(), button))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buffer: &ratatui::buffer::Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_state_from_flags() {
        assert_eq!(SubmitButton::new(false, false), SubmitButton::Idle);
        assert_eq!(SubmitButton::new(true, false), SubmitButton::Focused);
        assert_eq!(SubmitButton::new(true, true), SubmitButton::Loading);
        assert_eq!(SubmitButton::new(false, true), SubmitButton::Loading);
    }

    #[test]
    fn test_loading_replaces_label_and_ignores_focus() {
        let buffer = render(SubmitButton::new(true, true));
        assert!(row_text(&buffer, 1).contains("Loading..."));
        assert!(!row_text(&buffer, 1).contains("Submit"));
        assert_eq!(buffer[(2, 1)].fg, Color::Yellow);
        assert_eq!(buffer[(0, 0)].fg, Color::Yellow);
    }

    #[test]
    fn test_focused_is_highlighted() {
        let buffer = render(SubmitButton::Focused);
        assert!(row_text(&buffer, 1).contains("Submit"));
        assert_eq!(buffer[(2, 1)].fg, Color::Cyan);
        assert!(buffer[(2, 1)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_width_is_capped() {
        let buffer = render(SubmitButton::Idle);
        assert_eq!(buffer[(MAX_BUTTON_WIDTH - 1, 0)].symbol(), "┐");
        assert_eq!(buffer[(MAX_BUTTON_WIDTH, 0)].symbol(), " ");
    }
}
