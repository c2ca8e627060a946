use crate::{state::AppState, theme::Theme};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const PROMPT: &str = "> ";

/// Input composer with the key hints underneath
///
/// - Rows 1-3: bordered input line
/// - Row 4: notice (left) and shortcuts (right)
pub struct Composer<'a> {
    state: &'a AppState,
}

impl<'a> Composer<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub fn height() -> u16 {
        4
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(area);

        let block = Block::default().borders(Borders::ALL).border_style(Theme::border());
        let input = Paragraph::new(self.input_line()).block(block).style(Theme::base());
        frame.render_widget(input, rows[0]);

        let inner_width = rows[0].width.saturating_sub(2) as usize;
        let column = (PROMPT.len() + self.state.input.cursor_column()).min(inner_width.saturating_sub(1));
        frame.set_cursor_position(Position::new(rows[0].x + 1 + column as u16, rows[0].y + 1));

        if let Some(notice) = &self.state.notice {
            let notice = Paragraph::new(Span::styled(notice.clone(), Style::default().fg(Theme::YELLOW)));
            frame.render_widget(notice, rows[1]);
        }

        let hints = Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Theme::BLUE)),
            Span::styled(" send  ", Style::default().fg(Theme::MUTED)),
            Span::styled("[↑↓]", Style::default().fg(Theme::BLUE)),
            Span::styled(" history  ", Style::default().fg(Theme::MUTED)),
            Span::styled("[Esc]", Style::default().fg(Theme::BLUE)),
            Span::styled(" exit", Style::default().fg(Theme::MUTED)),
        ]);
        frame.render_widget(Paragraph::new(hints).alignment(Alignment::Right), rows[1]);
    }

    pub fn input_line(&self) -> Line<'static> {
        let input = &self.state.input;
        let body = if input.buffer.is_empty() {
            Span::styled("Type a message...", Theme::muted())
        } else {
            Span::styled(input.buffer.clone(), Theme::text())
        };

        let mut spans = vec![Span::styled(PROMPT, Style::default().fg(Theme::BLUE)), body];
        if let Some(position) = input.history_position() {
            spans.push(Span::styled(format!("  ({})", position), Theme::muted()));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_input_shows_hint() {
        let state = AppState::default();
        assert_eq!(line_text(&Composer::new(&state).input_line()), "> Type a message...");
    }

    #[test]
    fn test_input_with_history_position() {
        let mut state = AppState::default();
        state.input.add_to_history("one".to_string());
        state.input.add_to_history("two".to_string());
        state.input.navigate_up();

        assert_eq!(line_text(&Composer::new(&state).input_line()), "> two  (2/2)");
    }
}
