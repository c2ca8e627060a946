use crate::{state::AppState, theme::Theme};

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Single-row header: assistant name, turn status and the open/close hint
pub struct Header<'a> {
    state: &'a AppState,
    awaiting: bool,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, awaiting: bool) -> Self {
        Self { state, awaiting }
    }

    pub fn status(&self) -> &'static str {
        if self.awaiting { "waiting" } else { "idle" }
    }

    pub fn line(&self) -> Line<'static> {
        let toggle = if self.state.open { "[Ctrl-O] close" } else { "[Ctrl-O] open" };
        Line::from(vec![
            Span::styled(
                self.state.assistant_name.clone(),
                Style::default().fg(Theme::BLUE).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" [", Style::default().fg(Theme::MUTED)),
            Theme::status_span(self.status()),
            Span::styled("]  ", Style::default().fg(Theme::MUTED)),
            Span::styled(toggle, Style::default().fg(Theme::MUTED)),
        ])
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let header = Paragraph::new(self.line()).style(Theme::panel()).alignment(Alignment::Left);
        frame.render_widget(header, area);
    }
}
