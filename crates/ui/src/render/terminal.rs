use super::{MessageRole, RenderedMessage, RenderedTranscript, Segment};
use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Draws a rendered transcript as a bordered, wrapped message list
pub struct TranscriptRenderer<'a> {
    rendered: &'a RenderedTranscript,
    assistant_name: &'a str,
}

impl<'a> TranscriptRenderer<'a> {
    pub fn new(rendered: &'a RenderedTranscript, assistant_name: &'a str) -> Self {
        Self { rendered, assistant_name }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled("Messages", Style::default().fg(Theme::BLUE)));

        let paragraph = Paragraph::new(Text::from(self.lines()))
            .block(block)
            .style(Theme::base())
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }

    /// All lines in display order, one blank line between messages
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, message) in self.rendered.messages().iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            self.render_message(message, &mut lines);
        }
        lines
    }

    fn render_message(&self, message: &RenderedMessage, lines: &mut Vec<Line<'static>>) {
        let (marker, label, accent) = match message.role {
            MessageRole::Visitor => ("● ", "You".to_string(), Theme::GREEN),
            MessageRole::Operator => ("◆ ", self.assistant_name.to_string(), Theme::CYAN),
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(accent)),
            Span::styled(label, Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        ]));

        let mut current: Vec<Span<'static>> = Vec::new();
        for segment in &message.segments {
            match segment {
                Segment::Link(url) => current.push(Span::styled(url.clone(), Theme::link())),
                Segment::Text(text) => {
                    let mut parts = text.split('\n');
                    if let Some(first) = parts.next()
                        && !first.is_empty()
                    {
                        current.push(Span::styled(first.to_string(), Theme::text()));
                    }
                    for part in parts {
                        lines.push(Line::from(std::mem::take(&mut current)));
                        if !part.is_empty() {
                            current.push(Span::styled(part.to_string(), Theme::text()));
                        }
                    }
                }
            }
        }
        lines.push(Line::from(current));
    }
}
