use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Iceberg color theme for the chat widget
///
/// Based on iceberg.vim color scheme (https://github.com/cocopon/iceberg.vim)
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Primary background: deep blue-black (fills terminal)
    pub const BG: Color = Color::Rgb(22, 24, 33);

    /// Foreground: light blue-gray (primary text)
    pub const FG: Color = Color::Rgb(198, 200, 209);

    /// Secondary background: composer and header panels
    pub const PANEL_BG: Color = Color::Rgb(30, 33, 50);

    /// Primary accent: blue
    pub const BLUE: Color = Color::Rgb(132, 160, 198);

    /// Operator messages and links
    pub const CYAN: Color = Color::Rgb(137, 184, 194);

    /// Visitor messages
    pub const GREEN: Color = Color::Rgb(180, 190, 130);

    /// Awaiting an answer
    pub const YELLOW: Color = Color::Rgb(226, 164, 120);

    /// Errors
    pub const RED: Color = Color::Rgb(226, 120, 120);

    /// Muted text: dimmed foreground
    pub const MUTED: Color = Color::Rgb(107, 112, 137);

    /// Border color
    pub const BORDER: Color = Color::Rgb(60, 65, 90);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Message body text
    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    /// Detected hyperlinks
    pub fn link() -> Style {
        Style::default().fg(Self::CYAN).add_modifier(Modifier::UNDERLINED)
    }

    /// Muted style (for secondary text)
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BG)
    }

    /// Panel style
    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    /// Border style
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Color for a turn status label
    pub fn status_color(status: &str) -> Color {
        match status {
            "idle" => Self::GREEN,
            "waiting" => Self::YELLOW,
            "error" => Self::RED,
            _ => Self::MUTED,
        }
    }

    /// Get span with turn status styling
    pub fn status_span(status: &str) -> Span<'_> {
        Span::styled(status, Style::default().fg(Self::status_color(status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_values() {
        assert!(matches!(Theme::BG, Color::Rgb(_, _, _)));
        assert!(matches!(Theme::FG, Color::Rgb(_, _, _)));
        assert!(matches!(Theme::PANEL_BG, Color::Rgb(_, _, _)));
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(Theme::status_color("idle"), Theme::GREEN);
        assert_eq!(Theme::status_color("waiting"), Theme::YELLOW);
        assert_eq!(Theme::status_color("error"), Theme::RED);
        assert_eq!(Theme::status_color("unknown"), Theme::MUTED);
    }

    #[test]
    fn test_styles() {
        let base = Theme::base();
        assert_eq!(base.fg, Some(Theme::FG));
        assert_eq!(base.bg, Some(Theme::BG));

        let panel = Theme::panel();
        assert_eq!(panel.bg, Some(Theme::PANEL_BG));

        assert!(Theme::link().add_modifier.contains(Modifier::UNDERLINED));
    }
}
