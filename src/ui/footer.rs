use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const HINTS: &str = " ↑/↓: Move │ Enter: Submit │ Ctrl+R: Refresh │ Ctrl+Q: Quit";

pub struct Footer<'a> {
    error: Option<&'a str>,
}

impl<'a> Footer<'a> {
    pub fn new(error: Option<&'a str>) -> Self {
        Self { error }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let (left, left_style) = match self.error {
            Some(error) => (format!(" {}", error), Style::default().fg(STATUS_ERROR)),
            None => (HINTS.to_string(), text_style),
        };
        let version = format!("v{} ", VERSION);

        // char count, not bytes: the hints contain box-drawing glyphs
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(left.chars().count())
            .saturating_sub(version.chars().count());

        let line = Line::from(vec![
            Span::styled(left, left_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
