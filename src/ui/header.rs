use crate::model::User;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, MUTED_TEXT, STATUS_OK};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header<'a> {
    user: Option<&'a User>,
}

impl<'a> Header<'a> {
    pub fn new(user: Option<&'a User>) -> Self {
        Self { user }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let muted_style = Style::default().fg(MUTED_TEXT);

        let mut spans = vec![Span::styled("  Blogs", text_style)];
        spans.push(Span::styled("  │  ", separator_style));
        match self.user {
            Some(user) => {
                spans.push(Span::styled("●", Style::default().fg(STATUS_OK)));
                spans.push(Span::styled(
                    format!(" Logged in as {}", user.display_name()),
                    text_style,
                ));
                spans.push(Span::styled("  │  ", separator_style));
                spans.push(Span::styled("Ctrl+O: Sign out", muted_style));
            }
            None => {
                spans.push(Span::styled("○ Guest", muted_style));
                spans.push(Span::styled("  │  ", separator_style));
                spans.push(Span::styled("Ctrl+L: Sign in", muted_style));
            }
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
