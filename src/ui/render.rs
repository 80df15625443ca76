use crate::ui::app::{App, PopupKind};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect_by_size, layout_regions, scroll_offset};
use crate::ui::login::{LoginDialogState, LoginField};
use crate::ui::theme::{
    ACCENT, FORM_LABEL, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, SELECTED_ROW, STATUS_ERROR,
};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const LOGIN_POPUP_WIDTH: u16 = 48;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(Header::new(app.user()).widget(), header);
    draw_page(frame, app, body);
    frame.render_widget(Footer::new(app.last_command_error()).widget(footer), footer);

    if app.popup_kind() == Some(PopupKind::Login) {
        draw_login(frame, app.login(), body);
    }
}

fn draw_page(frame: &mut Frame<'_>, app: &App, area: Rect) {
    frame.render_widget(Clear, area);
    let rows = app.rows();
    let selected = app.selected_index();
    let lines: Vec<Line<'static>> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| row.to_line(app.forms(), index == selected))
        .collect();

    let offset = scroll_offset(selected, area.height);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn draw_login(frame: &mut Frame<'_>, state: &LoginDialogState, body: Rect) {
    let LoginDialogState::Visible {
        username,
        password,
        focused,
        pending,
        error,
    } = state
    else {
        return;
    };

    let field = |label: &'static str, value: String, active: bool| {
        let style = if active {
            Style::default().fg(HEADER_TEXT).bg(SELECTED_ROW)
        } else {
            Style::default().fg(HEADER_TEXT)
        };
        let cursor = if active && !pending { "▏" } else { "" };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), Style::default().fg(FORM_LABEL)),
            Span::styled(format!("{}{}", value, cursor), style),
        ])
    };

    let mut lines = vec![
        field("Username", username.clone(), *focused == LoginField::Username),
        field(
            "Password",
            "•".repeat(password.chars().count()),
            *focused == LoginField::Password,
        ),
        Line::from(""),
    ];
    if *pending {
        lines.push(Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(MUTED_TEXT),
        )));
    } else if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(STATUS_ERROR),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Tab: Switch  Enter: Sign in  Esc: Close",
        Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM),
    )));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_rect_by_size(body, LOGIN_POPUP_WIDTH, height);
    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled("Sign in", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(popup), area);
}
