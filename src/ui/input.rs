use crate::ui::app::{App, PopupKind};
use crate::ui::login::LoginIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const PAGE_STEP: isize = 10;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    if app.show_popup() {
        if matches!(app.popup_kind(), Some(PopupKind::Login)) {
            handle_login_key(app, key);
        }
        return;
    }

    if is_ctrl_char(key, 'l') {
        app.toggle_login();
        return;
    }
    if is_ctrl_char(key, 'o') {
        app.request_sign_out();
        return;
    }
    if is_ctrl_char(key, 'r') {
        app.request_refresh();
        return;
    }

    match key.code {
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-PAGE_STEP),
        KeyCode::PageDown => app.move_selection(PAGE_STEP),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter => {
            app.submit_selected();
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(ch) if is_plain(key) => app.type_char(ch),
        _ => {}
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char(key, 'l') {
        app.toggle_login();
        return;
    }
    match key.code {
        KeyCode::Esc => app.close_login(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.dispatch_login(LoginIntent::SwitchField)
        }
        KeyCode::Enter => {
            app.submit_login();
        }
        KeyCode::Backspace => app.dispatch_login(LoginIntent::Backspace),
        KeyCode::Char(ch) if is_plain(key) => app.dispatch_login(LoginIntent::Type(ch)),
        _ => {}
    }
}

fn is_plain(key: KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
