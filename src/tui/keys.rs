//! Key bindings for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Focus};
use crate::form::Field;

/// Processes a single key event, returning `false` when the loop should exit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return true;
    }

    if app.confirm.is_some() {
        return handle_confirm(app, key);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        match key.code {
            KeyCode::Char('c') => return !app.request_quit(),
            KeyCode::Char('s') => {
                app.apply();
                return true;
            }
            KeyCode::Char('w') => {
                // The outcome is shown on the status line.
                let _ = app.editor.save();
                return true;
            }
            _ => {}
        }
    }

    match app.focus {
        Focus::Sidebar => handle_sidebar(app, key),
        Focus::Form => handle_form(app, key),
    }
    true
}

fn handle_confirm(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => !app.answer_confirm(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => !app.answer_confirm(false),
        _ => true,
    }
}

fn handle_sidebar(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Up if ctrl => app.move_selected_up(),
        KeyCode::Down if ctrl => app.move_selected_down(),
        KeyCode::Char('K') => app.move_selected_up(),
        KeyCode::Char('J') => app.move_selected_down(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char(' ') => app.toggle_mark_selected(),
        KeyCode::Char('a') => app.editor.toggle_mark_all(),
        KeyCode::Char('n') => app.begin_new(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Enter | KeyCode::Tab => app.focus_form(),
        _ => {}
    }
}

fn handle_form(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.focus_sidebar(),
        KeyCode::Char('v') if ctrl => app.show_api_key = !app.show_api_key,
        KeyCode::Char('u') if ctrl => app.editor.form.clear_field(app.field),
        KeyCode::BackTab if app.field == Field::DisplayName => app.focus = Focus::Sidebar,
        KeyCode::BackTab | KeyCode::Up => app.prev_field(),
        KeyCode::Tab | KeyCode::Down | KeyCode::Enter => app.next_field(),
        _ if app.field == Field::Provider => handle_provider(app, key),
        KeyCode::Backspace => app.editor.form.pop_char(app.field),
        KeyCode::Char(c) if !ctrl => {
            app.editor.form.push_char(app.field, c);
        }
        _ => {}
    }
}

fn handle_provider(app: &mut App, key: KeyEvent) {
    let form = &mut app.editor.form;
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => form.provider = form.provider.prev(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            form.provider = form.provider.next()
        }
        KeyCode::Char('k') => app.field = app.field.prev(),
        KeyCode::Char('j') => app.field = app.field.next(),
        _ => {}
    }
}
