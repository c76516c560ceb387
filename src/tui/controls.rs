//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// While a field is being edited, keys feed the edit buffer; otherwise they
/// navigate and switch presets. Guards on [`KeyEventKind::Press`] to avoid
/// double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }

    if app.editing.is_some() {
        match key.code {
            KeyCode::Enter | KeyCode::Tab => app.commit_edit(),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => app.pop_char(),
            KeyCode::Char(c) => app.push_char(c),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Enter | KeyCode::Char('e') => app.begin_edit(),
        KeyCode::Char('1') => app.switch_preset("default"),
        KeyCode::Char('2') => app.switch_preset("high_price"),
        KeyCode::Char('3') => app.switch_preset("small_install"),
        KeyCode::Char('r') => app.reset(),
        _ => {}
    }
}
