//! Keys for the focused widget (when no shortcut matched).

use crossterm::event::{KeyCode, KeyModifiers};

use super::super::view::{Focus, PanelView};

pub(super) fn handle_focused_input(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    view: &mut PanelView,
) {
    match key_code {
        KeyCode::Tab => return view.focus_next(),
        KeyCode::BackTab => return view.focus_prev(),
        _ => {}
    }

    match view.focus {
        Focus::Credential => match (key_code, key_modifiers) {
            (KeyCode::Enter, _) => view.emit_list_requested(),
            (KeyCode::Backspace, _) => view.pop_credential_char(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => view.clear_credential(),
            (KeyCode::Char(c), mods) => {
                // Ignore Ctrl/Alt+key: user likely intended a shortcut
                if !mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                    view.push_credential_char(c);
                }
            }
            _ => {}
        },
        Focus::ContextSize => match key_code {
            KeyCode::Right | KeyCode::Enter => view.cycle_context_size(true),
            KeyCode::Left => view.cycle_context_size(false),
            _ => {}
        },
        Focus::CacheMode => match key_code {
            KeyCode::Right | KeyCode::Enter => view.cycle_cache_mode(true),
            KeyCode::Left => view.cycle_cache_mode(false),
            _ => {}
        },
        Focus::ListButton => {
            if matches!(key_code, KeyCode::Enter | KeyCode::Char(' ')) {
                view.emit_list_requested();
            }
        }
        Focus::UnloadButton => {
            if matches!(key_code, KeyCode::Enter | KeyCode::Char(' ')) {
                view.emit_unload_requested();
            }
        }
        Focus::Models => match key_code {
            KeyCode::Up => view.select_prev_model(),
            KeyCode::Down => view.select_next_model(),
            KeyCode::Enter => view.activate_selected_model(),
            _ => {}
        },
    }
}
