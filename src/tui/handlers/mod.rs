//! Key bindings for the panel: shortcuts first, then the focused widget.

mod input;

use crossterm::event::{KeyEvent, KeyEventKind};

use super::shortcuts::Shortcut;
use super::view::PanelView;

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(key: KeyEvent, view: &mut PanelView) -> HandleResult {
    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    // Esc+key sequence (Option as Meta on Mac terminals)
    if view.escape_pending {
        view.escape_pending = false;
        if let Some(shortcut) = Shortcut::match_key(&key, true) {
            return handle_shortcut(shortcut, view);
        }
    }

    if let Some(shortcut) = Shortcut::match_key(&key, false) {
        return handle_shortcut(shortcut, view);
    }

    if Shortcut::is_escape(&key) {
        view.escape_pending = true;
        return HandleResult::Continue;
    }

    input::handle_focused_input(key.code, key.modifiers, view);
    HandleResult::Continue
}

fn handle_shortcut(shortcut: Shortcut, view: &mut PanelView) -> HandleResult {
    match shortcut {
        Shortcut::Quit => return HandleResult::Break,
        Shortcut::List => view.emit_list_requested(),
        Shortcut::Unload => view.emit_unload_requested(),
        Shortcut::Dismiss => view.dismiss_latest_banner(),
    }
    HandleResult::Continue
}
