//! Centralized keyboard shortcuts.
//!
//! Complete reference:
//!
//! | Action          | Keys                                 |
//! |-----------------|--------------------------------------|
//! | Move focus      | Tab / Shift+Tab                      |
//! | Change setting  | ← →                                  |
//! | Select model    | ↑ ↓                                  |
//! | Activate        | Enter                                |
//! | List models     | Alt+L, Esc+l                         |
//! | Unload model    | Alt+U, Esc+u                         |
//! | Dismiss banner  | Alt+D, Esc+d                         |
//! | Clear API key   | Ctrl+U (in the key field)            |
//! | Quit            | Ctrl+C                               |
//!
//! On macOS, Option+key sends Esc+key when the terminal has "Use option as meta key"
//! enabled; the Esc+key forms cover that case.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// List models (Alt+L, Esc+l)
    List,
    /// Unload the current model (Alt+U, Esc+u)
    Unload,
    /// Dismiss the newest banner (Alt+D, Esc+d)
    Dismiss,
    /// Quit (Ctrl+C)
    Quit,
}

impl Shortcut {
    /// Returns the shortcut if the key matches. Handles Esc+key sequence when terminal
    /// sends Option as Meta (e.g. macOS "Use option as meta key").
    pub fn match_key(key: &KeyEvent, escape_pending: bool) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if escape_pending {
            return Self::from_letter(key.code);
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Shortcut::Quit)
            }
            code if key.modifiers.contains(KeyModifiers::ALT) => Self::from_letter(code),
            _ => None,
        }
    }

    fn from_letter(code: KeyCode) -> Option<Shortcut> {
        match code {
            KeyCode::Char('l') => Some(Shortcut::List),
            KeyCode::Char('u') => Some(Shortcut::Unload),
            KeyCode::Char('d') => Some(Shortcut::Dismiss),
            _ => None,
        }
    }

    /// True if key is Escape (start of Option+key sequence on some terminals).
    pub fn is_escape(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press && key.code == KeyCode::Esc
    }
}

#[cfg(test)]
mod tests {
    use super::Shortcut;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn is_escape() {
        assert!(Shortcut::is_escape(&key(KeyCode::Esc, KeyModifiers::empty())));
        assert!(!Shortcut::is_escape(&key(
            KeyCode::Char('c'),
            KeyModifiers::empty()
        )));
    }

    #[test]
    fn match_quit_ctrl_c() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL), false),
            Some(Shortcut::Quit)
        );
    }

    #[test]
    fn match_alt_letters() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('l'), KeyModifiers::ALT), false),
            Some(Shortcut::List)
        );
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('u'), KeyModifiers::ALT), false),
            Some(Shortcut::Unload)
        );
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('d'), KeyModifiers::ALT), false),
            Some(Shortcut::Dismiss)
        );
    }

    #[test]
    fn match_escape_pending_letter() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('l'), KeyModifiers::empty()), true),
            Some(Shortcut::List)
        );
    }

    #[test]
    fn plain_letters_are_not_shortcuts() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('l'), KeyModifiers::empty()), false),
            None
        );
    }

    #[test]
    fn match_key_release_ignored() {
        let key_release = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Release,
            state: KeyEventState::empty(),
        };
        assert_eq!(Shortcut::match_key(&key_release, false), None);
    }
}

/// Labels for the bottom bar.
pub mod labels {
    use ratatui::style::Color;
    use ratatui::text::{Line, Span, Text};

    use super::super::view::Focus;

    const DIM: Color = Color::DarkGray;

    pub fn bottom_bar(focus: Focus) -> Text<'static> {
        let context = match focus {
            Focus::Credential => vec![
                Span::styled("Enter ", DIM),
                Span::raw("list"),
                Span::styled("  Ctrl+U ", DIM),
                Span::raw("clear"),
            ],
            Focus::ContextSize | Focus::CacheMode => {
                vec![Span::styled("← → ", DIM), Span::raw("change")]
            }
            Focus::ListButton | Focus::UnloadButton => {
                vec![Span::styled("Enter ", DIM), Span::raw("press")]
            }
            Focus::Models => vec![
                Span::styled("↑↓ ", DIM),
                Span::raw("select"),
                Span::styled("  Enter ", DIM),
                Span::raw("load"),
            ],
        };
        let mut spans = context;
        spans.extend([
            Span::styled("  Tab ", DIM),
            Span::raw("focus"),
            Span::styled("  Alt+L ", DIM),
            Span::raw("list"),
            Span::styled("  Alt+U ", DIM),
            Span::raw("unload"),
            Span::styled("  Alt+D ", DIM),
            Span::raw("dismiss"),
            Span::styled("  Ctrl+C ", DIM),
            Span::raw("quit"),
        ]);
        Text::from(Line::from(spans))
    }
}
