//! Keybindings and help text for the resume form

use crate::input::Edit;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct KeyMap;

impl KeyMap {
    /// Help text for all keybindings
    pub fn help_text() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Tab/S-Tab", "Next/previous field"),
            ("Enter", "Press button / new line"),
            ("Ctrl-A", "Add education"),
            ("Ctrl-G", "Generate resume"),
            ("Ctrl-L", "Clear education"),
            ("Esc", "Close dialog"),
            ("Ctrl-Q", "Quit"),
        ]
    }

    fn ctrl(code: KeyCode, modifiers: KeyModifiers, c: char) -> bool {
        code == KeyCode::Char(c) && modifiers.contains(KeyModifiers::CONTROL)
    }

    pub fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
        Self::ctrl(code, modifiers, 'q') || Self::ctrl(code, modifiers, 'c')
    }

    pub fn is_add_education(code: KeyCode, modifiers: KeyModifiers) -> bool {
        Self::ctrl(code, modifiers, 'a')
    }

    pub fn is_generate(code: KeyCode, modifiers: KeyModifiers) -> bool {
        Self::ctrl(code, modifiers, 'g')
    }

    pub fn is_clear_education(code: KeyCode, modifiers: KeyModifiers) -> bool {
        Self::ctrl(code, modifiers, 'l')
    }

    /// Move focus forward; arrows only leave single-line fields
    pub fn is_next(code: KeyCode, multiline: bool) -> bool {
        matches!(code, KeyCode::Tab) || (!multiline && matches!(code, KeyCode::Down))
    }

    pub fn is_prev(code: KeyCode, multiline: bool) -> bool {
        matches!(code, KeyCode::BackTab) || (!multiline && matches!(code, KeyCode::Up))
    }

    /// Enter or Esc close a dialog
    pub fn is_dismiss(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter | KeyCode::Esc)
    }

    pub fn is_press(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter | KeyCode::Char(' '))
    }

    /// Text edit for a key in a field, if any
    pub fn edit(code: KeyCode, modifiers: KeyModifiers, multiline: bool) -> Option<Edit> {
        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match code {
            KeyCode::Char(c) => Some(Edit::Insert(c)),
            KeyCode::Enter if multiline => Some(Edit::Newline),
            KeyCode::Backspace => Some(Edit::Backspace),
            KeyCode::Delete => Some(Edit::Delete),
            KeyCode::Left => Some(Edit::Left),
            KeyCode::Right => Some(Edit::Right),
            KeyCode::Home => Some(Edit::Home),
            KeyCode::End => Some(Edit::End),
            _ => None,
        }
    }
}
