//! Keyboard shortcut handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// TUI keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Scroll the page viewport.
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    /// Jump to the top or bottom of the page.
    Home,
    End,
    /// Click the tab with this zero-based index.
    SelectTab(usize),
    PrevTab,
    NextTab,
    ToggleLogs,
    None,
}

/// Map a key event to an action.
#[must_use]
pub fn map_key(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(c @ '1'..='9') => KeyAction::SelectTab(c as usize - '1' as usize),
        KeyCode::Char('l') => KeyAction::ToggleLogs,
        KeyCode::Left => KeyAction::PrevTab,
        KeyCode::Right | KeyCode::Tab => KeyAction::NextTab,
        KeyCode::Up => KeyAction::ScrollUp,
        KeyCode::Down => KeyAction::ScrollDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyAction {
        map_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn quit_keys() {
        assert_eq!(key(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(key(KeyCode::Esc), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn digits_select_tabs() {
        assert_eq!(key(KeyCode::Char('1')), KeyAction::SelectTab(0));
        assert_eq!(key(KeyCode::Char('9')), KeyAction::SelectTab(8));
        assert_eq!(key(KeyCode::Char('0')), KeyAction::None);
    }

    #[test]
    fn arrows() {
        assert_eq!(key(KeyCode::Left), KeyAction::PrevTab);
        assert_eq!(key(KeyCode::Right), KeyAction::NextTab);
        assert_eq!(key(KeyCode::Up), KeyAction::ScrollUp);
        assert_eq!(key(KeyCode::Down), KeyAction::ScrollDown);
    }

    #[test]
    fn page_keys() {
        assert_eq!(key(KeyCode::PageUp), KeyAction::PageUp);
        assert_eq!(key(KeyCode::PageDown), KeyAction::PageDown);
        assert_eq!(key(KeyCode::Home), KeyAction::Home);
        assert_eq!(key(KeyCode::End), KeyAction::End);
    }

    #[test]
    fn toggle_and_unknown() {
        assert_eq!(key(KeyCode::Char('l')), KeyAction::ToggleLogs);
        assert_eq!(key(KeyCode::Char('z')), KeyAction::None);
    }
}
