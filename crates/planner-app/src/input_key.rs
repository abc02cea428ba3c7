//! Abstract input key event, independent of terminal library.
//!
//! The TUI converts crossterm key events into `InputKey` at its boundary,
//! so the planner engine and its key handlers never depend on crossterm.

/// Abstract input key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    // Character keys
    /// Regular character key (a-z, 0-9, symbols, space)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+g, Ctrl+c, etc.)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    // Action keys
    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,

    /// Function key (F1-F12)
    F(u8),
}

impl InputKey {
    /// The character this key types into a text field, if any.
    pub fn typed_char(&self) -> Option<char> {
        match self {
            InputKey::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_is_distinct_from_plain() {
        assert_ne!(InputKey::CharCtrl('g'), InputKey::Char('g'));
    }

    #[test]
    fn test_typed_char() {
        assert_eq!(InputKey::Char('a').typed_char(), Some('a'));
        assert_eq!(InputKey::Char(' ').typed_char(), Some(' '));
        assert_eq!(InputKey::CharCtrl('a').typed_char(), None);
        assert_eq!(InputKey::Enter.typed_char(), None);
    }
}
