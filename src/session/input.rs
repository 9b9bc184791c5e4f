use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A keystroke as the typing session sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Other,
}

impl From<KeyEvent> for KeyInput {
    fn from(key: KeyEvent) -> Self {
        let chorded = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);
        match key.code {
            KeyCode::Backspace => KeyInput::Backspace,
            KeyCode::Char(ch) if !chorded && !ch.is_control() => KeyInput::Char(ch),
            _ => KeyInput::Other,
        }
    }
}
