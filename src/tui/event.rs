//! Keyboard input mapping for the journal screen

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action derived from key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Close the open overlay, or quit when none is open
    Escape,
    /// Focus the next input
    NextField,
    /// Focus the previous input
    PrevField,
    /// Step a select input backwards
    Left,
    /// Step a select input forwards
    Right,
    /// Check a box or radio button
    Activate,
    /// Confirm (next field, or execute on the checklist)
    Confirm,
    /// Delete the last character of a text input
    Backspace,
    /// Typed character
    Input(char),
    /// Save the form as an observation
    Save,
    /// Open the report preview
    Report,
    /// Flip light/dark theme
    ToggleTheme,
    /// Switch between journal and checklist
    ToggleTab,
    /// Show help
    Help,
    /// No action
    None,
}

impl From<KeyEvent> for KeyAction {
    fn from(key: KeyEvent) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => KeyAction::Quit,
            KeyCode::Char('s') if ctrl => KeyAction::Save,
            KeyCode::Char('r') if ctrl => KeyAction::Report,
            KeyCode::Char('t') if ctrl => KeyAction::ToggleTheme,
            KeyCode::F(1) => KeyAction::Help,
            KeyCode::F(2) => KeyAction::ToggleTab,
            KeyCode::Esc => KeyAction::Escape,
            KeyCode::Tab | KeyCode::Down => KeyAction::NextField,
            KeyCode::BackTab | KeyCode::Up => KeyAction::PrevField,
            KeyCode::Left => KeyAction::Left,
            KeyCode::Right => KeyAction::Right,
            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Char(' ') => KeyAction::Activate,
            KeyCode::Char(c) if !ctrl => KeyAction::Input(c),
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(
            KeyAction::from(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            KeyAction::Save
        );
        assert_eq!(
            KeyAction::from(key(KeyCode::Char('t'), KeyModifiers::CONTROL)),
            KeyAction::ToggleTheme
        );
        assert_eq!(
            KeyAction::from(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_plain_characters_are_input() {
        assert_eq!(
            KeyAction::from(key(KeyCode::Char('s'), KeyModifiers::NONE)),
            KeyAction::Input('s')
        );
        assert_eq!(
            KeyAction::from(key(KeyCode::Char('S'), KeyModifiers::SHIFT)),
            KeyAction::Input('S')
        );
        assert_eq!(
            KeyAction::from(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            KeyAction::Activate
        );
    }
}
