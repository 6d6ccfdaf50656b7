//! Key mapping for the hero banner
//!
//! Converts crossterm key events into banner actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Banner action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleTheme,
}

/// Key mapper for converting key events to actions
pub struct KeyMapper;

impl KeyMapper {
    /// Map a crossterm KeyEvent to an action, if it has one
    pub fn map(event: &KeyEvent) -> Option<Action> {
        // Windows reports both press and release
        if event.kind == KeyEventKind::Release {
            return None;
        }

        match event.code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char(_) if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
            KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::ToggleTheme),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key_event(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            key_event(KeyCode::Char('q'), KeyModifiers::NONE),
            key_event(KeyCode::Char('Q'), KeyModifiers::SHIFT),
            key_event(KeyCode::Esc, KeyModifiers::NONE),
            key_event(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(KeyMapper::map(&event), Some(Action::Quit));
        }
    }

    #[test]
    fn test_theme_key() {
        let event = key_event(KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(Action::ToggleTheme));

        // Ctrl+T is not a theme toggle
        let event = key_event(KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map(&event), None);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(KeyMapper::map(&key_event(KeyCode::Char('x'), KeyModifiers::NONE)), None);
        assert_eq!(KeyMapper::map(&key_event(KeyCode::Enter, KeyModifiers::NONE)), None);
        assert_eq!(KeyMapper::map(&key_event(KeyCode::F(1), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_release_ignored() {
        let event = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(KeyMapper::map(&event), None);
    }
}
