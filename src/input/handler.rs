use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Restart,
    Quit,
    None,
}

/// Maps terminal keys to game intents
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Steer(Direction::North),
            KeyCode::Down => KeyAction::Steer(Direction::South),
            KeyCode::Left => KeyAction::Steer(Direction::West),
            KeyCode::Right => KeyAction::Steer(Direction::East),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => KeyAction::Steer(Direction::North),
                's' => KeyAction::Steer(Direction::South),
                'a' => KeyAction::Steer(Direction::West),
                'd' => KeyAction::Steer(Direction::East),
                'q' => KeyAction::Quit,
                'r' => KeyAction::Restart,
                _ => KeyAction::None,
            },

            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), KeyAction::Steer(Direction::North));
        assert_eq!(press(KeyCode::Down), KeyAction::Steer(Direction::South));
        assert_eq!(press(KeyCode::Left), KeyAction::Steer(Direction::West));
        assert_eq!(press(KeyCode::Right), KeyAction::Steer(Direction::East));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(press(KeyCode::Char('w')), KeyAction::Steer(Direction::North));
        assert_eq!(press(KeyCode::Char('a')), KeyAction::Steer(Direction::West));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Steer(Direction::South));
        assert_eq!(press(KeyCode::Char('D')), KeyAction::Steer(Direction::East));
    }

    #[test]
    fn test_controls() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
