use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameCommand(Command),
    /// Shorten the tick interval by one step
    SpeedUp,
    /// Lengthen the tick interval by one step
    SlowDown,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Self::turn(Direction::Up),
            KeyCode::Down => Self::turn(Direction::Down),
            KeyCode::Left => Self::turn(Direction::Left),
            KeyCode::Right => Self::turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Self::turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Self::turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Self::turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Self::turn(Direction::Right),

            // Session
            KeyCode::Enter => KeyAction::GameCommand(Command::Start),
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::GameCommand(Command::Pause)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::GameCommand(Command::Reset),

            // Speed
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::SpeedUp,
            KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::SlowDown,

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    fn turn(direction: Direction) -> KeyAction {
        KeyAction::GameCommand(Command::Turn(direction))
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

    fn press(handler: &InputHandler, code: KeyCode) -> KeyAction {
        handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Up),
            KeyAction::GameCommand(Command::Turn(Direction::Up))
        );
        assert_eq!(
            press(&handler, KeyCode::Down),
            KeyAction::GameCommand(Command::Turn(Direction::Down))
        );
        assert_eq!(
            press(&handler, KeyCode::Left),
            KeyAction::GameCommand(Command::Turn(Direction::Left))
        );
        assert_eq!(
            press(&handler, KeyCode::Right),
            KeyAction::GameCommand(Command::Turn(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Char('w')),
            KeyAction::GameCommand(Command::Turn(Direction::Up))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('a')),
            KeyAction::GameCommand(Command::Turn(Direction::Left))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('s')),
            KeyAction::GameCommand(Command::Turn(Direction::Down))
        );

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper),
            KeyAction::GameCommand(Command::Turn(Direction::Right))
        );
    }

    #[test]
    fn test_session_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Enter),
            KeyAction::GameCommand(Command::Start)
        );
        assert_eq!(
            press(&handler, KeyCode::Char(' ')),
            KeyAction::GameCommand(Command::Pause)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('p')),
            KeyAction::GameCommand(Command::Pause)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('R')),
            KeyAction::GameCommand(Command::Reset)
        );
    }

    #[test]
    fn test_speed_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('+')), KeyAction::SpeedUp);
        assert_eq!(press(&handler, KeyCode::Char('=')), KeyAction::SpeedUp);
        assert_eq!(press(&handler, KeyCode::Char('-')), KeyAction::SlowDown);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(&handler, KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(press(&handler, KeyCode::Char('x')), KeyAction::None);
    }
}
