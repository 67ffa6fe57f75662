use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pixsnake::Direction;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    R,
    Q,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        }
        if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'k' | '8') | KeyCode::Up => Some(Command::Up),
            KeyCode::Char('s' | 'j' | '2') | KeyCode::Down => Some(Command::Down),
            KeyCode::Char('a' | 'h' | '4') | KeyCode::Left => Some(Command::Left),
            KeyCode::Char('d' | 'l' | '6') | KeyCode::Right => Some(Command::Right),
            KeyCode::Enter => Some(Command::Enter),
            KeyCode::Char('r') => Some(Command::R),
            KeyCode::Char('q') => Some(Command::Q),
            _ => None,
        }
    }

    /// The direction that the snake should turn in response to this command,
    /// if any
    pub(crate) fn direction(self) -> Option<Direction> {
        match self {
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            _ => None,
        }
    }
}
