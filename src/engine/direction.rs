use ratatui::layout::Position;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A direction in which the snake can travel
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the position `step` pixels away from `pos` in this direction, or
    /// `None` if that position cannot be represented
    pub fn advance(self, pos: Position, step: u16) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.checked_sub(step)?,
            Direction::Down => y = y.checked_add(step)?,
            Direction::Left => x = x.checked_sub(step)?,
            Direction::Right => x = x.checked_add(step)?,
        }
        Some(Position { x, y })
    }

    /// Return the geometric opposite of this direction
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parse one of the canonical direction tokens `"Up"`, `"Down"`,
    /// `"Left"`, or `"Right"`
    fn from_str(s: &str) -> Result<Direction, ParseDirectionError> {
        match s {
            "Up" => Ok(Direction::Up),
            "Down" => Ok(Direction::Down),
            "Left" => Ok(Direction::Left),
            "Right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unrecognized direction token {0:?}")]
pub struct ParseDirectionError(pub String);
