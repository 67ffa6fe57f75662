use crate::rules;
use rand::Rng;
use ratatui::layout::{Position, Size};
use serde::Deserialize;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Geometry of the playing field.
///
/// All coordinates are in pixels and are multiples of the step size.  The
/// walls lie at `x == 0`, `x == width`, `y == top`, and `y == height`; the
/// snake dies if its head would move onto one of them.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(try_from = "RawArena")]
pub struct Arena {
    width: u16,
    height: u16,
    top: u16,
    step: u16,
}

impl Arena {
    /// Construct a validated arena.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `step` is zero, if any other dimension is not a
    /// multiple of `step`, or if the arena is too small to hold the starting
    /// snake and at least one piece of food.
    pub fn new(width: u16, height: u16, top: u16, step: u16) -> Result<Arena, ArenaError> {
        if step == 0 {
            return Err(ArenaError::ZeroStep);
        }
        for (name, value) in [("width", width), ("height", height), ("top", top)] {
            if value % step != 0 {
                return Err(ArenaError::Misaligned { name, value, step });
            }
        }
        let arena = Arena {
            width,
            height,
            top,
            step,
        };
        if arena.food_columns().is_empty() || arena.food_rows().is_empty() {
            return Err(ArenaError::NoRoomForFood);
        }
        if arena.start_segments().count() < rules::INITIAL_SNAKE_LENGTH
            || arena.start_segments().any(|p| arena.is_wall(p))
        {
            return Err(ArenaError::NoRoomForSnake);
        }
        Ok(arena)
    }

    pub fn width(self) -> u16 {
        self.width
    }

    pub fn height(self) -> u16 {
        self.height
    }

    pub fn top(self) -> u16 {
        self.top
    }

    pub fn step(self) -> u16 {
        self.step
    }

    /// Does `pos` lie on (or beyond) one of the walls?
    pub fn is_wall(self, pos: Position) -> bool {
        pos.x == 0 || pos.x >= self.width || pos.y <= self.top || pos.y >= self.height
    }

    /// Size of the arena in grid cells, walls included
    pub fn grid_size(self) -> Size {
        Size {
            width: (self.width / self.step).saturating_add(1),
            height: (self.height.saturating_sub(self.top) / self.step).saturating_add(1),
        }
    }

    /// Convert a pixel position to the grid cell containing it, relative to
    /// the top-left corner of the walls
    pub fn cell_of(self, pos: Position) -> Position {
        Position {
            x: pos.x / self.step,
            y: pos.y.saturating_sub(self.top) / self.step,
        }
    }

    /// The positions of a newly-created snake, head first
    pub(crate) fn start_segments(self) -> impl Iterator<Item = Position> {
        let behind = rules::INITIAL_DIRECTION.reverse();
        let step = self.step;
        let (cx, cy) = rules::INITIAL_HEAD_CELL;
        let head = cx
            .checked_mul(step)
            .zip(cy.checked_mul(step))
            .map(|(x, y)| Position { x, y });
        std::iter::successors(head, move |&p| behind.advance(p, step))
            .take(rules::INITIAL_SNAKE_LENGTH)
    }

    /// Pick a uniformly random position at which food may be placed.  The
    /// position is not checked against the snake.
    pub(crate) fn random_food_position<R: Rng>(self, rng: &mut R) -> Position {
        let x = rng.random_range(self.food_columns());
        let y = rng.random_range(self.food_rows());
        Position {
            x: x * self.step,
            y: y * self.step,
        }
    }

    /// All positions at which food may be placed
    pub(crate) fn food_positions(self) -> impl Iterator<Item = Position> {
        let step = self.step;
        let rows = self.food_rows();
        self.food_columns().flat_map(move |x| {
            rows.clone().map(move |y| Position {
                x: x * step,
                y: y * step,
            })
        })
    }

    /// Column indices (in units of the step size) on which food may appear
    fn food_columns(self) -> RangeInclusive<u16> {
        1..=(self.width / self.step).saturating_sub(1)
    }

    /// Row indices (in units of the step size) on which food may appear.
    /// Food is never placed in the row immediately below the top wall.
    fn food_rows(self) -> RangeInclusive<u16> {
        (self.top / self.step).saturating_add(2)..=(self.height / self.step).saturating_sub(1)
    }
}

impl Default for Arena {
    fn default() -> Arena {
        Arena {
            width: rules::ARENA_WIDTH,
            height: rules::ARENA_HEIGHT,
            top: rules::ARENA_TOP,
            step: rules::STEP,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawArena {
    width: u16,
    height: u16,
    top: u16,
    step: u16,
}

impl Default for RawArena {
    fn default() -> RawArena {
        RawArena {
            width: rules::ARENA_WIDTH,
            height: rules::ARENA_HEIGHT,
            top: rules::ARENA_TOP,
            step: rules::STEP,
        }
    }
}

impl TryFrom<RawArena> for Arena {
    type Error = ArenaError;

    fn try_from(value: RawArena) -> Result<Arena, ArenaError> {
        Arena::new(value.width, value.height, value.top, value.step)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ArenaError {
    #[error("arena step size must be nonzero")]
    ZeroStep,
    #[error("arena {name} ({value}) is not a multiple of the step size ({step})")]
    Misaligned {
        name: &'static str,
        value: u16,
        step: u16,
    },
    #[error("arena is too small to hold the starting snake")]
    NoRoomForSnake,
    #[error("arena has no room for food")]
    NoRoomForFood,
}
