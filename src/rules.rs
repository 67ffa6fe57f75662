//! Fixed rules of the game & the default arena geometry
use crate::engine::Direction;

/// Distance, in pixels, that the snake moves on each tick
pub const STEP: u16 = 20;

/// Horizontal extent of the arena; `x == ARENA_WIDTH` is the right-hand wall
pub const ARENA_WIDTH: u16 = 600;

/// Vertical extent of the arena; `y == ARENA_HEIGHT` is the bottom wall
pub const ARENA_HEIGHT: u16 = 620;

/// `y` coordinate of the top wall.  The strip above it holds the score bar.
pub const ARENA_TOP: u16 = 20;

/// Moves per second at the start of a game
pub const BASE_SPEED: u32 = 10;

/// The speed increases by one every time the score reaches a multiple of this
pub const SPEED_UP_EVERY: u32 = 5;

/// Number of segments in a newly-created snake
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Grid cell (in units of the step size) of a new snake's head
pub const INITIAL_HEAD_CELL: (u16, u16) = (5, 5);

/// Direction a new snake is facing.  Its body trails out behind it.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// How many random positions to try when placing food before falling back to
/// picking from the list of free cells
pub const FOOD_SAMPLE_ATTEMPTS: usize = 64;
