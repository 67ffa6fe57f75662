//! Glyphs, styles & other hard-coded presentation settings
use ratatui::style::{Color, Modifier, Style};

/// Width of the rectangle in the center of the terminal window inside which
/// everything is drawn.  The height depends on the size of the arena.
///
/// Cf. [`crate::util::center_rect()`]
pub(crate) const DISPLAY_WIDTH: u16 = 64;

/// Rows of the display used for things other than the arena: the score bar
/// above it and two message lines below it
pub(crate) const DISPLAY_EXTRA_ROWS: u16 = 3;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head once the game is over
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for the arena walls
pub(crate) const WALL_STYLE: Style = Style::new().fg(Color::Rgb(0xEF, 0x5B, 0x3B));

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the "Game Over" message
pub(crate) const GAME_OVER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
