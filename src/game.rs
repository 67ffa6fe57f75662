use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use pixsnake::{Arena, Direction, GameEngine, Tick};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::io;
use std::time::Instant;

/// The game screen: drives a [`GameEngine`] from the terminal's clock &
/// keyboard and draws it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    engine: GameEngine<R>,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(arena: Arena) -> Self {
        Game::with_rng(arena, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn with_rng(arena: Arena, rng: R) -> Game<R> {
        Game {
            engine: GameEngine::with_rng(arena, rng),
            next_tick: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.engine.is_game_over() {
            return Ok(self.handle_event(read()?));
        }
        // The speed may have changed on the last tick, so the period is
        // re-read each time a tick is scheduled.
        let when = *self
            .next_tick
            .get_or_insert_with(|| Instant::now() + self.engine.tick_period());
        let wait = when.saturating_duration_since(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            self.advance();
            self.next_tick = None;
            Ok(None)
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn advance(&mut self) {
        match self.engine.tick() {
            Ok(Tick::Ate { sped_up: true, .. }) => {
                log::debug!("Tick period is now {:?}", self.engine.tick_period());
            }
            Ok(Tick::Over(ending)) => {
                log::info!("Final score: {} ({ending})", self.engine.score());
            }
            Ok(_) => (),
            Err(e) => log::debug!("Ignoring tick ({}): {e}", e.kind()),
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if self.engine.is_game_over() {
            match cmd {
                Command::R => return Some(Screen::Game(Game::new(self.engine.arena()))),
                Command::Quit | Command::Q | Command::Enter => return Some(Screen::Quit),
                _ => (),
            }
        } else if cmd == Command::Quit {
            return Some(Screen::Quit);
        } else if let Some(direction) = cmd.direction() {
            if let Err(e) = self.engine.set_direction(direction) {
                log::debug!("Ignoring input ({}): {e}", e.kind());
            }
        }
        None
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let engine = &self.engine;
        let arena = engine.arena();
        let grid = arena.grid_size();
        let display = get_display_area(area, grid);
        let [score_area, arena_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Score: {} (Speed: {})", engine.score(), engine.speed()),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        // The border of the block is drawn along the walls.
        let block_area = center_rect(arena_area, grid);
        Block::bordered()
            .border_style(consts::WALL_STYLE)
            .render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area,
            buf,
        };
        for &p in engine.snake().iter().skip(1) {
            canvas.draw_cell(
                arena.cell_of(p),
                consts::SNAKE_BODY_SYMBOL,
                consts::SNAKE_STYLE,
            );
        }
        if let Some(food) = engine.food() {
            canvas.draw_cell(arena.cell_of(food), consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        if let Some(head) = engine.head() {
            if engine.is_game_over() {
                canvas.draw_cell(
                    arena.cell_of(head),
                    consts::COLLISION_SYMBOL,
                    consts::COLLISION_STYLE,
                );
            } else {
                canvas.draw_cell(
                    arena.cell_of(head),
                    head_symbol(engine.direction()),
                    consts::SNAKE_STYLE,
                );
            }
        }

        if engine.is_game_over() {
            Line::styled(
                format!(" Game Over! You scored {}", engine.score()),
                consts::GAME_OVER_STYLE,
            )
            .render(msg1_area, buf);
            Line::from_iter([
                Span::raw(" Restart ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(msg2_area, buf);
        }
    }
}

/// Return the glyph to use for drawing the snake's head
fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
    }
}

/// A view of a buffer in which positions are grid cells relative to the
/// top-left corner of the arena walls
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if !self.area.contains(Position { x, y }) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
