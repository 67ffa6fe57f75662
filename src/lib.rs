//! Game-state engine for a classic pixel-grid snake game.
//!
//! A [`GameEngine`] owns the snake, the food, the score, and the speed.  A
//! host program drives it by calling [`GameEngine::tick()`] every
//! [`GameEngine::tick_period()`] and [`GameEngine::set_direction()`] whenever
//! the player asks to turn; renderers read the state back through the
//! engine's accessors.
mod engine;
pub mod rules;
pub use crate::engine::{
    Arena, ArenaError, Direction, Ending, GameEngine, GameState, ParseDirectionError, Rejected,
    RejectionKind, Tick,
};
