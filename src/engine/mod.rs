mod arena;
mod direction;
mod snake;
pub use self::arena::{Arena, ArenaError};
pub use self::direction::{Direction, ParseDirectionError};
use self::snake::Snake;
use crate::rules;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;

/// The state of a game of snake and the rules for advancing it.
///
/// The engine does no timing of its own: the host calls [`GameEngine::tick()`]
/// once every [`GameEngine::tick_period()`] and calls
/// [`GameEngine::set_direction()`] whenever the player asks to turn.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameEngine<R = rand::rngs::ThreadRng> {
    rng: R,
    arena: Arena,
    snake: Snake,
    direction: Direction,
    food: Option<Position>,
    score: u32,
    speed: u32,
    state: GameState,
}

impl GameEngine<rand::rngs::ThreadRng> {
    pub fn new(arena: Arena) -> Self {
        GameEngine::with_rng(arena, rand::rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Start a new game in `arena`, using `rng` to place food
    pub fn with_rng(arena: Arena, rng: R) -> GameEngine<R> {
        let mut engine = GameEngine {
            rng,
            arena,
            snake: arena.start_segments().collect(),
            direction: rules::INITIAL_DIRECTION,
            food: None,
            score: 0,
            speed: rules::BASE_SPEED,
            state: GameState::Running,
        };
        engine.place_food();
        engine
    }

    /// Advance the game by one step.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected::GameOver`] without changing anything if the game
    /// has already ended.
    pub fn tick(&mut self) -> Result<Tick, Rejected> {
        if self.is_game_over() {
            return Err(Rejected::GameOver);
        }
        let next = self
            .snake
            .head()
            .and_then(|head| self.direction.advance(head, self.arena.step()))
            .filter(|&pos| !self.arena.is_wall(pos));
        let Some(next) = next else {
            return Ok(self.end(Ending::Wall));
        };
        if self.snake.bites(next) {
            return Ok(self.end(Ending::SelfCollision));
        }
        if Some(next) == self.food {
            self.snake.grow(next);
            self.score += 1;
            let sped_up = self.score % rules::SPEED_UP_EVERY == 0;
            if sped_up {
                self.speed += 1;
                log::info!("Score reached {}; speed is now {}", self.score, self.speed);
            } else {
                log::info!("Food eaten; score is now {}", self.score);
            }
            self.place_food();
            if let GameState::Over(ending) = self.state {
                return Ok(Tick::Over(ending));
            }
            Ok(Tick::Ate {
                score: self.score,
                sped_up,
            })
        } else {
            self.snake.slide(next);
            Ok(Tick::Moved)
        }
    }

    /// Put the food at a random free position.  If there are no free
    /// positions left, the game ends.
    fn place_food(&mut self) {
        let arena = self.arena;
        let mut food = std::iter::repeat_with(|| arena.random_food_position(&mut self.rng))
            .take(rules::FOOD_SAMPLE_ATTEMPTS)
            .find(|&pos| !self.snake.contains(pos));
        if food.is_none() {
            food = arena
                .food_positions()
                .filter(|&pos| !self.snake.contains(pos))
                .choose(&mut self.rng);
        }
        self.food = food;
        if food.is_none() {
            let _ = self.end(Ending::Exhausted);
        }
    }
}

impl<R> GameEngine<R> {
    /// Turn the snake to face `direction` at the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected::Reversal`] if `direction` is the opposite of the
    /// current direction, or [`Rejected::GameOver`] if the game has ended.
    /// In both cases the direction is left unchanged.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), Rejected> {
        if self.is_game_over() {
            return Err(Rejected::GameOver);
        }
        if direction == self.direction.reverse() {
            return Err(Rejected::Reversal {
                current: self.direction,
                requested: direction,
            });
        }
        self.direction = direction;
        Ok(())
    }

    /// Like [`GameEngine::set_direction()`], but takes one of the direction
    /// tokens `"Up"`, `"Down"`, `"Left"`, or `"Right"`.
    ///
    /// # Errors
    ///
    /// In addition to the errors returned by `set_direction()`, returns
    /// [`Rejected::UnknownDirection`] if `token` is not a direction token.
    pub fn request_direction(&mut self, token: &str) -> Result<(), Rejected> {
        if self.is_game_over() {
            return Err(Rejected::GameOver);
        }
        let direction = token
            .parse::<Direction>()
            .map_err(|e| Rejected::UnknownDirection(e.0))?;
        self.set_direction(direction)
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    /// Return the positions of the snake's segments, head first
    pub fn snake(&self) -> &VecDeque<Position> {
        self.snake.body()
    }

    pub fn head(&self) -> Option<Position> {
        self.snake.head()
    }

    /// Return the position of the food.  This is only `None` if the snake has
    /// filled every cell that food can be placed in.
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Return the current speed in moves per second
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Return the time that should elapse between ticks at the current speed
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed.max(1)))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, GameState::Over(_))
    }

    fn end(&mut self, ending: Ending) -> Tick {
        log::info!(
            "Game over ({ending}) with score {} at speed {}",
            self.score,
            self.speed
        );
        self.state = GameState::Over(ending);
        Tick::Over(ending)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GameState {
    Running,
    Over(Ending),
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Ending {
    /// The snake ran into a wall
    Wall,
    /// The snake ran into its own body
    SelfCollision,
    /// The snake has filled the arena and there are no more spaces to place
    /// food in.
    Exhausted,
}

impl Ending {
    pub fn as_str(self) -> &'static str {
        match self {
            Ending::Wall => "hit a wall",
            Ending::SelfCollision => "hit itself",
            Ending::Exhausted => "arena full",
        }
    }
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// What happened during a call to [`GameEngine::tick()`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Tick {
    /// The snake moved forwards without eating
    Moved,
    /// The snake ate the food and grew
    Ate { score: u32, sped_up: bool },
    /// The game ended on this tick
    Over(Ending),
}

/// An operation that the engine refused to carry out.  Rejections never
/// change the game state.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Rejected {
    #[error("unrecognized direction token {0:?}")]
    UnknownDirection(String),
    #[error("cannot turn {requested} while heading {current}")]
    Reversal {
        current: Direction,
        requested: Direction,
    },
    #[error("the game is already over")]
    GameOver,
}

impl Rejected {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejected::UnknownDirection(_) | Rejected::Reversal { .. } => {
                RejectionKind::InvalidInputIgnored
            }
            Rejected::GameOver => RejectionKind::InvalidOperation,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RejectionKind {
    /// Bad or disallowed input from the player
    InvalidInputIgnored,
    /// An operation attempted after the game ended
    InvalidOperation,
}

impl RejectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionKind::InvalidInputIgnored => "invalid input ignored",
            RejectionKind::InvalidOperation => "invalid operation",
        }
    }
}

impl std::fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_engine() -> GameEngine<ChaCha12Rng> {
        GameEngine::with_rng(Arena::default(), ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    /// Create an engine in the default arena with the given snake & direction
    /// and with the food out of the way
    fn engine_with(body: &[(u16, u16)], direction: Direction) -> GameEngine<ChaCha12Rng> {
        let mut engine = new_engine();
        engine.snake = body.iter().map(|&(x, y)| Position::new(x, y)).collect();
        engine.direction = direction;
        engine.food = Some(Position::new(500, 500));
        engine
    }

    fn positions(body: &[(u16, u16)]) -> VecDeque<Position> {
        body.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    /// Place the food directly in front of the snake's head
    fn food_ahead(engine: &mut GameEngine<ChaCha12Rng>) {
        engine.food = engine
            .head()
            .and_then(|h| engine.direction.advance(h, engine.arena.step()));
    }

    #[test]
    fn new_game() {
        let engine = new_engine();
        assert_eq!(
            engine.snake(),
            &positions(&[(100, 100), (80, 100), (60, 100)])
        );
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.speed(), rules::BASE_SPEED);
        assert_eq!(engine.tick_period(), Duration::from_millis(100));
        assert_eq!(engine.state(), GameState::Running);
        let food = engine.food().unwrap();
        assert!(!engine.snake.contains(food));
        assert!(!engine.arena().is_wall(food));
    }

    #[test]
    fn first_tick_moves_right() {
        let mut engine = engine_with(&[(100, 100), (80, 100), (60, 100)], Direction::Right);
        assert_eq!(engine.tick(), Ok(Tick::Moved));
        assert_eq!(
            engine.snake(),
            &positions(&[(120, 100), (100, 100), (80, 100)])
        );
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.food(), Some(Position::new(500, 500)));
        assert_eq!(engine.state(), GameState::Running);
    }

    #[rstest]
    #[case(Direction::Up, Direction::Down)]
    #[case(Direction::Down, Direction::Up)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Right, Direction::Left)]
    fn no_instant_reversal(#[case] current: Direction, #[case] requested: Direction) {
        let mut engine = engine_with(&[(300, 300), (300, 320), (300, 340)], current);
        let before = engine.clone();
        let r = engine.set_direction(requested);
        assert_eq!(r, Err(Rejected::Reversal { current, requested }));
        assert_eq!(r.unwrap_err().kind(), RejectionKind::InvalidInputIgnored);
        assert_eq!(engine, before);
    }

    #[test]
    fn reversal_while_heading_left() {
        let mut engine = engine_with(&[(100, 100), (120, 100), (140, 100)], Direction::Left);
        assert!(engine.set_direction(Direction::Right).is_err());
        assert_eq!(engine.direction(), Direction::Left);
        assert_eq!(
            engine.request_direction("Right").map_err(|e| e.kind()),
            Err(RejectionKind::InvalidInputIgnored)
        );
        assert_eq!(engine.direction(), Direction::Left);
    }

    #[test]
    fn latest_direction_wins() {
        let mut engine = engine_with(&[(100, 100), (80, 100), (60, 100)], Direction::Right);
        assert_eq!(engine.set_direction(Direction::Up), Ok(()));
        assert_eq!(engine.set_direction(Direction::Right), Ok(()));
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.set_direction(Direction::Down), Ok(()));
        assert_eq!(
            engine.set_direction(Direction::Up),
            Err(Rejected::Reversal {
                current: Direction::Down,
                requested: Direction::Up
            })
        );
        assert_eq!(engine.tick(), Ok(Tick::Moved));
        assert_eq!(engine.head(), Some(Position::new(100, 120)));
    }

    #[rstest]
    #[case("Up", Ok(Direction::Up))]
    #[case("Down", Ok(Direction::Down))]
    #[case("Right", Ok(Direction::Right))]
    #[case("Left", Err(Rejected::Reversal { current: Direction::Right, requested: Direction::Left }))]
    #[case("space", Err(Rejected::UnknownDirection(String::from("space"))))]
    #[case("up", Err(Rejected::UnknownDirection(String::from("up"))))]
    fn request_direction(#[case] token: &str, #[case] r: Result<Direction, Rejected>) {
        let mut engine = new_engine();
        let before = engine.clone();
        match r {
            Ok(d) => {
                assert_eq!(engine.request_direction(token), Ok(()));
                assert_eq!(engine.direction(), d);
            }
            Err(e) => {
                assert_eq!(engine.request_direction(token), Err(e));
                assert_eq!(engine, before);
            }
        }
    }

    #[test]
    fn eat_food() {
        let mut engine = engine_with(&[(100, 100), (80, 100), (60, 100)], Direction::Right);
        engine.food = Some(Position::new(120, 100));
        assert_eq!(
            engine.tick(),
            Ok(Tick::Ate {
                score: 1,
                sped_up: false
            })
        );
        assert_eq!(
            engine.snake(),
            &positions(&[(120, 100), (100, 100), (80, 100), (60, 100)])
        );
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.speed(), rules::BASE_SPEED);
        let food = engine.food().unwrap();
        assert!(!engine.snake().contains(&food));
        assert!(!engine.arena().is_wall(food));
        assert_eq!(engine.state(), GameState::Running);
    }

    #[test]
    fn growth_then_move() {
        let mut engine = engine_with(&[(100, 100), (80, 100), (60, 100)], Direction::Right);
        engine.food = Some(Position::new(120, 100));
        assert!(matches!(engine.tick(), Ok(Tick::Ate { .. })));
        engine.food = Some(Position::new(500, 500));
        assert_eq!(engine.tick(), Ok(Tick::Moved));
        assert_eq!(
            engine.snake(),
            &positions(&[(140, 100), (120, 100), (100, 100), (80, 100)])
        );
    }

    #[test]
    fn speed_up_on_fifth_food() {
        let mut engine = engine_with(&[(100, 100), (80, 100), (60, 100)], Direction::Right);
        engine.score = 4;
        food_ahead(&mut engine);
        assert_eq!(
            engine.tick(),
            Ok(Tick::Ate {
                score: 5,
                sped_up: true
            })
        );
        assert_eq!(engine.speed(), rules::BASE_SPEED + 1);
        assert_eq!(engine.tick_period(), Duration::from_millis(90));
    }

    #[test]
    fn speed_ramp() {
        let mut engine = engine_with(&[(100, 100), (80, 100), (60, 100)], Direction::Right);
        let mut last_speed = engine.speed();
        for i in 1..=12u32 {
            let len = engine.snake().len();
            food_ahead(&mut engine);
            let Ok(Tick::Ate { score, sped_up }) = engine.tick() else {
                panic!("snake should have eaten on tick {i}");
            };
            assert_eq!(score, i);
            assert_eq!(engine.snake().len(), len + 1);
            assert_eq!(sped_up, i % 5 == 0);
            assert_eq!(engine.speed(), rules::BASE_SPEED + i / 5);
            assert!(engine.speed() >= last_speed);
            last_speed = engine.speed();
            let food = engine.food().unwrap();
            assert!(!engine.snake().contains(&food));
        }
        assert_eq!(engine.head(), Some(Position::new(340, 100)));
    }

    #[test]
    fn food_never_on_snake() {
        let mut engine = new_engine();
        engine.snake = engine
            .arena()
            .food_positions()
            .filter(|p| p.y <= 500)
            .collect();
        for _ in 0..100 {
            engine.place_food();
            let food = engine.food().unwrap();
            assert!(food.y > 500);
            assert!(!engine.snake.contains(food));
        }
    }

    #[test]
    fn food_in_last_free_cell() {
        let arena = Arena::new(140, 160, 20, 20).unwrap();
        let mut engine = GameEngine::with_rng(arena, ChaCha12Rng::seed_from_u64(RNG_SEED));
        let free = Position::new(60, 100);
        engine.snake = arena.food_positions().filter(|&p| p != free).collect();
        engine.place_food();
        assert_eq!(engine.food(), Some(free));
        assert_eq!(engine.state(), GameState::Running);
    }

    #[test]
    fn no_room_for_food() {
        let arena = Arena::new(140, 160, 20, 20).unwrap();
        let mut engine = GameEngine::with_rng(arena, ChaCha12Rng::seed_from_u64(RNG_SEED));
        engine.snake = arena.food_positions().collect();
        engine.place_food();
        assert_eq!(engine.food(), None);
        assert_eq!(engine.state(), GameState::Over(Ending::Exhausted));
    }

    #[test]
    fn eat_last_food() {
        let arena = Arena::new(140, 160, 20, 20).unwrap();
        let mut engine = GameEngine::with_rng(arena, ChaCha12Rng::seed_from_u64(RNG_SEED));
        // Fill every other food cell and put the head just above the free one
        let target = Position::new(120, 100);
        let mut body = vec![Position::new(120, 80)];
        body.extend(
            arena
                .food_positions()
                .filter(|&p| p != target && p != Position::new(120, 80)),
        );
        engine.snake = body.into_iter().collect();
        engine.direction = Direction::Down;
        engine.food = Some(target);
        assert_eq!(engine.tick(), Ok(Tick::Over(Ending::Exhausted)));
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.food(), None);
        assert!(engine.is_game_over());
    }

    #[rstest]
    #[case(&[(580, 100), (560, 100), (540, 100)], Direction::Right)]
    #[case(&[(20, 100), (40, 100), (60, 100)], Direction::Left)]
    #[case(&[(100, 40), (100, 60), (100, 80)], Direction::Up)]
    #[case(&[(100, 600), (100, 580), (100, 560)], Direction::Down)]
    fn wall_collision(#[case] body: &[(u16, u16)], #[case] direction: Direction) {
        let mut engine = engine_with(body, direction);
        assert_eq!(engine.tick(), Ok(Tick::Over(Ending::Wall)));
        assert_eq!(engine.state(), GameState::Over(Ending::Wall));
        assert!(engine.is_game_over());
        assert_eq!(engine.snake(), &positions(body));
        let after = engine.clone();
        assert_eq!(engine.tick(), Err(Rejected::GameOver));
        assert_eq!(engine, after);
    }

    #[test]
    fn left_wall_then_no_op() {
        let mut engine = engine_with(&[(20, 100), (40, 100), (60, 100)], Direction::Left);
        assert_eq!(engine.tick(), Ok(Tick::Over(Ending::Wall)));
        let after = engine.clone();
        let r = engine.tick();
        assert_eq!(r, Err(Rejected::GameOver));
        assert_eq!(r.unwrap_err().kind(), RejectionKind::InvalidOperation);
        assert_eq!(engine.set_direction(Direction::Up), Err(Rejected::GameOver));
        assert_eq!(engine.request_direction("bogus"), Err(Rejected::GameOver));
        assert_eq!(engine, after);
    }

    #[test]
    fn self_collision() {
        let body = [(100, 100), (120, 100), (120, 120), (100, 120), (80, 120)];
        let mut engine = engine_with(&body, Direction::Down);
        assert_eq!(engine.tick(), Ok(Tick::Over(Ending::SelfCollision)));
        assert_eq!(engine.snake(), &positions(&body));
        assert_eq!(engine.tick(), Err(Rejected::GameOver));
    }

    #[test]
    fn chase_own_tail() {
        let mut engine = engine_with(
            &[(100, 100), (120, 100), (120, 120), (100, 120)],
            Direction::Down,
        );
        assert_eq!(engine.tick(), Ok(Tick::Moved));
        assert_eq!(
            engine.snake(),
            &positions(&[(100, 120), (100, 100), (120, 100), (120, 120)])
        );
        assert_eq!(engine.state(), GameState::Running);
    }

    #[test]
    fn turn_into_neck_via_quick_turns() {
        let mut engine = engine_with(&[(100, 100), (80, 100), (60, 100)], Direction::Right);
        assert_eq!(engine.set_direction(Direction::Up), Ok(()));
        assert_eq!(engine.set_direction(Direction::Left), Ok(()));
        assert_eq!(engine.tick(), Ok(Tick::Over(Ending::SelfCollision)));
    }

    #[test]
    fn play_until_wall() {
        let mut engine = new_engine();
        let mut ticks = 0;
        while !engine.is_game_over() {
            let len = engine.snake().len();
            let score = engine.score();
            match engine.tick() {
                Ok(Tick::Moved) => assert_eq!(engine.snake().len(), len),
                Ok(Tick::Ate { score: s, .. }) => {
                    assert_eq!(s, score + 1);
                    assert_eq!(engine.snake().len(), len + 1);
                }
                Ok(Tick::Over(ending)) => assert_eq!(ending, Ending::Wall),
                Err(e) => panic!("tick rejected while running: {e}"),
            }
            ticks += 1;
            assert!(ticks <= 30, "snake should have hit the wall by now");
        }
        assert_eq!(engine.head(), Some(Position::new(580, 100)));
    }

    #[rstest]
    #[case(Rejected::UnknownDirection(String::from("up")), "invalid input ignored")]
    #[case(
        Rejected::Reversal { current: Direction::Up, requested: Direction::Down },
        "invalid input ignored"
    )]
    #[case(Rejected::GameOver, "invalid operation")]
    fn rejection_kind_display(#[case] r: Rejected, #[case] label: &str) {
        assert_eq!(r.kind().to_string(), label);
    }

    #[test]
    fn random_play_keeps_invariants() {
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        for seed in 0..20u64 {
            let mut engine =
                GameEngine::with_rng(Arena::default(), ChaCha12Rng::seed_from_u64(seed));
            let mut turns = ChaCha12Rng::seed_from_u64(RNG_SEED ^ seed);
            for _ in 0..2000 {
                if engine.is_game_over() {
                    break;
                }
                let d = directions[turns.random_range(0..directions.len())];
                let _ = engine.set_direction(d);
                let body = engine.snake().clone();
                let score = engine.score();
                match engine.tick() {
                    Ok(Tick::Over(Ending::Wall | Ending::SelfCollision)) => {
                        assert_eq!(engine.snake(), &body);
                    }
                    Ok(_) => (),
                    Err(e) => panic!("tick rejected while running: {e}"),
                }
                assert!(engine.score() >= score);
                assert_eq!(
                    engine.speed(),
                    rules::BASE_SPEED + engine.score() / rules::SPEED_UP_EVERY
                );
                let distinct = engine
                    .snake()
                    .iter()
                    .collect::<std::collections::HashSet<_>>();
                assert_eq!(distinct.len(), engine.snake().len());
                if let Some(food) = engine.food() {
                    assert!(!engine.snake().contains(&food));
                }
            }
        }
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(
            Rejected::Reversal {
                current: Direction::Left,
                requested: Direction::Right
            }
            .to_string(),
            "cannot turn Right while heading Left"
        );
        assert_eq!(
            Rejected::UnknownDirection(String::from("Space")).to_string(),
            "unrecognized direction token \"Space\""
        );
    }
}
