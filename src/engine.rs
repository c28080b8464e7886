use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::food::Food;
use crate::input::{Direction, GameInput};
use crate::snake::{Position, Snake};

/// High-level engine phase.
///
/// `tick` is legal only while `Running`. `Idle` is the freshly initialized
/// (or restarted) state waiting for `start`; `GameOver` is a normal terminal
/// phase reached through collision, not an error.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Immutable view of the engine state handed to renderers after each tick.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    /// Snake cells, head first.
    pub cells: Vec<Position>,
    pub food: Position,
    pub score: u32,
    /// Direction of the most recent movement.
    pub direction: Direction,
    pub phase: Phase,
    pub tick_count: u64,
}

/// Outcome of one [`Engine::tick`] call.
#[derive(Debug, Clone)]
pub struct TickReport {
    /// True when this tick ended the game by wall or body collision.
    pub collision: bool,
    /// True when this tick consumed food (and grew the snake).
    pub ate_food: bool,
    pub snapshot: Snapshot,
}

/// The grid simulation engine: sole owner and sole writer of game state.
///
/// The engine has no clock. An external scheduler calls [`Engine::tick`]
/// serially at its chosen cadence while the phase is [`Phase::Running`];
/// direction input arriving between ticks is buffered and applied atomically
/// at the start of the next tick.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    snake: Snake,
    food: Food,
    score: u32,
    phase: Phase,
    tick_count: u64,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine in `Idle` with entropy-seeded food placement.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, mut rng: StdRng) -> Self {
        let (snake, food) = Self::initial_board(config, &mut rng);

        Self {
            config,
            snake,
            food,
            score: 0,
            phase: Phase::Idle,
            tick_count: 0,
            rng,
        }
    }

    /// Creates an `Idle` engine from an explicit board layout.
    ///
    /// Intended for tests and scripted simulations that need a known snake
    /// and food position rather than the centered default.
    #[must_use]
    pub fn from_parts(config: EngineConfig, snake: Snake, food: Food, seed: u64) -> Self {
        Self {
            config,
            snake,
            food,
            score: 0,
            phase: Phase::Idle,
            tick_count: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn initial_board(config: EngineConfig, rng: &mut StdRng) -> (Snake, Food) {
        let start = Position {
            x: i32::from(config.grid.width / 2),
            y: i32::from(config.grid.height / 2),
        };
        let snake = Snake::new(start, Direction::Right);
        let food = Food::spawn(rng, config.grid, &snake)
            .expect("grid must hold more cells than the initial snake");

        (snake, food)
    }

    /// Resets the board, score, and direction, returning to `Idle`.
    ///
    /// The random stream is kept, so a seeded engine stays reproducible
    /// across restarts.
    pub fn restart(&mut self) {
        let (snake, food) = Self::initial_board(self.config, &mut self.rng);
        self.snake = snake;
        self.food = food;
        self.score = 0;
        self.tick_count = 0;
        self.phase = Phase::Idle;
    }

    /// Moves from `Idle` or `Paused` into `Running`; ignored elsewhere.
    pub fn start(&mut self) {
        if matches!(self.phase, Phase::Idle | Phase::Paused) {
            self.phase = Phase::Running;
        }
    }

    /// Moves from `Running` into `Paused`; ignored elsewhere.
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    /// Buffers a requested direction for the next tick.
    ///
    /// Total and side-effect-bounded: a request reversing the current
    /// direction is silently dropped, everything else replaces the pending
    /// direction. Nothing moves until the next tick.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.snake.set_pending_direction(direction);
    }

    /// Advances the simulation by one step.
    ///
    /// Calling this in any phase other than `Running` is a caller contract
    /// violation and is a documented no-op: the report carries the untouched
    /// snapshot with `collision` false.
    pub fn tick(&mut self) -> TickReport {
        if self.phase != Phase::Running {
            return self.report(false, false);
        }

        self.tick_count += 1;

        // Collision is decided on the candidate head before any mutation, so
        // a game-over tick leaves the body exactly as it was.
        let next = self.snake.next_head();
        if !next.is_within_bounds(self.config.grid) || self.snake.occupies(next) {
            self.phase = Phase::GameOver;
            return self.report(true, false);
        }

        let ate = next == self.food.position;
        self.snake.advance(ate);

        if ate {
            self.score += self.config.points_per_food;
            match Food::spawn(&mut self.rng, self.config.grid, &self.snake) {
                Some(food) => self.food = food,
                // Snake fills the grid: nowhere left to place food.
                None => self.phase = Phase::GameOver,
            }
        }

        self.report(false, ate)
    }

    /// Applies one frontend input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.phase == Phase::Running {
                    self.set_pending_direction(direction);
                }
            }
            GameInput::Pause => match self.phase {
                Phase::Running => self.pause(),
                Phase::Paused => self.start(),
                _ => {}
            },
            GameInput::Confirm | GameInput::Quit => {}
        }
    }

    /// Captures the current state for renderers and score displays.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.snake.segments().copied().collect(),
            food: self.food.position,
            score: self.score,
            direction: self.snake.direction(),
            phase: self.phase,
            tick_count: self.tick_count,
        }
    }

    fn report(&self, collision: bool, ate_food: bool) -> TickReport {
        TickReport {
            collision,
            ate_food,
            snapshot: self.snapshot(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }
}
