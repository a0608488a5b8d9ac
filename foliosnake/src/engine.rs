//! Snake rules on a fixed 20×20 board.

use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

pub const BOARD_SIZE: i32 = 20;
pub const INITIAL_HEAD: Cell = Cell::new(10, 10);
pub const INITIAL_FOOD: Cell = Cell::new(15, 15);
pub const INITIAL_DIRECTION: Direction = Direction::Right;
pub const SCORE_PER_FOOD: u32 = 10;

pub const BASE_INTERVAL: Duration = Duration::from_millis(150);
pub const SPEED_STEP: Duration = Duration::from_millis(2);
pub const MIN_INTERVAL: Duration = Duration::from_millis(80);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Screen coordinates: y grows downward.
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Fresh board, waiting for start.
    Ready,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Idle,
    Moved,
    Ate,
    /// The head hit a wall or the body. Reported once.
    GameOver,
}

#[derive(Clone, Debug)]
pub struct SnakeGame {
    /// Head first.
    snake: VecDeque<Cell>,
    food: Cell,
    direction: Direction,
    /// Direction of the last completed step.
    heading: Direction,
    status: Status,
    score: u32,
    interval: Duration,
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl SnakeGame {
    pub fn new() -> Self {
        Self {
            snake: VecDeque::from([INITIAL_HEAD]),
            food: INITIAL_FOOD,
            direction: INITIAL_DIRECTION,
            heading: INITIAL_DIRECTION,
            status: Status::Ready,
            score: 0,
            interval: BASE_INTERVAL,
        }
    }

    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        self.snake.front().copied().unwrap_or(INITIAL_HEAD)
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current time between steps.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    /// Fresh board, already playing.
    pub fn start(&mut self) {
        *self = Self::new();
        self.status = Status::Playing;
    }

    /// Fresh board, waiting for start.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Playing and paused swap; other states are left alone.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Playing => Status::Paused,
            Status::Paused => Status::Playing,
            other => other,
        };
    }

    /// Change direction. Ignored unless playing, and never reverses into
    /// the body: the opposite of the queued direction and of the last step
    /// are both refused.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if !self.is_playing() {
            return false;
        }
        if direction == self.direction.opposite() || direction == self.heading.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance one step. `rng` places new food.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Idle;
        }

        let next = self.head().step(self.direction);
        if !next.on_board() || self.snake.contains(&next) {
            self.status = Status::GameOver;
            tracing::debug!(event = "snake.game.over", score = self.score, length = self.snake.len());
            return TickOutcome::GameOver;
        }

        self.snake.push_front(next);
        self.heading = self.direction;

        if next == self.food {
            self.score += SCORE_PER_FOOD;
            self.interval = self.interval.saturating_sub(SPEED_STEP).max(MIN_INTERVAL);
            self.place_food(rng);
            TickOutcome::Ate
        } else {
            self.snake.pop_back();
            TickOutcome::Moved
        }
    }

    /// Move the food to a uniformly chosen free cell. With no free cell the
    /// food stays where it is.
    fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let free: Vec<Cell> = (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| Cell::new(x, y)))
            .filter(|cell| !self.snake.contains(cell))
            .collect();
        if free.is_empty() {
            return;
        }
        self.food = free[rng.gen_range(0..free.len())];
    }

    pub fn status_text(&self) -> &'static str {
        match self.status {
            Status::Ready => "Press Start to begin",
            Status::Playing => "Playing... (Space to pause)",
            Status::Paused => "Paused (Space to resume)",
            Status::GameOver => "Game Over!",
        }
    }

    #[cfg(test)]
    fn with_body(body: &[Cell], direction: Direction, food: Cell) -> Self {
        Self {
            snake: body.iter().copied().collect(),
            food,
            direction,
            heading: direction,
            status: Status::Playing,
            score: 0,
            interval: BASE_INTERVAL,
        }
    }
}
