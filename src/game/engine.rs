use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{
    action::Direction,
    config::GameConfig,
    error::{ConfigError, EngineError},
    grid::GameGrid,
    state::{Position, Snake},
};

/// Rejection-sampling attempts per grid cell before falling back to
/// enumerating the free cells.
const REJECTIONS_PER_CELL: usize = 4;

/// Lifecycle of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeStatus {
    Active,
    Terminated,
}

/// What ended an episode early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head left the grid
    Wall,
    /// Head ran into the body
    Body,
}

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate the cherry this step
    pub cherry_eaten: bool,
    /// Running reward for the episode, this step included
    pub total_reward: f32,
    /// Type of collision if one occurred
    pub collision: Option<Collision>,
    /// Cherries eaten this episode
    pub score: u32,
    /// Steps taken this episode
    pub steps: u32,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub observation: GameGrid,
    /// Reward for this step only
    pub reward: f32,
    /// Whether the episode has terminated
    pub done: bool,
    pub info: StepInfo,
}

/// The game engine that handles all game logic
#[derive(Debug)]
pub struct SnakeEngine<R = SmallRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    cherry: Option<Position>,
    grid: GameGrid,
    status: EpisodeStatus,
    total_reward: f32,
    previous_proximity: Option<f32>,
    score: u32,
    steps: u32,
}

impl SnakeEngine<SmallRng> {
    /// Create an engine whose RNG is seeded from `config.seed`, or from
    /// entropy when no seed is configured.
    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: Rng> SnakeEngine<R> {
    /// Create a new engine. It starts terminated: call [`reset`](Self::reset)
    /// before the first step.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = Self::spawn_snake(&config);
        let grid = GameGrid::from_parts(config.rows(), config.cols(), &snake, None);

        Ok(Self {
            config,
            rng,
            snake,
            cherry: None,
            grid,
            status: EpisodeStatus::Terminated,
            total_reward: 0.0,
            previous_proximity: None,
            score: 0,
            steps: 0,
        })
    }

    fn spawn_snake(config: &GameConfig) -> Snake {
        let center = Position::new((config.rows() / 2) as i32, (config.cols() / 2) as i32);
        Snake::new(center, Direction::East)
    }

    /// Start a new episode and return the initial observation
    pub fn reset(&mut self) -> &GameGrid {
        self.total_reward = 0.0;
        self.previous_proximity = None;
        self.score = 0;
        self.steps = 0;

        self.snake = Self::spawn_snake(&self.config);
        self.grid.encode(&self.snake, None);
        self.place_cherry();
        self.status = EpisodeStatus::Active;

        debug!(
            head = ?self.snake.head(),
            cherry = ?self.cherry,
            "episode reset"
        );

        &self.grid
    }

    /// Execute one step of the game
    pub fn step(&mut self, action: Direction) -> Result<StepResult, EngineError> {
        if self.status == EpisodeStatus::Terminated {
            return Err(EngineError::EpisodeTerminated);
        }

        let outcome = self.snake.move_towards(Some(action));
        let head = self.snake.head();
        self.steps = self.steps.saturating_add(1);

        let out_of_bounds = !self.grid.in_bounds(head);
        if out_of_bounds {
            debug!(?head, "snake head out of bounds");
        }
        self.grid.encode(&self.snake, self.cherry);

        let cherry_eaten = self.cherry == Some(head);
        if cherry_eaten {
            self.score += 1;
            debug!(?head, score = self.score, "cherry eaten, replacing");
            self.place_cherry();
            self.snake.extend_tail();
        }

        let collision = if outcome.body_collision {
            Some(Collision::Body)
        } else if out_of_bounds {
            Some(Collision::Wall)
        } else {
            None
        };
        let done = collision.is_some() || self.cherry.is_none();

        let reward = self.evaluate_reward(done, collision.is_some(), cherry_eaten);
        self.total_reward += reward;

        if done {
            self.status = EpisodeStatus::Terminated;
            debug!(
                ?collision,
                score = self.score,
                steps = self.steps,
                total_reward = self.total_reward,
                "episode terminated"
            );
        }

        Ok(StepResult {
            observation: self.grid.clone(),
            reward,
            done,
            info: StepInfo {
                cherry_eaten,
                total_reward: self.total_reward,
                collision,
                score: self.score,
                steps: self.steps,
            },
        })
    }

    /// Reward for the step that was just applied.
    ///
    /// A collision pays `game_over` alone. Otherwise proximity shaping runs
    /// while a cherry exists, and `completed` replaces it once the grid is full.
    fn evaluate_reward(&mut self, done: bool, collided: bool, cherry_eaten: bool) -> f32 {
        let rewards = self.config.reward;
        let mut reward = 0.0;

        if done {
            reward += rewards.game_over;
        }
        if collided {
            return reward;
        }

        if cherry_eaten {
            reward += rewards.cherry;
        }

        match self.cherry {
            Some(cherry) => {
                let proximity = self.snake.distance_to(cherry);
                let closer = self
                    .previous_proximity
                    .is_none_or(|previous| proximity < previous);
                reward += if closer {
                    rewards.proximity_gain
                } else {
                    rewards.proximity_loss
                };
                self.previous_proximity = Some(proximity);
            }
            None => reward += rewards.completed,
        }

        reward
    }

    /// Put the cherry on a random cell the snake does not cover, or clear it
    /// when no such cell exists.
    fn place_cherry(&mut self) {
        if !self.grid.has_free_cell() {
            debug!("no free cell left for a cherry");
            self.cherry = None;
            return;
        }

        let (rows, cols) = self.grid.shape();
        let max_attempts = REJECTIONS_PER_CELL.saturating_mul(rows * cols);

        let sampled = (0..max_attempts)
            .map(|_| {
                Position::new(
                    self.rng.gen_range(0..rows) as i32,
                    self.rng.gen_range(0..cols) as i32,
                )
            })
            .find(|&pos| self.grid.is_free(pos));

        let position = match sampled {
            Some(pos) => pos,
            None => {
                let free = self.grid.free_cells();
                debug!(
                    free = free.len(),
                    "rejection sampling exhausted, picking from free cells"
                );
                free[self.rng.gen_range(0..free.len())]
            }
        };

        self.cherry = Some(position);
        self.grid.set_cherry(position);
    }

    pub fn grid(&self) -> &GameGrid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn cherry(&self) -> Option<Position> {
        self.cherry
    }

    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    pub fn total_reward(&self) -> f32 {
        self.total_reward
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

impl<R: Rng + SeedableRng> SnakeEngine<R> {
    /// Reseed the cherry RNG, then reset
    pub fn reset_with_seed(&mut self, seed: u64) -> &GameGrid {
        self.rng = R::seed_from_u64(seed);
        self.reset()
    }
}
