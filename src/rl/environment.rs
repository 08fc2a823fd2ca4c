use rand::Rng;
use rand::rngs::SmallRng;

use crate::game::{
    ConfigError, Direction, EngineError, GameConfig, GameGrid, SnakeEngine, StepInfo,
};

/// Number of discrete actions (North, South, East, West)
pub const ACTION_COUNT: usize = 4;

/// Integer grid of shape [rows][cols] with values 0 = empty, 1 = body,
/// 2 = head, 3 = cherry
pub type Observation = Vec<Vec<u8>>;

/// An action as an agent or script hands it over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAction {
    Code(i64),
    Token(String),
    Direction(Direction),
}

impl RawAction {
    /// Convert to a direction, rejecting unknown codes and tokens
    pub fn resolve(&self) -> Result<Direction, EngineError> {
        let direction = match self {
            RawAction::Code(code) => Direction::try_from(*code)?,
            RawAction::Token(token) => token.parse::<Direction>()?,
            RawAction::Direction(direction) => *direction,
        };
        Ok(direction)
    }
}

impl From<i64> for RawAction {
    fn from(code: i64) -> Self {
        RawAction::Code(code)
    }
}

impl From<usize> for RawAction {
    fn from(code: usize) -> Self {
        RawAction::Code(i64::try_from(code).unwrap_or(i64::MAX))
    }
}

impl From<&str> for RawAction {
    fn from(token: &str) -> Self {
        RawAction::Token(token.to_string())
    }
}

impl From<char> for RawAction {
    fn from(token: char) -> Self {
        RawAction::Token(token.to_string())
    }
}

impl From<Direction> for RawAction {
    fn from(direction: Direction) -> Self {
        RawAction::Direction(direction)
    }
}

/// One environment transition
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

/// Snake environment for reinforcement learning
///
/// Wraps the game engine and provides the usual RL interface:
/// - integer grid observations
/// - discrete action space (0 = North, 1 = South, 2 = East, 3 = West),
///   also accepted as n / s / e / w tokens
/// - reset / step
#[derive(Debug)]
pub struct SnakeEnvironment<R = SmallRng> {
    engine: SnakeEngine<R>,
}

impl SnakeEnvironment<SmallRng> {
    /// Create a new Snake environment from configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_engine(SnakeEngine::from_config(config)?))
    }
}

impl<R: Rng> SnakeEnvironment<R> {
    /// Wrap an already built engine
    pub fn with_engine(engine: SnakeEngine<R>) -> Self {
        Self { engine }
    }

    /// Reset the environment and return initial observation
    pub fn reset(&mut self) -> Observation {
        self.engine.reset().to_observation()
    }

    /// Step the environment with a raw action.
    ///
    /// Invalid actions are rejected before the engine is touched.
    pub fn step(&mut self, action: impl Into<RawAction>) -> Result<Transition, EngineError> {
        let direction = action.into().resolve()?;
        let result = self.engine.step(direction)?;

        Ok(Transition {
            observation: result.observation.to_observation(),
            reward: result.reward,
            done: result.done,
            info: result.info,
        })
    }

    /// Get current observation without stepping
    pub fn observation(&self) -> Observation {
        self.engine.grid().to_observation()
    }

    /// (rows, cols) of every observation
    pub fn observation_shape(&self) -> (usize, usize) {
        self.engine.grid().shape()
    }

    pub fn action_count(&self) -> usize {
        ACTION_COUNT
    }

    /// Cell name to value mapping for renderers
    pub fn key(&self) -> [(&'static str, u8); 4] {
        GameGrid::legend()
    }

    pub fn grid(&self) -> &GameGrid {
        self.engine.grid()
    }

    /// Get reference to the engine (for testing/debugging)
    pub fn engine(&self) -> &SnakeEngine<R> {
        &self.engine
    }
}
