use thiserror::Error;

use super::action::ActionError;

/// Errors returned by the engine's public operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    InvalidAction(#[from] ActionError),
    #[error("episode has terminated, call reset() before stepping again")]
    EpisodeTerminated,
}

/// Configuration or construction values the engine cannot work with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid {rows}x{cols} is too small, need at least 2 columns and 3 cells")]
    GridTooSmall { rows: usize, cols: usize },
    #[error("grid {rows}x{cols} is too large, each side must fit in an i32")]
    GridTooLarge { rows: usize, cols: usize },
    #[error("reward component {name} must be finite, got {value}")]
    NonFiniteReward { name: &'static str, value: f32 },
    #[error("invalid snake: {0}")]
    InvalidSnake(&'static str),
}
