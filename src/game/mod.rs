//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It is driven the same way by the human game loop and by RL agents.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{ActionError, Direction};
pub use config::{GameConfig, RewardConfig};
pub use engine::{Collision, EpisodeStatus, SnakeEngine, StepInfo, StepResult};
pub use error::{ConfigError, EngineError};
pub use grid::{Cell, GameGrid};
pub use state::{MoveOutcome, Position, Snake};
