//! Reinforcement learning interface for the Snake game
//!
//! Provides:
//! - integer grid observations (empty, body, head, cherry)
//! - an environment accepting action codes, tokens or directions
//! - the `Agent` seam and a random-action baseline

pub mod agent;
pub mod environment;

pub use agent::{Agent, AgentKind, RandomAgent};
pub use environment::{ACTION_COUNT, Observation, RawAction, SnakeEnvironment, Transition};
