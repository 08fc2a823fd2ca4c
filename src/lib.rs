//! Grid Snake - a Snake game engine for humans and reinforcement learning agents
//!
//! This library provides:
//! - Core game logic: snake movement, cherry placement, grid encoding, rewards (game module)
//! - An RL environment adapter and agent seam (rl module)
//! - Terminal rendering and keyboard input for human play (render, input modules)
//! - Human and agent rollout execution modes (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod params;
pub mod render;
pub mod rl;
