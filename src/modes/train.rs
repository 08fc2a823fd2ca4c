//! Agent rollout mode
//!
//! Runs an agent against the Snake environment for a fixed number of steps,
//! resetting whenever an episode ends or runs past its step limit, and logs
//! per-episode statistics. No learning happens here; a learner plugs in as
//! another [`Agent`].
//!
//! # Example
//!
//! ```rust,no_run
//! use grid_snake::game::GameConfig;
//! use grid_snake::modes::{TrainConfig, TrainMode};
//!
//! let mut train_mode = TrainMode::new(GameConfig::small(), TrainConfig::default())?;
//! let stats = train_mode.run()?;
//! println!("{}", stats.format_summary());
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::{Collision, GameConfig, SnakeEngine};
use crate::metrics::{EpisodeEnd, RolloutStats};
use crate::rl::{Agent, AgentKind};

/// Configuration for rollout mode (the `train` section of the params file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Which agent picks the actions
    pub agent: AgentKind,
    /// Total environment steps across all episodes
    pub steps: usize,
    /// Episodes longer than this are cut off and reset
    pub episode_timeout: usize,
    /// Log a summary line every N episodes
    pub log_frequency: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            agent: AgentKind::Random,
            steps: 1000,
            episode_timeout: 50,
            log_frequency: 10,
        }
    }
}

/// Drives an agent through episodes and collects statistics
pub struct TrainMode {
    engine: SnakeEngine,
    agent: Box<dyn Agent>,
    stats: RolloutStats,
    config: TrainConfig,
}

impl TrainMode {
    /// Build the engine and the configured agent.
    ///
    /// The agent is seeded from the game seed so a seeded run is fully
    /// reproducible.
    pub fn new(game_config: GameConfig, config: TrainConfig) -> Result<Self> {
        let agent = config
            .agent
            .build(game_config.seed.map(|seed| seed.wrapping_add(1)));
        Self::with_agent(game_config, config, agent)
    }

    /// Use a caller-supplied agent
    pub fn with_agent(
        game_config: GameConfig,
        config: TrainConfig,
        agent: Box<dyn Agent>,
    ) -> Result<Self> {
        let engine =
            SnakeEngine::from_config(game_config).context("Invalid game configuration")?;

        Ok(Self {
            engine,
            agent,
            stats: RolloutStats::new(100),
            config,
        })
    }

    /// Run the rollout loop and return the final statistics
    pub fn run(&mut self) -> Result<&RolloutStats> {
        let (rows, cols) = self.engine.grid().shape();
        info!(
            agent = ?self.config.agent,
            steps = self.config.steps,
            episode_timeout = self.config.episode_timeout,
            rows,
            cols,
            "starting rollout"
        );

        let mut remaining = self.config.steps;
        while remaining > 0 {
            let budget = remaining.min(self.config.episode_timeout.max(1));
            let length = self.run_episode(budget)?;
            remaining -= length;

            let episodes = self.stats.total_episodes();
            if self.config.log_frequency > 0 && episodes % self.config.log_frequency == 0 {
                info!("{}", self.stats.format_summary());
            }
        }

        info!("rollout complete: {}", self.stats.format_summary());
        Ok(&self.stats)
    }

    /// Play one episode for at most `budget` steps and return its length
    fn run_episode(&mut self, budget: usize) -> Result<usize> {
        self.engine.reset();
        self.agent.on_reset();

        let mut end = EpisodeEnd::TimedOut;
        let mut length = 0;

        while length < budget {
            let action = self.agent.act(self.engine.grid());
            let result = self
                .engine
                .step(action)
                .context("Engine rejected a step")?;
            length += 1;

            debug!(
                step = length,
                %action,
                reward = result.reward,
                done = result.done,
                "step"
            );

            if result.done {
                end = match result.info.collision {
                    Some(Collision::Wall) | Some(Collision::Body) => EpisodeEnd::Died,
                    None => EpisodeEnd::Completed,
                };
                break;
            }
        }

        self.stats.record_episode(
            self.engine.total_reward(),
            length,
            self.engine.score(),
            end,
        );
        debug!(
            episode = self.stats.total_episodes(),
            ?end,
            length,
            score = self.engine.score(),
            total_reward = self.engine.total_reward(),
            "episode finished"
        );

        Ok(length)
    }

    pub fn stats(&self) -> &RolloutStats {
        &self.stats
    }
}
