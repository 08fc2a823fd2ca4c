use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Largest grid side; positions are stored as `i32`
const MAX_SIDE: usize = i32::MAX as usize;

/// Reward components; any key missing from a config file counts as 0
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Added once on the step that ends the episode
    pub game_over: f32,
    /// Added when a cherry is eaten
    pub cherry: f32,
    /// Head got closer to the cherry (or first shaped step of an episode)
    pub proximity_gain: f32,
    /// Head did not get closer to the cherry
    pub proximity_loss: f32,
    /// Added instead of proximity shaping once the grid is full
    pub completed: f32,
}

impl RewardConfig {
    fn components(&self) -> [(&'static str, f32); 5] {
        [
            ("game_over", self.game_over),
            ("cherry", self.cherry),
            ("proximity_gain", self.proximity_gain),
            ("proximity_loss", self.proximity_loss),
            ("completed", self.completed),
        ]
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid shape as (rows, cols)
    pub grid_shape: (usize, usize),
    /// Seed for cherry placement; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub reward: RewardConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_shape: (20, 20),
            seed: None,
            reward: RewardConfig {
                game_over: -10.0,
                cherry: 10.0,
                proximity_gain: 0.1,
                proximity_loss: -0.1,
                completed: 100.0,
            },
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid_shape: (rows, cols),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rewards(mut self, reward: RewardConfig) -> Self {
        self.reward = reward;
        self
    }

    pub fn rows(&self) -> usize {
        self.grid_shape.0
    }

    pub fn cols(&self) -> usize {
        self.grid_shape.1
    }

    /// Parse the `env` section layout from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Reject configurations the engine cannot start an episode with.
    ///
    /// The initial snake needs a column left of center, and at least one
    /// cell must stay free for the first cherry. Each side must fit in an
    /// `i32` and the cell count in a `usize`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (rows, cols) = self.grid_shape;
        let Some(cells) = rows.checked_mul(cols) else {
            return Err(ConfigError::GridTooLarge { rows, cols });
        };
        if rows > MAX_SIDE || cols > MAX_SIDE {
            return Err(ConfigError::GridTooLarge { rows, cols });
        }
        if rows == 0 || cols < 2 || cells < 3 {
            return Err(ConfigError::GridTooSmall { rows, cols });
        }

        for (name, value) in self.reward.components() {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteReward { name, value });
            }
        }

        Ok(())
    }
}
