//! Parameter file loading
//!
//! The file has an `env` section for the game and an optional `train`
//! section for rollout mode:
//!
//! ```yaml
//! env:
//!   grid_shape: [20, 20]
//!   seed: 7
//!   reward:
//!     game_over: -10.0
//!     cherry: 10.0
//! train:
//!   agent: random
//!   steps: 1000
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::game::GameConfig;
use crate::modes::TrainConfig;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Params {
    #[serde(default)]
    pub env: GameConfig,
    #[serde(default)]
    pub train: TrainConfig,
}

impl Params {
    /// Read and validate a YAML parameter file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameter file {:?}", path))?;
        Self::from_yaml_str(&text).with_context(|| format!("Invalid parameter file {:?}", path))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let params: Params = serde_yaml::from_str(yaml).context("Failed to parse YAML")?;
        params.env.validate()?;
        Ok(params)
    }
}
