use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use grid_snake::modes::{HumanMode, Speed, TrainMode};
use grid_snake::params::Params;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake game for humans and RL agents")]
struct Cli {
    /// Play with the keyboard or run an agent
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// YAML parameter file with `env` and `train` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows (overrides the parameter file)
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns (overrides the parameter file)
    #[arg(long)]
    cols: Option<usize>,

    /// Seed for cherry placement and the random agent
    #[arg(long)]
    seed: Option<u64>,

    /// Total agent steps in train mode
    #[arg(long)]
    steps: Option<usize>,

    /// Game speed in human mode
    #[arg(long, default_value = "fast")]
    speed: Speed,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Run the configured agent and log episode statistics
    Train,
}

impl Cli {
    fn params(&self) -> Result<Params> {
        let mut params = match &self.config {
            Some(path) => Params::load(path)?,
            None => Params::default(),
        };

        let (rows, cols) = params.env.grid_shape;
        params.env.grid_shape = (self.rows.unwrap_or(rows), self.cols.unwrap_or(cols));
        if let Some(seed) = self.seed {
            params.env.seed = Some(seed);
        }
        if let Some(steps) = self.steps {
            params.train.steps = steps;
        }

        params.env.validate()?;
        Ok(params)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let params = cli.params()?;

    match cli.mode {
        Mode::Human => {
            // The terminal UI owns stderr, so no log subscriber here
            let mut human_mode = HumanMode::new(params.env, cli.speed)?;
            human_mode.run().await?;
        }
        Mode::Train => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .init();

            let mut train_mode = TrainMode::new(params.env, params.train)?;
            let stats = train_mode.run()?;
            println!("{}", stats.format_summary());
        }
    }

    Ok(())
}
