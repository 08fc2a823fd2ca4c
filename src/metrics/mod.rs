pub mod game_metrics;
pub mod rollout_stats;

pub use game_metrics::GameMetrics;
pub use rollout_stats::{EpisodeEnd, RolloutStats};
