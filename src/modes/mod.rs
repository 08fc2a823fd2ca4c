pub mod human;
pub mod train;

pub use human::{HumanMode, Speed};
pub use train::{TrainConfig, TrainMode};
