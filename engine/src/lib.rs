pub mod types;
pub mod error;
pub mod probability;
pub mod map;
pub mod board;
pub mod combat;
pub mod plan;
pub mod config;
pub mod setup;

mod tests;

pub use types::*;
pub use board::{Board, Territory};
pub use error::{ConfigError, IllegalAction};
pub use plan::{PlannedAction, TurnPlan};
pub use config::GameConfig;
