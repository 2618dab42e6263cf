pub mod agent;
pub mod heuristic;
pub mod search;
pub mod planner;
pub mod reactive;
pub mod random;
pub mod interactive;


pub use agent::{Controller, Player};
pub use interactive::InteractivePlayer;
pub use planner::PlanningPlayer;
pub use random::RandomPlayer;
pub use reactive::SearchPlayer;
pub use search::{SearchConfig, SearchEngine};
