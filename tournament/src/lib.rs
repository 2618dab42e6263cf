pub mod runner;
pub mod lineup;
pub mod tournament;


pub use lineup::{make_players, PlayerKind};
pub use runner::{run_game, GameError, GameResult, MatchLimits, PlayerResult};
pub use tournament::{play_one, run_tournament, TournamentConfig, TournamentSummary};
