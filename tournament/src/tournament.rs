// ═══════════════════════════════════════════════════════════════════════
// Tournament — many independent games, played in parallel with rayon
//
// Games share nothing except the read-only combat table. Game g uses
// seed `base_seed + g * 1000` for the map, the dice and the players.
// ═══════════════════════════════════════════════════════════════════════

use crate::lineup::{make_players, PlayerKind};
use crate::runner::{run_game, GameError, GameResult, MatchLimits};
use conquest_agents::SearchConfig;
use conquest_engine::config::GameConfig;
use conquest_engine::setup::create_board;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub games: u32,
    pub base_seed: u64,
    /// Worker threads; 0 lets rayon decide.
    pub threads: usize,
    pub lineup: Vec<PlayerKind>,
    pub game: GameConfig,
    pub search: SearchConfig,
    pub limits: MatchLimits,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            games: 20,
            base_seed: 42,
            threads: 0,
            lineup: vec![PlayerKind::Planner, PlayerKind::Random],
            game: GameConfig::default(),
            search: SearchConfig::default(),
            limits: MatchLimits::default(),
        }
    }
}

impl TournamentConfig {
    pub fn seed_for(&self, game: u32) -> u64 {
        self.base_seed.wrapping_add(game as u64 * 1000)
    }
}

/// Aggregated results. `wins[i]` counts wins for seat i+1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub games: u32,
    pub finished: u32,
    pub errors: u32,
    pub wins: Vec<u32>,
    pub total_turns: u64,
    pub results: Vec<GameResult>,
}

impl TournamentSummary {
    pub fn average_turns(&self) -> f64 {
        if self.finished == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.finished as f64
        }
    }

    pub fn win_rate(&self, seat: usize) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins.get(seat).copied().unwrap_or(0) as f64 / self.games as f64
    }
}

/// Play one tournament game from scratch.
pub fn play_one(config: &TournamentConfig, seed: u64) -> Result<GameResult, GameError> {
    let game = GameConfig { layout_seed: seed, ..config.game.clone() };
    let board = create_board(&game)?;
    let mut players = make_players(&config.lineup, game.player_count, seed, &config.search);
    run_game(board, &mut players, seed, &config.limits)
}

pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentSummary, GameError> {
    config.game.validate()?;
    config.search.validate()?;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.threads).build()?;
    tracing::info!(games = config.games, threads = pool.current_num_threads(), "tournament started");

    let outcomes: Vec<(u64, Result<GameResult, GameError>)> = pool.install(|| {
        (0..config.games)
            .into_par_iter()
            .map(|g| {
                let seed = config.seed_for(g);
                (seed, play_one(config, seed))
            })
            .collect()
    });

    let mut summary = TournamentSummary {
        games: config.games,
        wins: vec![0; config.game.player_count as usize],
        ..TournamentSummary::default()
    };
    for (seed, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                if let Some(w) = summary.wins.get_mut(result.winner.0 as usize - 1) {
                    *w += 1;
                }
                summary.finished += 1;
                summary.total_turns += result.turns as u64;
                summary.results.push(result);
            }
            Err(e) => {
                tracing::warn!(seed, error = %e, "tournament game failed");
                summary.errors += 1;
            }
        }
    }

    tracing::info!(finished = summary.finished, errors = summary.errors, "tournament finished");
    Ok(summary)
}
