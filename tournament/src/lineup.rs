// ═══════════════════════════════════════════════════════════════════════
// Lineups — which automated strategy sits in each seat
// ═══════════════════════════════════════════════════════════════════════

use conquest_agents::{PlanningPlayer, Player, RandomPlayer, SearchConfig, SearchPlayer};
use conquest_engine::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Planner,
    Search,
    Random,
}

impl PlayerKind {
    pub const ALL: [PlayerKind; 3] = [PlayerKind::Planner, PlayerKind::Search, PlayerKind::Random];

    pub fn build(self, id: PlayerId, seed: u64, search: &SearchConfig) -> Box<dyn Player> {
        match self {
            PlayerKind::Planner => Box::new(PlanningPlayer::new(id, search.clone())),
            PlayerKind::Search => Box::new(SearchPlayer::new(id, search.clone())),
            PlayerKind::Random => Box::new(RandomPlayer::new(id, seed)),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerKind::Planner => "planner",
            PlayerKind::Search => "search",
            PlayerKind::Random => "random",
        };
        f.write_str(name)
    }
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerKind::ALL
            .into_iter()
            .find(|k| k.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown player kind '{s}' (expected planner, search or random)"))
    }
}

/// Seat players 1..=n with the given kinds, cycling through `kinds` when
/// there are more seats than entries. Each seat gets its own seed.
pub fn make_players(kinds: &[PlayerKind], player_count: u8, seed: u64, search: &SearchConfig) -> Vec<Box<dyn Player>> {
    PlayerId::all(player_count)
        .enumerate()
        .map(|(i, id)| {
            let kind = kinds.get(i % kinds.len().max(1)).copied().unwrap_or(PlayerKind::Random);
            kind.build(id, seed.wrapping_add(i as u64), search)
        })
        .collect()
}
