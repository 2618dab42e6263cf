// ═══════════════════════════════════════════════════════════════════════
// Search Player — runs the attack search fresh at every query.
// No plan is kept, so there is nothing to go stale between dice rolls.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::Player;
use crate::heuristic::{fortify_move, weakest_territory};
use crate::search::{SearchConfig, SearchEngine, SearchStats};
use conquest_engine::board::Board;
use conquest_engine::types::*;

pub struct SearchPlayer {
    id: PlayerId,
    engine: SearchEngine,
}

impl SearchPlayer {
    pub fn new(id: PlayerId, config: SearchConfig) -> Self {
        SearchPlayer { id, engine: SearchEngine::new(config) }
    }

    pub fn last_search(&self) -> SearchStats {
        self.engine.stats()
    }
}

impl Player for SearchPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        "Search"
    }

    /// One troop at a time onto the weakest border.
    fn reinforce(&mut self, board: &Board, _remaining: u32) -> Reinforcement {
        let target = weakest_territory(board, self.id).unwrap_or(TerritoryId(0));
        Reinforcement::new(target, 1)
    }

    fn attack(&mut self, board: &Board) -> Option<Move> {
        self.engine.best_attack(board, self.id)
    }

    fn move_troops(&mut self, board: &Board) -> Option<Move> {
        fortify_move(board, self.id)
    }
}
