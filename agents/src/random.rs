// ═══════════════════════════════════════════════════════════════════════
// Random Player — picks uniformly among legal answers.
// Serves as baseline and for testing turn-loop stability.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::Player;
use crate::search::generate_attacks;
use conquest_engine::board::Board;
use conquest_engine::types::*;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Chance of ending the attack phase even when attacks remain.
const STOP_ATTACKING: f64 = 0.25;

pub struct RandomPlayer {
    id: PlayerId,
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new(id: PlayerId, seed: u64) -> Self {
        RandomPlayer {
            id,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn reinforce(&mut self, board: &Board, remaining: u32) -> Reinforcement {
        let owned = board.controlled_territories(self.id);
        let target = owned.choose(&mut self.rng).copied().unwrap_or(TerritoryId(0));
        let count = self.rng.gen_range(1..=remaining.max(1));
        Reinforcement::new(target, count)
    }

    fn attack(&mut self, board: &Board) -> Option<Move> {
        if self.rng.gen_bool(STOP_ATTACKING) {
            return None;
        }
        generate_attacks(board, self.id).choose(&mut self.rng).copied()
    }

    fn move_troops(&mut self, board: &Board) -> Option<Move> {
        let mut movements = Vec::new();
        for from in board.controlled_territories(self.id) {
            let Some(source) = board.territory(from) else { continue };
            if source.troops < 2 {
                continue;
            }
            for to in board.friendly_neighbours(from) {
                movements.push(Move::new(self.id, from, to, self.rng.gen_range(1..source.troops)));
            }
        }
        if self.rng.gen_bool(0.5) {
            movements.choose(&mut self.rng).copied()
        } else {
            None
        }
    }
}
