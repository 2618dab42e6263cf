// ═══════════════════════════════════════════════════════════════════════
// Board heuristics — evaluation and fortification targeting
//
// Relative threat of a territory = sum of hostile neighbour troops
// divided by its own troops. The weakest border territory maximises it;
// the strongest friendly neighbour minimises it. Ties keep the first
// candidate in territory order.
// ═══════════════════════════════════════════════════════════════════════

use conquest_engine::board::Board;
use conquest_engine::types::*;
use serde::{Deserialize, Serialize};

/// Weights for the board evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Per controlled territory.
    pub territories: f64,
    /// Subtracted per border territory.
    pub borders: f64,
    /// Per border territory holding 2 or 3 troops.
    pub defended: f64,
    /// Per reinforcement the board would grant.
    pub reinforcements: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            territories: 2.5,
            borders: 1.5,
            defended: 2.0,
            reinforcements: 2.0,
        }
    }
}

/// How good `board` is for `player`. Higher is better.
pub fn evaluate(board: &Board, player: PlayerId, weights: &EvalWeights) -> f64 {
    let borders = board.controlled_border_territories(player);
    let defended = borders
        .iter()
        .filter_map(|&id| board.territory(id))
        .filter(|t| 1 < t.troops && t.troops < 4)
        .count();

    weights.territories * board.controlled_count(player) as f64 - weights.borders * borders.len() as f64
        + weights.defended * defended as f64
        + weights.reinforcements * board.count_reinforcements(player) as f64
}

/// Hostile troops around `id` per troop stationed there.
pub fn relative_threat(board: &Board, id: TerritoryId) -> f64 {
    let Some(territory) = board.territory(id) else { return 0.0 };
    let hostile: u32 = board
        .hostile_neighbours(id)
        .iter()
        .filter_map(|&n| board.territory(n))
        .map(|t| t.troops)
        .sum();
    hostile as f64 / territory.troops.max(1) as f64
}

/// The border territory under the highest relative threat. Falls back to
/// the first owned territory when nothing borders an enemy, and to None
/// when the player holds nothing.
pub fn weakest_territory(board: &Board, player: PlayerId) -> Option<TerritoryId> {
    let borders = board.controlled_border_territories(player);
    if borders.is_empty() {
        return board.controlled_territories(player).first().copied();
    }
    pick_first(&borders, |id| relative_threat(board, id), |a, b| a > b)
}

/// The friendly neighbour of `id` under the lowest relative threat.
pub fn strongest_neighbour(board: &Board, id: TerritoryId) -> Option<TerritoryId> {
    let friendly = board.friendly_neighbours(id);
    pick_first(&friendly, |n| relative_threat(board, n), |a, b| a < b)
}

/// Move one troop into the weakest territory from its strongest friendly
/// neighbour, if that neighbour can spare it.
pub fn fortify_move(board: &Board, player: PlayerId) -> Option<Move> {
    let weakest = weakest_territory(board, player)?;
    let donor = strongest_neighbour(board, weakest)?;
    let spare = board.territory(donor)?.troops;
    (spare > 1).then(|| Move::new(player, donor, weakest, 1))
}

/// First candidate whose score beats every earlier one under `better`.
fn pick_first(
    candidates: &[TerritoryId],
    score: impl Fn(TerritoryId) -> f64,
    better: impl Fn(f64, f64) -> bool,
) -> Option<TerritoryId> {
    let (&first, rest) = candidates.split_first()?;
    let mut best = (first, score(first));
    for &id in rest {
        let s = score(id);
        if better(s, best.1) {
            best = (id, s);
        }
    }
    Some(best.0)
}
