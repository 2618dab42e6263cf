// ═══════════════════════════════════════════════════════════════════════
// Adversarial Search — choice/chance tree over attack sequences
//
// Two alternating node kinds:
//   choice  the attacker picks the action with the highest value
//   chance  the dice pick the outcome with the LOWEST value
//
// Chance children come straight from the probability table, so the
// search never rolls dice. `depth` counts attack plies: at depth 1 a
// chance node scores its children with the heuristic, deeper nodes
// open another choice level below every child that still has attacks.
// ═══════════════════════════════════════════════════════════════════════

use crate::heuristic::{evaluate, EvalWeights};
use conquest_engine::board::Board;
use conquest_engine::error::ConfigError;
use conquest_engine::probability::{attacker_dice, defender_dice, outcomes};
use conquest_engine::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Attack plies to look ahead. Every troop count is enumerated, so the
    /// tree grows fast; 2-3 is practical.
    pub depth: u32,
    /// Attack only if the best value reaches this share of the current
    /// board's evaluation.
    pub commit_ratio: f64,
    pub weights: EvalWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 2,
            commit_ratio: 0.75,
            weights: EvalWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::Invalid("search depth must be at least 1".into()));
        }
        if !self.commit_ratio.is_finite() {
            return Err(ConfigError::Invalid("commit_ratio must be a finite number".into()));
        }
        Ok(())
    }
}

/// Node counts from the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub choice_nodes: u64,
    pub chance_nodes: u64,
    pub evaluations: u64,
}

/// Every legal attack for `player`: for each owned territory bordering an
/// enemy, each hostile neighbour, each troop count from the maximum down.
pub fn generate_attacks(board: &Board, player: PlayerId) -> Vec<Move> {
    let mut attacks = Vec::new();
    for from in board.controlled_border_territories(player) {
        let Some(source) = board.territory(from) else { continue };
        let max = attacker_dice(source.troops.saturating_sub(1));
        for to in board.hostile_neighbours(from) {
            for count in (1..=max).rev() {
                attacks.push(Move::new(player, from, to, count));
            }
        }
    }
    attacks
}

pub struct SearchEngine {
    config: SearchConfig,
    stats: SearchStats,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        SearchEngine { config, stats: SearchStats::default() }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn evaluate(&self, board: &Board, player: PlayerId) -> f64 {
        evaluate(board, player, &self.config.weights)
    }

    /// The attack worth committing to, or None to stop attacking.
    pub fn best_attack(&mut self, board: &Board, player: PlayerId) -> Option<Move> {
        self.stats = SearchStats::default();
        let actions = generate_attacks(board, player);
        let (index, value) = self.choose(board, player, &actions, self.config.depth.max(1))?;

        let baseline = self.evaluate(board, player);
        let commit = value >= self.config.commit_ratio * baseline;
        tracing::trace!(
            %player,
            actions = actions.len(),
            value,
            baseline,
            commit,
            choice_nodes = self.stats.choice_nodes,
            chance_nodes = self.stats.chance_nodes,
            evaluations = self.stats.evaluations,
            "attack search finished"
        );
        commit.then(|| actions[index])
    }

    /// Best action index and its value at a choice node. None when there
    /// is nothing to choose from.
    pub fn choice_node(&mut self, board: &Board, player: PlayerId, depth: u32) -> Option<(usize, f64)> {
        let actions = generate_attacks(board, player);
        self.choose(board, player, &actions, depth)
    }

    fn choose(&mut self, board: &Board, player: PlayerId, actions: &[Move], depth: u32) -> Option<(usize, f64)> {
        self.stats.choice_nodes += 1;
        let mut best: Option<(usize, f64)> = None;
        for (i, mv) in actions.iter().enumerate() {
            let value = self.chance_node(board, player, mv, depth);
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((i, value));
            }
        }
        best
    }

    /// Worst-case value of `mv` over every dice outcome.
    pub fn chance_node(&mut self, board: &Board, player: PlayerId, mv: &Move, depth: u32) -> f64 {
        self.stats.chance_nodes += 1;
        let defending = board.territory(mv.to).map_or(1, |t| t.troops);
        let mut worst = f64::INFINITY;

        for outcome in outcomes(attacker_dice(mv.count), defender_dice(defending)) {
            let child = board.apply_outcome(mv, outcome);
            let value = if depth <= 1 {
                self.leaf(&child, player)
            } else {
                let follow_ups = generate_attacks(&child, player);
                if follow_ups.is_empty() {
                    self.leaf(&child, player)
                } else {
                    self.choose(&child, player, &follow_ups, depth - 1)
                        .map_or_else(|| self.leaf(&child, player), |(_, v)| v)
                }
            };
            worst = worst.min(value);
        }
        worst
    }

    fn leaf(&mut self, board: &Board, player: PlayerId) -> f64 {
        self.stats.evaluations += 1;
        self.evaluate(board, player)
    }
}
