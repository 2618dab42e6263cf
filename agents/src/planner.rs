// ═══════════════════════════════════════════════════════════════════════
// Planning Player — plans a whole turn, replans when the dice disagree
//
// At the first query of a turn the player simulates the rest of it on a
// copy of the board: one reinforcement at a time onto the weakest border,
// then searched attacks (assuming each resolves with its most probable
// outcome), then a final fortification. Each step is queued together
// with the board it expects to see when the step is asked for.
//
// On every query the head of the queue is checked against the live
// board. Any mismatch (wrong phase, different board, empty queue) throws
// the rest away and replans from what actually happened.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::Player;
use crate::heuristic::{fortify_move, weakest_territory};
use crate::search::{SearchConfig, SearchEngine};
use conquest_engine::board::Board;
use conquest_engine::error::IllegalAction;
use conquest_engine::plan::TurnPlan;
use conquest_engine::probability::{attacker_dice, defender_dice, outcomes};
use conquest_engine::types::*;

pub struct PlanningPlayer {
    id: PlayerId,
    engine: SearchEngine,
    plan: TurnPlan,
    replans: u64,
}

impl PlanningPlayer {
    pub fn new(id: PlayerId, config: SearchConfig) -> Self {
        PlanningPlayer {
            id,
            engine: SearchEngine::new(config),
            plan: TurnPlan::new(),
            replans: 0,
        }
    }

    /// How many times the plan has been rebuilt.
    pub fn replans(&self) -> u64 {
        self.replans
    }

    pub fn plan(&self) -> &TurnPlan {
        &self.plan
    }

    /// The queued action for this query, replanning first if the queue
    /// no longer describes the live board.
    fn next_planned(&mut self, board: &Board, phase: ActionKind) -> Option<Action> {
        if let Some(action) = self.take_if_current(board, phase) {
            return Some(action);
        }
        tracing::debug!(player = %self.id, ?phase, queued = self.plan.len(), "plan diverged, replanning");
        self.replan(board, phase);
        self.take_if_current(board, phase)
    }

    fn take_if_current(&mut self, board: &Board, phase: ActionKind) -> Option<Action> {
        let entry = self.plan.next_action()?;
        if entry.action.kind() == phase && entry.expected == *board {
            Some(entry.action)
        } else {
            self.plan.wipe();
            None
        }
    }

    /// Rebuild the plan for the rest of the turn, starting at `phase`.
    fn replan(&mut self, board: &Board, phase: ActionKind) {
        self.plan.wipe();
        self.replans += 1;
        let mut expected = board.copy();

        if phase == ActionKind::Reinforce {
            while expected.reinforcements_remaining() > 0 {
                let Some(target) = weakest_territory(&expected, self.id) else { break };
                let reinforcement = Reinforcement::new(target, 1);
                self.plan.add_action(expected.copy(), Action::Reinforce(reinforcement));
                if expected.place_reinforcement(self.id, &reinforcement).is_err() {
                    break;
                }
            }
        }

        if phase != ActionKind::Fortify {
            // Terminates: every simulated duel removes at least one troop.
            while let Some(mv) = self.engine.best_attack(&expected, self.id) {
                self.plan.add_action(expected.copy(), Action::Attack(Some(mv)));
                expected = most_probable_result(&expected, &mv);
            }
            self.plan.add_action(expected.copy(), Action::Attack(None));
        }

        let fortify = fortify_move(&expected, self.id);
        self.plan.add_action(expected, Action::Fortify(fortify));
        tracing::debug!(player = %self.id, steps = self.plan.len(), "turn planned");
    }
}

/// The board after `mv` resolves with its single most likely outcome.
/// Ties keep the outcome listed first.
pub fn most_probable_result(board: &Board, mv: &Move) -> Board {
    let defending = board.territory(mv.to).map_or(1, |t| t.troops);
    let table = outcomes(attacker_dice(mv.count), defender_dice(defending));
    let likeliest = table
        .iter()
        .fold(None::<&Outcome>, |best, o| match best {
            Some(b) if b.probability >= o.probability => Some(b),
            _ => Some(o),
        });
    match likeliest {
        Some(outcome) => board.apply_outcome(mv, outcome),
        None => board.copy(),
    }
}

impl Player for PlanningPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        "Planner"
    }

    fn reinforce(&mut self, board: &Board, remaining: u32) -> Reinforcement {
        let mut actual = board.copy();
        actual.set_reinforcements_remaining(remaining);
        match self.next_planned(&actual, ActionKind::Reinforce) {
            Some(Action::Reinforce(r)) => r,
            _ => {
                // Only reachable when the player holds nothing.
                let fallback = weakest_territory(board, self.id).unwrap_or(TerritoryId(0));
                Reinforcement::new(fallback, remaining)
            }
        }
    }

    fn attack(&mut self, board: &Board) -> Option<Move> {
        match self.next_planned(board, ActionKind::Attack) {
            Some(Action::Attack(mv)) => mv,
            _ => None,
        }
    }

    fn move_troops(&mut self, board: &Board) -> Option<Move> {
        match self.next_planned(board, ActionKind::Fortify) {
            Some(Action::Fortify(mv)) => mv,
            _ => None,
        }
    }

    fn rejected(&mut self, reason: &IllegalAction) {
        tracing::debug!(player = %self.id, %reason, "planned action rejected, dropping plan");
        self.plan.wipe();
    }
}
