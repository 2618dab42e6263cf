// ═══════════════════════════════════════════════════════════════════════
// Turn Plan — queued actions tagged with the board they assumed
//
// FIFO: actions come out in the order they were planned. A consumer
// compares the live board against `expected` before trusting an entry
// and discards the whole plan on mismatch.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::types::Action;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct PlannedAction {
    /// Board the action was computed against.
    pub expected: Board,
    pub action: Action,
}

#[derive(Debug, Clone, Default)]
pub struct TurnPlan {
    queue: VecDeque<PlannedAction>,
}

impl TurnPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, expected: Board, action: Action) {
        self.queue.push_back(PlannedAction { expected, action });
    }

    /// Dequeue the oldest entry. `None` when the plan is empty.
    pub fn next_action(&mut self) -> Option<PlannedAction> {
        self.queue.pop_front()
    }

    pub fn peek(&self) -> Option<&PlannedAction> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn wipe(&mut self) {
        self.queue.clear();
    }
}
