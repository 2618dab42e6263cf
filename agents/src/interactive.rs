// ═══════════════════════════════════════════════════════════════════════
// Interactive Player — a seat driven by an external controller
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::{Controller, Player};
use conquest_engine::board::Board;
use conquest_engine::error::IllegalAction;
use conquest_engine::types::*;

pub struct InteractivePlayer<C: Controller> {
    id: PlayerId,
    name: String,
    controller: C,
}

impl<C: Controller> InteractivePlayer<C> {
    pub fn new(id: PlayerId, name: impl Into<String>, controller: C) -> Self {
        InteractivePlayer { id, name: name.into(), controller }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }
}

impl<C: Controller> Player for InteractivePlayer<C> {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reinforce(&mut self, board: &Board, remaining: u32) -> Reinforcement {
        self.controller.reinforce(self.id, board, remaining)
    }

    fn attack(&mut self, board: &Board) -> Option<Move> {
        self.controller.attack(self.id, board)
    }

    fn move_troops(&mut self, board: &Board) -> Option<Move> {
        self.controller.move_troops(self.id, board)
    }

    fn rejected(&mut self, reason: &IllegalAction) {
        self.controller.rejected(self.id, reason);
    }
}
