// ═══════════════════════════════════════════════════════════════════════
// Player Trait — interface every seat at the table implements
//
// The turn loop calls the three phase methods in a fixed order:
//   1. `reinforce` until the turn's allowance is spent
//   2. `attack` until it returns None
//   3. `move_troops` at most once
//
// Players only ever see a shared reference to the board. Every answer
// is validated by the caller; a rejected request is reported back via
// `rejected` and asked again.
// ═══════════════════════════════════════════════════════════════════════

use conquest_engine::board::Board;
use conquest_engine::error::IllegalAction;
use conquest_engine::types::*;

pub trait Player: Send {
    /// The seat this player occupies.
    fn id(&self) -> PlayerId;

    /// Human-readable strategy name (e.g., "Planner", "Random").
    fn name(&self) -> &str;

    /// Where to put the next reinforcement. `remaining` is always > 0.
    fn reinforce(&mut self, board: &Board, remaining: u32) -> Reinforcement;

    /// The next attack, or None to end the attack phase.
    fn attack(&mut self, board: &Board) -> Option<Move>;

    /// The single end-of-turn movement, or None to skip it.
    fn move_troops(&mut self, board: &Board) -> Option<Move>;

    /// The last request was refused. Default: ignore and let the next
    /// query recompute.
    fn rejected(&mut self, _reason: &IllegalAction) {}
}

/// Source of decisions for a human seat: a prompt, a script, a socket.
/// Parsing and display are the controller's business.
pub trait Controller: Send {
    fn reinforce(&mut self, player: PlayerId, board: &Board, remaining: u32) -> Reinforcement;
    fn attack(&mut self, player: PlayerId, board: &Board) -> Option<Move>;
    fn move_troops(&mut self, player: PlayerId, board: &Board) -> Option<Move>;
    fn rejected(&mut self, _player: PlayerId, _reason: &IllegalAction) {}
}
