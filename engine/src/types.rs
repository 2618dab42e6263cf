// ═══════════════════════════════════════════════════════════════════════
// Core types — ids, coordinates, actions and combat outcomes
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

// ── Player ID ──────────────────────────────────────────────────────────
// 1-based player number. Player 1 takes the first turn.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// All player ids for a game of `count` players, in turn order.
    pub fn all(count: u8) -> impl Iterator<Item = PlayerId> {
        (1..=count).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

// ── Territory ID ───────────────────────────────────────────────────────
// Compact, copyable territory identifier. Index into the board's arena.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct TerritoryId(pub u16);

impl TerritoryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── Coordinate ─────────────────────────────────────────────────────────

/// Planar position of a territory centre. Only used to derive adjacency
/// and to draw the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Coordinate { x, y }
    }

    /// Ring rule: exactly 3 apart on one axis and at most 2 apart on the other.
    pub fn borders(self, other: Coordinate) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        (dx == 3 && dy <= 2) || (dy == 3 && dx <= 2)
    }

    /// Two centres collide when they are within 2 on both axes.
    pub fn collides(self, other: Coordinate) -> bool {
        self.x.abs_diff(other.x) <= 2 && self.y.abs_diff(other.y) <= 2
    }
}

// ── Move ───────────────────────────────────────────────────────────────

/// Troops leaving `from` for `to`. An attack when `to` is hostile,
/// a movement when it is friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub player: PlayerId,
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub count: u32,
}

impl Move {
    pub fn new(player: PlayerId, from: TerritoryId, to: TerritoryId, count: u32) -> Self {
        Move { player, from, to, count }
    }
}

// ── Reinforcement ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reinforcement {
    pub territory: TerritoryId,
    pub count: u32,
}

impl Reinforcement {
    pub fn new(territory: TerritoryId, count: u32) -> Self {
        Reinforcement { territory, count }
    }
}

// ── Combat Outcome ─────────────────────────────────────────────────────

/// One possible result of a single dice duel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub attackers_lost: u32,
    pub defenders_lost: u32,
    pub probability: f64,
}

// ── Planned Action ─────────────────────────────────────────────────────

/// What an automated player intends to answer at one engine query.
/// `None` payloads mean "end this phase".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Reinforce(Reinforcement),
    Attack(Option<Move>),
    Fortify(Option<Move>),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Reinforce(_) => ActionKind::Reinforce,
            Action::Attack(_) => ActionKind::Attack,
            Action::Fortify(_) => ActionKind::Fortify,
        }
    }
}

/// Turn phase an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Reinforce,
    Attack,
    Fortify,
}
