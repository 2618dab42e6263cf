// ═══════════════════════════════════════════════════════════════════════
// Board State — territory arena, legality checks and mutation
//
// Territories live in a flat arena indexed by `TerritoryId`. Neighbour
// lists hold ids, never references, so copying a board rebuilds every
// link by id and two boards never alias each other.
//
// Mutation entry points:
//   - `place_reinforcement`  validated, decrements the turn's allowance
//   - `carry_out_movement`   unchecked, caller validates first
//   - `apply_losses`         combat losses + capture, shared by dice
//                            resolution and search simulation
// ═══════════════════════════════════════════════════════════════════════

use crate::error::{ConfigError, IllegalAction};
use crate::map::MapLayout;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Minimum reinforcements granted per turn, regardless of holdings.
pub const MIN_REINFORCEMENTS: u32 = 3;

/// Largest force that may attack in a single duel.
pub const MAX_ATTACKING_TROOPS: u32 = 3;

// ── Territory ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub name: String,
    pub coords: Coordinate,
    pub controller: PlayerId,
    /// At least 1 outside combat resolution.
    pub troops: u32,
    pub neighbours: Vec<TerritoryId>,
}

impl Territory {
    pub fn borders(&self, other: TerritoryId) -> bool {
        self.neighbours.contains(&other)
    }

    /// Same controller, troops, name, id and neighbour count.
    fn matches(&self, other: &Territory) -> bool {
        self.id == other.id
            && self.controller == other.controller
            && self.troops == other.troops
            && self.neighbours.len() == other.neighbours.len()
            && self.name == other.name
    }
}

// ── Board ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    territories: Vec<Territory>,
    player_count: u8,
    /// 1-based index of the player whose turn it is; 0 before the first turn.
    turn: u8,
    territories_per_reinforcement: u32,
    reinforcements_remaining: u32,
}

impl Board {
    /// Build a board from a layout and one controller per territory.
    pub fn new(
        layout: &MapLayout,
        controllers: &[PlayerId],
        starting_troops: u32,
        player_count: u8,
        territories_per_reinforcement: u32,
    ) -> Result<Self, ConfigError> {
        layout.validate()?;
        if controllers.len() != layout.len() {
            return Err(ConfigError::Invalid(format!(
                "{} controllers given for {} territories",
                controllers.len(),
                layout.len()
            )));
        }
        if layout.len() > u16::MAX as usize {
            return Err(ConfigError::Invalid("too many territories".into()));
        }
        if starting_troops == 0 {
            return Err(ConfigError::Invalid("territories must start with at least one troop".into()));
        }
        if territories_per_reinforcement == 0 {
            return Err(ConfigError::Invalid("territories per reinforcement must be positive".into()));
        }
        if let Some(p) = controllers.iter().find(|p| p.0 == 0 || p.0 > player_count) {
            return Err(ConfigError::Invalid(format!("{p} is not part of a {player_count}-player game")));
        }

        let adjacency = layout.adjacency();
        let territories = layout
            .territories
            .iter()
            .zip(adjacency)
            .zip(controllers)
            .enumerate()
            .map(|(i, ((def, adjacent), &controller))| Territory {
                id: TerritoryId(i as u16),
                name: def.name.clone(),
                coords: def.coords,
                controller,
                troops: starting_troops,
                neighbours: adjacent.into_iter().map(|j| TerritoryId(j as u16)).collect(),
            })
            .collect();

        Ok(Board {
            territories,
            player_count,
            turn: 0,
            territories_per_reinforcement,
            reinforcements_remaining: 0,
        })
    }

    /// Independent copy: a fresh arena with every neighbour link rebuilt by id.
    pub fn copy(&self) -> Board {
        let territories = self
            .territories
            .iter()
            .map(|t| Territory {
                id: t.id,
                name: t.name.clone(),
                coords: t.coords,
                controller: t.controller,
                troops: t.troops,
                neighbours: t.neighbours.iter().map(|n| self.territories[n.index()].id).collect(),
            })
            .collect();
        Board { territories, ..*self }
    }

    // ── Accessors ──

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn player_count(&self) -> u8 {
        self.player_count
    }

    pub fn turn(&self) -> u8 {
        self.turn
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        (self.turn > 0).then_some(PlayerId(self.turn))
    }

    pub fn territories_per_reinforcement(&self) -> u32 {
        self.territories_per_reinforcement
    }

    pub fn reinforcements_remaining(&self) -> u32 {
        self.reinforcements_remaining
    }

    /// Case-insensitive lookup.
    pub fn territory_by_name(&self, name: &str) -> Option<&Territory> {
        self.territories.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    fn get(&self, id: TerritoryId) -> Result<&Territory, IllegalAction> {
        self.territory(id).ok_or(IllegalAction::UnknownTerritory(id))
    }

    // ── Legality ──

    /// Checks shared by attacks and movements.
    pub fn check_move(&self, mv: &Move) -> Result<(), IllegalAction> {
        if mv.count < 1 {
            return Err(IllegalAction::EmptyMove);
        }
        let from = self.get(mv.from)?;
        let to = self.get(mv.to)?;
        if from.troops.saturating_sub(1) < mv.count {
            return Err(IllegalAction::MustLeaveOneBehind {
                from: mv.from,
                available: from.troops,
                requested: mv.count,
            });
        }
        if from.controller != mv.player {
            return Err(IllegalAction::NotController { player: mv.player, territory: mv.from });
        }
        if !from.borders(mv.to) {
            return Err(IllegalAction::NotAdjacent { from: mv.from, to: mv.to });
        }
        if to.controller != mv.player && mv.count > MAX_ATTACKING_TROOPS {
            return Err(IllegalAction::TooManyAttackers(mv.count));
        }
        Ok(())
    }

    pub fn is_move_legal(&self, mv: &Move) -> bool {
        self.check_move(mv).is_ok()
    }

    pub fn check_attack(&self, mv: &Move) -> Result<(), IllegalAction> {
        self.check_move(mv)?;
        if self.territories[mv.to.index()].controller == mv.player {
            return Err(IllegalAction::NotHostile(mv.to));
        }
        Ok(())
    }

    pub fn check_movement(&self, mv: &Move) -> Result<(), IllegalAction> {
        self.check_move(mv)?;
        if self.territories[mv.to.index()].controller != mv.player {
            return Err(IllegalAction::NotFriendly(mv.to));
        }
        Ok(())
    }

    pub fn check_reinforcement(
        &self,
        player: PlayerId,
        reinforcement: &Reinforcement,
        remaining: u32,
    ) -> Result<(), IllegalAction> {
        if reinforcement.count == 0 {
            return Err(IllegalAction::EmptyReinforcement);
        }
        if reinforcement.count > remaining {
            return Err(IllegalAction::ExceedsRemaining { requested: reinforcement.count, remaining });
        }
        let target = self.get(reinforcement.territory)?;
        if target.controller != player {
            return Err(IllegalAction::NotController { player, territory: reinforcement.territory });
        }
        Ok(())
    }

    pub fn can_reinforce(&self, player: PlayerId, reinforcement: &Reinforcement, remaining: u32) -> bool {
        self.check_reinforcement(player, reinforcement, remaining).is_ok()
    }

    // ── Turn flow ──

    /// Reinforcements a player would receive at the start of a turn.
    pub fn count_reinforcements(&self, player: PlayerId) -> u32 {
        (self.controlled_count(player) as u32 / self.territories_per_reinforcement).max(MIN_REINFORCEMENTS)
    }

    /// Hand the turn to the next player still on the board and grant their
    /// reinforcements. Wraps from the last player back to player 1.
    pub fn begin_turn(&mut self) -> PlayerId {
        let mut next = self.turn;
        for _ in 0..self.player_count {
            next = next % self.player_count + 1;
            if !self.is_eliminated(PlayerId(next)) {
                break;
            }
        }
        self.turn = next;
        let player = PlayerId(next);
        self.reinforcements_remaining = self.count_reinforcements(player);
        player
    }

    /// Override the current allowance. Used when simulating a turn from a
    /// known mid-phase state.
    pub fn set_reinforcements_remaining(&mut self, remaining: u32) {
        self.reinforcements_remaining = remaining;
    }

    /// Validate against the remaining allowance, then place the troops.
    pub fn place_reinforcement(
        &mut self,
        player: PlayerId,
        reinforcement: &Reinforcement,
    ) -> Result<(), IllegalAction> {
        self.check_reinforcement(player, reinforcement, self.reinforcements_remaining)?;
        self.territories[reinforcement.territory.index()].troops += reinforcement.count;
        self.reinforcements_remaining -= reinforcement.count;
        Ok(())
    }

    /// Shift troops between two territories. Not re-validated.
    pub fn carry_out_movement(&mut self, mv: &Move) {
        self.territories[mv.from.index()].troops -= mv.count;
        self.territories[mv.to.index()].troops += mv.count;
    }

    /// Remove combat losses from both sides. When the defender is wiped out
    /// the attacker takes the territory and moves exactly one troop in.
    /// Returns whether the territory was captured.
    pub fn apply_losses(&mut self, mv: &Move, attackers_lost: u32, defenders_lost: u32) -> bool {
        let (from, to) = (mv.from.index(), mv.to.index());
        let source = &mut self.territories[from];
        source.troops = source.troops.saturating_sub(attackers_lost);
        let attacker = source.controller;

        let target = &mut self.territories[to];
        target.troops = target.troops.saturating_sub(defenders_lost);
        if target.troops > 0 {
            return false;
        }

        target.controller = attacker;
        target.troops = 1;
        let source = &mut self.territories[from];
        source.troops = source.troops.saturating_sub(1);
        true
    }

    /// The board that results from `outcome`, leaving `self` untouched.
    pub fn apply_outcome(&self, mv: &Move, outcome: &Outcome) -> Board {
        let mut next = self.copy();
        next.apply_losses(mv, outcome.attackers_lost, outcome.defenders_lost);
        next
    }

    // ── Queries ──

    pub fn controlled_territories(&self, player: PlayerId) -> Vec<TerritoryId> {
        self.territories.iter().filter(|t| t.controller == player).map(|t| t.id).collect()
    }

    pub fn controlled_count(&self, player: PlayerId) -> usize {
        self.territories.iter().filter(|t| t.controller == player).count()
    }

    /// Owned territories with at least one neighbour held by someone else.
    pub fn controlled_border_territories(&self, player: PlayerId) -> Vec<TerritoryId> {
        self.territories
            .iter()
            .filter(|t| t.controller == player && t.neighbours.iter().any(|n| self.controller(*n) != player))
            .map(|t| t.id)
            .collect()
    }

    pub fn hostile_neighbours(&self, id: TerritoryId) -> Vec<TerritoryId> {
        let owner = self.controller(id);
        self.territories[id.index()]
            .neighbours
            .iter()
            .copied()
            .filter(|n| self.controller(*n) != owner)
            .collect()
    }

    pub fn friendly_neighbours(&self, id: TerritoryId) -> Vec<TerritoryId> {
        let owner = self.controller(id);
        self.territories[id.index()]
            .neighbours
            .iter()
            .copied()
            .filter(|n| self.controller(*n) == owner)
            .collect()
    }

    /// Every territory reachable from `id` through territories of the same
    /// controller, `id` included, in BFS order.
    pub fn connected_territories(&self, id: TerritoryId) -> Vec<TerritoryId> {
        let mut visited = vec![false; self.territories.len()];
        self.flood(id, &mut visited)
    }

    /// Connected components of the player's holdings.
    pub fn connected_zones(&self, player: PlayerId) -> Vec<Vec<TerritoryId>> {
        let mut visited = vec![false; self.territories.len()];
        let mut zones = Vec::new();
        for t in &self.territories {
            if t.controller == player && !visited[t.id.index()] {
                zones.push(self.flood(t.id, &mut visited));
            }
        }
        zones
    }

    fn flood(&self, start: TerritoryId, visited: &mut [bool]) -> Vec<TerritoryId> {
        let owner = self.controller(start);
        let mut zone = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited[start.index()] = true;

        while let Some(id) = queue.pop_front() {
            zone.push(id);
            for &n in &self.territories[id.index()].neighbours {
                if !visited[n.index()] && self.controller(n) == owner {
                    visited[n.index()] = true;
                    queue.push_back(n);
                }
            }
        }
        zone
    }

    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.controlled_count(player) == 0
    }

    /// The sole controller of every territory, if there is one.
    pub fn winner(&self) -> Option<PlayerId> {
        let first = self.territories.first()?.controller;
        self.territories.iter().all(|t| t.controller == first).then_some(first)
    }

    fn controller(&self, id: TerritoryId) -> PlayerId {
        self.territories[id.index()].controller
    }
}

// ── Equality ───────────────────────────────────────────────────────────
// Structural: turn, remaining allowance, and every territory by
// controller, troops, name, id and neighbour count.

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.territories.len() == other.territories.len()
            && self.turn == other.turn
            && self.reinforcements_remaining == other.reinforcements_remaining
            && self.territories.iter().zip(&other.territories).all(|(a, b)| a.matches(b))
    }
}

// ── ASCII map ──────────────────────────────────────────────────────────
// Each territory is drawn as a box covering its centre +/- 1 cell.
// Neighbouring boxes abut.

const CELL_WIDTH: i64 = 5;
const CELL_HEIGHT: i64 = 2;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.territories.first() else {
            return writeln!(f, "(empty board)");
        };
        let (x0, y0) = (i64::from(first.coords.x), i64::from(first.coords.y));
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (x0, x0, y0, y0);
        for t in &self.territories {
            let (x, y) = (i64::from(t.coords.x), i64::from(t.coords.y));
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        let width = ((max_x - min_x + 3) * CELL_WIDTH) as usize;
        let height = ((max_y - min_y + 3) * CELL_HEIGHT) as usize;
        let mut grid = vec![vec![' '; width]; height];

        for t in &self.territories {
            let left = ((i64::from(t.coords.x) - min_x) * CELL_WIDTH) as usize;
            let top = ((i64::from(t.coords.y) - min_y) * CELL_HEIGHT) as usize;
            let right = left + 3 * CELL_WIDTH as usize - 1;
            let bottom = top + 3 * CELL_HEIGHT as usize - 1;

            for col in left..=right {
                grid[top][col] = '-';
                grid[bottom][col] = '-';
            }
            for row in grid.iter_mut().take(bottom + 1).skip(top) {
                row[left] = '|';
                row[right] = '|';
            }
            for (row, col) in [(top, left), (top, right), (bottom, left), (bottom, right)] {
                grid[row][col] = '+';
            }

            let inner = right - left - 1;
            let label = [t.name.clone(), format!("P{}", t.controller.0), t.troops.to_string()];
            for (offset, text) in label.iter().enumerate() {
                let text: String = text.chars().take(inner).collect();
                let start = left + 1 + (inner - text.chars().count()) / 2;
                for (i, ch) in text.chars().enumerate() {
                    grid[top + 1 + offset][start + i] = ch;
                }
            }
        }

        for row in grid {
            let line: String = row.into_iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        match self.current_player() {
            Some(p) => writeln!(f, "Turn: {p}, reinforcements remaining: {}", self.reinforcements_remaining),
            None => writeln!(f, "Turn: not started"),
        }
    }
}
