// ═══════════════════════════════════════════════════════════════════════
// Map layout — territory placement and adjacency derivation
//
// Territories are square cells centred on integer coordinates. A new
// territory is always placed 3 cells away from an existing one, so the
// generated map is connected. Neighbours are derived once with the ring
// rule (see `Coordinate::borders`); afterwards the board treats the map
// purely as a graph.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::ConfigError;
use crate::types::Coordinate;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Largest absolute coordinate a territory centre may take.
pub const MAX_COORDINATE: i32 = 10_000;

/// Static description of one territory on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryDef {
    pub name: String,
    pub coords: Coordinate,
}

/// Ordered list of territories. Index in the list becomes the territory id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayout {
    pub territories: Vec<TerritoryDef>,
}

impl MapLayout {
    /// Build a layout from explicit definitions, rejecting duplicate names
    /// and overlapping centres.
    pub fn new(territories: Vec<TerritoryDef>) -> Result<Self, ConfigError> {
        let layout = MapLayout { territories };
        layout.validate()?;
        Ok(layout)
    }

    /// The checks `new` applies, for layouts that were deserialised.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.territories.is_empty() {
            return Err(ConfigError::Invalid("a map needs at least one territory".into()));
        }
        let limit = MAX_COORDINATE.unsigned_abs();
        let out_of_range = |c: Coordinate| c.x.unsigned_abs() > limit || c.y.unsigned_abs() > limit;
        if let Some(def) = self.territories.iter().find(|d| out_of_range(d.coords)) {
            return Err(ConfigError::Invalid(format!(
                "territory '{}' lies outside +/-{MAX_COORDINATE}",
                def.name
            )));
        }
        for (i, a) in self.territories.iter().enumerate() {
            for b in &self.territories[i + 1..] {
                if a.name.eq_ignore_ascii_case(&b.name) {
                    return Err(ConfigError::Invalid(format!("duplicate territory name '{}'", a.name)));
                }
                if a.coords.collides(b.coords) {
                    return Err(ConfigError::Invalid(format!(
                        "territories '{}' and '{}' overlap",
                        a.name, b.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Grow a random connected map of `count` territories from (0,0).
    /// The same seed always yields the same layout.
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut centres = vec![Coordinate::new(0, 0)];

        while centres.len() < count {
            // Pick a random placed territory; retry if it is boxed in.
            let Some(&anchor) = centres.choose(&mut rng) else { break };
            let candidates = free_candidates(anchor, &centres);
            if let Some(&picked) = candidates.choose(&mut rng) {
                centres.push(picked);
            }
        }

        let territories = centres
            .into_iter()
            .enumerate()
            .map(|(i, coords)| TerritoryDef { name: i.to_string(), coords })
            .collect();
        MapLayout { territories }
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Neighbour lists by index, symmetric. Each pair is checked once,
    /// when the later territory is inserted.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacent = vec![Vec::new(); self.territories.len()];
        for (i, def) in self.territories.iter().enumerate() {
            for (j, earlier) in self.territories[..i].iter().enumerate() {
                if def.coords.borders(earlier.coords) {
                    adjacent[i].push(j);
                    adjacent[j].push(i);
                }
            }
        }
        adjacent
    }
}

/// Positions 3 away from `anchor` (offset -1..=1 on the other axis)
/// that do not collide with any placed centre.
fn free_candidates(anchor: Coordinate, placed: &[Coordinate]) -> Vec<Coordinate> {
    let mut candidates = Vec::with_capacity(12);
    for large in [-3, 3] {
        for small in -1..=1 {
            for offset in [(large, small), (small, large)] {
                let c = Coordinate::new(anchor.x + offset.0, anchor.y + offset.1);
                if placed.iter().all(|p| !p.collides(c)) {
                    candidates.push(c);
                }
            }
        }
    }
    candidates
}
