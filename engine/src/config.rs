// ═══════════════════════════════════════════════════════════════════════
// Game configuration — map size, seating and reinforcement pacing
// ═══════════════════════════════════════════════════════════════════════

use crate::error::ConfigError;
use crate::map::MapLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to lay out a board and seat the players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Territories to generate when no explicit layout is given.
    pub territory_count: usize,
    pub player_count: u8,
    /// Owned territories per reinforcement troop (floor 3 per turn).
    pub territories_per_reinforcement: u32,
    /// Seed for map generation.
    pub layout_seed: u64,
    /// Troops on each territory before the first turn.
    pub starting_troops: u32,
    /// Fixed layout; overrides `territory_count` and `layout_seed`.
    pub layout: Option<MapLayout>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            territory_count: 16,
            player_count: 2,
            territories_per_reinforcement: 3,
            layout_seed: 42,
            starting_troops: 1,
            layout: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count < 2 {
            return Err(ConfigError::Invalid(format!(
                "at least 2 players are needed, got {}",
                self.player_count
            )));
        }
        if let Some(layout) = &self.layout {
            layout.validate()?;
        }
        let territories = self.layout.as_ref().map_or(self.territory_count, MapLayout::len);
        if territories < self.player_count as usize {
            return Err(ConfigError::Invalid(format!(
                "{} territories cannot seat {} players",
                territories, self.player_count
            )));
        }
        if territories > u16::MAX as usize {
            return Err(ConfigError::Invalid(format!("{territories} territories is too many")));
        }
        if self.territories_per_reinforcement == 0 {
            return Err(ConfigError::Invalid("territories_per_reinforcement must be positive".into()));
        }
        if self.starting_troops == 0 {
            return Err(ConfigError::Invalid("starting_troops must be positive".into()));
        }
        Ok(())
    }

    /// Read and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}
