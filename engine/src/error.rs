// ═══════════════════════════════════════════════════════════════════════
// Errors — legality failures and configuration problems
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{PlayerId, TerritoryId};

/// Why a requested move or reinforcement was rejected.
/// The controller is expected to re-prompt; the board is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalAction {
    #[error("a move must carry at least one troop")]
    EmptyMove,

    #[error("territory {from} has {available} troops, cannot send {requested} and keep one behind")]
    MustLeaveOneBehind {
        from: TerritoryId,
        available: u32,
        requested: u32,
    },

    #[error("{player} does not control territory {territory}")]
    NotController {
        player: PlayerId,
        territory: TerritoryId,
    },

    #[error("territory {to} is not adjacent to {from}")]
    NotAdjacent { from: TerritoryId, to: TerritoryId },

    #[error("at most 3 troops can attack at once, requested {0}")]
    TooManyAttackers(u32),

    #[error("territory {0} is not hostile, cannot attack it")]
    NotHostile(TerritoryId),

    #[error("territory {0} is hostile, cannot move troops into it")]
    NotFriendly(TerritoryId),

    #[error("a reinforcement must place at least one troop")]
    EmptyReinforcement,

    #[error("requested {requested} reinforcements but only {remaining} remain")]
    ExceedsRemaining { requested: u32, remaining: u32 },

    #[error("territory {0} does not exist")]
    UnknownTerritory(TerritoryId),
}

/// Invalid or unreadable game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}
