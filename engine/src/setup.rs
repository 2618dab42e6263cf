// ═══════════════════════════════════════════════════════════════════════
// Game setup — builds the starting board from a GameConfig
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::map::MapLayout;
use crate::types::PlayerId;

/// Lay out the map and split it between the players.
pub fn create_board(config: &GameConfig) -> Result<Board, ConfigError> {
    config.validate()?;
    let layout = match &config.layout {
        Some(layout) => layout.clone(),
        None => MapLayout::generate(config.territory_count, config.layout_seed),
    };
    let controllers = starting_controllers(layout.len(), config.player_count);
    let board = Board::new(
        &layout,
        &controllers,
        config.starting_troops,
        config.player_count,
        config.territories_per_reinforcement,
    )?;

    tracing::info!(
        territories = board.len(),
        players = config.player_count,
        seed = config.layout_seed,
        "board created"
    );
    Ok(board)
}

/// Contiguous blocks of near-equal size, in territory order. Block k goes to
/// player k+1; the first `territories % players` blocks get one extra.
pub fn starting_controllers(territories: usize, players: u8) -> Vec<PlayerId> {
    let players = players.max(1) as usize;
    let base = territories / players;
    let extra = territories % players;

    let mut controllers = Vec::with_capacity(territories);
    for k in 0..players {
        let size = base + usize::from(k < extra);
        controllers.extend(std::iter::repeat(PlayerId(k as u8 + 1)).take(size));
    }
    controllers
}
