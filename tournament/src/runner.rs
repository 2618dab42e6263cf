// ═══════════════════════════════════════════════════════════════════════
// Game Runner — plays a complete headless game between players
//
// Each turn runs the fixed phase order:
//   1. begin_turn      next player still on the board, reinforcements granted
//   2. reinforce       until the allowance is spent
//   3. attack          until the player returns None (or wins)
//   4. move            at most one movement
//
// Every request is validated before it touches the board. A rejected
// request is reported back to the player and asked again; too many
// rejections in one turn abort the game.
// ═══════════════════════════════════════════════════════════════════════

use conquest_agents::Player;
use conquest_engine::board::Board;
use conquest_engine::combat::resolve_attack;
use conquest_engine::error::{ConfigError, IllegalAction};
use conquest_engine::types::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("{player} made {strikes} illegal requests in one turn (last: {reason})")]
    TooManyIllegalRequests {
        player: PlayerId,
        strikes: u32,
        reason: IllegalAction,
    },

    #[error("game did not finish within {0} turns")]
    TurnLimit(u32),

    #[error("no player seated for {0}")]
    MissingPlayer(PlayerId),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Safety limits for a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchLimits {
    /// Turns (one player each) before the game is abandoned.
    pub max_turns: u32,
    /// Rejected requests tolerated from one player within one turn.
    pub max_strikes: u32,
}

impl Default for MatchLimits {
    fn default() -> Self {
        MatchLimits { max_turns: 2_000, max_strikes: 10 }
    }
}

/// Result of a completed game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub seed: u64,
    pub winner: PlayerId,
    pub winner_name: String,
    pub turns: u32,
    pub attacks: u32,
    pub captures: u32,
    pub rejected: u32,
    pub player_results: Vec<PlayerResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player: PlayerId,
    pub name: String,
    pub territories: usize,
    pub troops: u32,
}

#[derive(Default)]
struct Tally {
    attacks: u32,
    captures: u32,
    rejected: u32,
}

/// Play `board` to completion. `players[i]` must sit in seat i+1.
/// `seed` drives the dice.
pub fn run_game(
    mut board: Board,
    players: &mut [Box<dyn Player>],
    seed: u64,
    limits: &MatchLimits,
) -> Result<GameResult, GameError> {
    for id in PlayerId::all(board.player_count()) {
        if !players.iter().any(|p| p.id() == id) {
            return Err(GameError::MissingPlayer(id));
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut tally = Tally::default();
    let mut turns = 0u32;

    loop {
        if let Some(winner) = board.winner() {
            let result = build_result(&board, players, seed, winner, turns, &tally);
            tracing::info!(seed, winner = %winner, turns, "game finished");
            return Ok(result);
        }
        if turns >= limits.max_turns {
            return Err(GameError::TurnLimit(turns));
        }

        let current = board.begin_turn();
        turns += 1;
        let player = players
            .iter_mut()
            .find(|p| p.id() == current)
            .ok_or(GameError::MissingPlayer(current))?;
        tracing::debug!(turn = turns, player = %current, reinforcements = board.reinforcements_remaining(), "turn started");

        play_turn(&mut board, player.as_mut(), &mut rng, limits, &mut tally)?;
    }
}

fn play_turn(
    board: &mut Board,
    player: &mut dyn Player,
    rng: &mut ChaCha8Rng,
    limits: &MatchLimits,
    tally: &mut Tally,
) -> Result<(), GameError> {
    let id = player.id();
    let mut strikes = 0u32;

    // ── Reinforce ──
    while board.reinforcements_remaining() > 0 {
        let reinforcement = player.reinforce(board, board.reinforcements_remaining());
        if let Err(reason) = board.place_reinforcement(id, &reinforcement) {
            strike(player, reason, &mut strikes, limits, tally)?;
        }
    }

    // ── Attack ──
    while let Some(mv) = player.attack(board) {
        match own_move(id, &mv).and_then(|_| board.check_attack(&mv)) {
            Ok(()) => {
                let report = resolve_attack(board, &mv, rng);
                tally.attacks += 1;
                if report.captured {
                    tally.captures += 1;
                    if board.winner().is_some() {
                        return Ok(());
                    }
                }
            }
            Err(reason) => strike(player, reason, &mut strikes, limits, tally)?,
        }
    }

    // ── Move ──
    while let Some(mv) = player.move_troops(board) {
        match own_move(id, &mv).and_then(|_| board.check_movement(&mv)) {
            Ok(()) => {
                board.carry_out_movement(&mv);
                break;
            }
            Err(reason) => strike(player, reason, &mut strikes, limits, tally)?,
        }
    }
    Ok(())
}

/// A player may only issue moves in its own name.
fn own_move(id: PlayerId, mv: &Move) -> Result<(), IllegalAction> {
    if mv.player == id {
        Ok(())
    } else {
        Err(IllegalAction::NotController { player: id, territory: mv.from })
    }
}

fn strike(
    player: &mut dyn Player,
    reason: IllegalAction,
    strikes: &mut u32,
    limits: &MatchLimits,
    tally: &mut Tally,
) -> Result<(), GameError> {
    *strikes += 1;
    tally.rejected += 1;
    tracing::warn!(player = %player.id(), %reason, strikes = *strikes, "request rejected");
    player.rejected(&reason);
    if *strikes > limits.max_strikes {
        return Err(GameError::TooManyIllegalRequests { player: player.id(), strikes: *strikes, reason });
    }
    Ok(())
}

fn build_result(
    board: &Board,
    players: &[Box<dyn Player>],
    seed: u64,
    winner: PlayerId,
    turns: u32,
    tally: &Tally,
) -> GameResult {
    let player_results = players
        .iter()
        .map(|p| {
            let owned = board.controlled_territories(p.id());
            let troops = owned.iter().filter_map(|&id| board.territory(id)).map(|t| t.troops).sum();
            PlayerResult {
                player: p.id(),
                name: p.name().to_string(),
                territories: owned.len(),
                troops,
            }
        })
        .collect();
    let winner_name = players
        .iter()
        .find(|p| p.id() == winner)
        .map(|p| p.name().to_string())
        .unwrap_or_default();

    GameResult {
        seed,
        winner,
        winner_name,
        turns,
        attacks: tally.attacks,
        captures: tally.captures,
        rejected: tally.rejected,
        player_results,
    }
}
