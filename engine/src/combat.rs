// ═══════════════════════════════════════════════════════════════════════
// Dice resolution — one realized duel on the live board
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::probability::{attacker_dice, defender_dice};
use crate::types::Move;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened in a single realized attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    /// Sorted descending.
    pub attacker_rolls: Vec<u8>,
    /// Sorted descending.
    pub defender_rolls: Vec<u8>,
    pub attackers_lost: u32,
    pub defenders_lost: u32,
    pub captured: bool,
}

/// Roll `count` fair six-sided dice, highest first.
pub fn roll_dice(count: u32, rng: &mut impl Rng) -> Vec<u8> {
    let mut rolls: Vec<u8> = (0..count).map(|_| rng.gen_range(1..=6)).collect();
    rolls.sort_unstable_by(|a, b| b.cmp(a));
    rolls
}

/// Roll for both sides of `mv` and apply the losses to `board`.
/// The move must already have passed `Board::check_attack`.
pub fn resolve_attack(board: &mut Board, mv: &Move, rng: &mut impl Rng) -> CombatReport {
    let defending = board.territories()[mv.to.index()].troops;
    let attacker_rolls = roll_dice(attacker_dice(mv.count), rng);
    let defender_rolls = roll_dice(defender_dice(defending), rng);

    // Ties go to the defender.
    let defenders_lost = attacker_rolls
        .iter()
        .zip(&defender_rolls)
        .filter(|(a, d)| a > d)
        .count() as u32;
    let fights = attacker_rolls.len().min(defender_rolls.len()) as u32;
    let attackers_lost = fights - defenders_lost;

    let captured = board.apply_losses(mv, attackers_lost, defenders_lost);
    tracing::debug!(
        player = %mv.player,
        from = mv.from.0,
        to = mv.to.0,
        ?attacker_rolls,
        ?defender_rolls,
        attackers_lost,
        defenders_lost,
        captured,
        "attack resolved"
    );

    CombatReport { attacker_rolls, defender_rolls, attackers_lost, defenders_lost, captured }
}

impl fmt::Display for CombatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attacker rolled {:?}, defender rolled {:?}: attacker lost {}, defender lost {}",
            self.attacker_rolls, self.defender_rolls, self.attackers_lost, self.defenders_lost
        )?;
        if self.captured {
            write!(f, ", territory captured")?;
        }
        Ok(())
    }
}
