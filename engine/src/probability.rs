// ═══════════════════════════════════════════════════════════════════════
// Combat probability table — exact outcome distribution of a dice duel
//
// For every (attacker dice, defender dice) pair in {1,2,3} x {1,2} we
// enumerate all 6^a * 6^d equally likely roll combinations, sort each
// side descending and compare the top min(a, d) pairs. Ties go to the
// defender. The table is built once on first access and shared for the
// rest of the process.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::Outcome;
use std::sync::OnceLock;

pub const MAX_ATTACKER_DICE: u32 = 3;
pub const MAX_DEFENDER_DICE: u32 = 2;
const DIE_FACES: u8 = 6;

type Table = [[Vec<Outcome>; MAX_DEFENDER_DICE as usize]; MAX_ATTACKER_DICE as usize];

static TABLE: OnceLock<Table> = OnceLock::new();

/// Outcomes of one duel with `attacker_dice` against `defender_dice`,
/// ordered by ascending defenders lost. Probabilities sum to 1.
///
/// Panics when the dice counts are outside {1,2,3} x {1,2}. Callers clamp
/// with [`attacker_dice`] and [`defender_dice`] first.
pub fn outcomes(attacker_dice: u32, defender_dice: u32) -> &'static [Outcome] {
    assert!(
        (1..=MAX_ATTACKER_DICE).contains(&attacker_dice),
        "unsupported attacker dice count {attacker_dice}"
    );
    assert!(
        (1..=MAX_DEFENDER_DICE).contains(&defender_dice),
        "unsupported defender dice count {defender_dice}"
    );
    let table = TABLE.get_or_init(build_table);
    &table[attacker_dice as usize - 1][defender_dice as usize - 1]
}

/// Dice the attacker rolls when sending `troops` into battle.
pub fn attacker_dice(troops: u32) -> u32 {
    troops.min(MAX_ATTACKER_DICE)
}

/// Dice the defender rolls while holding `troops`.
pub fn defender_dice(troops: u32) -> u32 {
    troops.min(MAX_DEFENDER_DICE)
}

/// Probability that the attacker wins every comparison of one duel.
pub fn win_probability(attacker_dice: u32, defender_dice: u32) -> f64 {
    let fights = attacker_dice.min(defender_dice);
    outcomes(attacker_dice, defender_dice)
        .iter()
        .filter(|o| o.defenders_lost == fights)
        .map(|o| o.probability)
        .sum()
}

/// Expected defender losses minus expected attacker losses for one duel.
pub fn expected_margin(attacker_dice: u32, defender_dice: u32) -> f64 {
    outcomes(attacker_dice, defender_dice)
        .iter()
        .map(|o| (o.defenders_lost as f64 - o.attackers_lost as f64) * o.probability)
        .sum()
}

fn build_table() -> Table {
    let rolls: Vec<Vec<Vec<u8>>> = (1..=MAX_ATTACKER_DICE as usize).map(roll_sets).collect();
    std::array::from_fn(|a| std::array::from_fn(|d| duel(&rolls[a], &rolls[d])))
}

/// Tally attacker wins over every pairing of the two roll sets.
fn duel(attacker_rolls: &[Vec<u8>], defender_rolls: &[Vec<u8>]) -> Vec<Outcome> {
    let fights = attacker_rolls[0].len().min(defender_rolls[0].len());
    let mut tallies = vec![0u64; fights + 1];

    for att in attacker_rolls {
        for def in defender_rolls {
            let wins = att.iter().zip(def.iter()).filter(|(a, d)| a > d).count();
            tallies[wins] += 1;
        }
    }

    let total = (attacker_rolls.len() * defender_rolls.len()) as f64;
    tallies
        .iter()
        .enumerate()
        .map(|(wins, &count)| Outcome {
            attackers_lost: (fights - wins) as u32,
            defenders_lost: wins as u32,
            probability: count as f64 / total,
        })
        .collect()
}

/// Every ordered roll of `dice` six-sided dice, each sorted descending.
fn roll_sets(dice: usize) -> Vec<Vec<u8>> {
    let mut sets: Vec<Vec<u8>> = vec![Vec::new()];
    for _ in 0..dice {
        sets = sets
            .into_iter()
            .flat_map(|set| {
                (1..=DIE_FACES).map(move |face| {
                    let mut next = set.clone();
                    next.push(face);
                    next
                })
            })
            .collect();
    }
    for set in &mut sets {
        set.sort_unstable_by(|a, b| b.cmp(a));
    }
    sets
}

/// Every supported (attacker dice, defender dice) pair.
pub fn supported_pairs() -> impl Iterator<Item = (u32, u32)> {
    (1..=MAX_ATTACKER_DICE).flat_map(|a| (1..=MAX_DEFENDER_DICE).map(move |d| (a, d)))
}
