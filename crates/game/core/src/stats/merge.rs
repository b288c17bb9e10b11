//! Merge-level bonus distribution.
//!
//! Each merge grants two stat points. Points are handed out in rank order,
//! where rank is the stat's position when the level-1 stats are sorted
//! descending (ties broken by canonical order HP, Atk, Spd, Def, Res).
//!
//! # Formula
//!
//! ```text
//! points = 2 × merges
//! bonus(stat) = points / 5 + (1 if points mod 5 > rank(stat) else 0)
//! ```

use strum::IntoEnumIterator;

use super::core::{StatKind, StatLine};

/// Highest merge level a unit can reach.
pub const MAX_MERGES: u8 = 10;

/// Returns the rank (0 = highest) of every stat in `level1`.
///
/// Ties keep canonical order, so a stable sort over the canonical sequence
/// is enough.
pub fn stat_ranks(level1: &StatLine) -> StatLine {
    let mut order: Vec<StatKind> = StatKind::iter().collect();
    order.sort_by(|a, b| level1[*b].cmp(&level1[*a]));

    let mut ranks = StatLine::ZERO;
    for (rank, stat) in order.into_iter().enumerate() {
        ranks[stat] = rank as i32;
    }
    ranks
}

/// Merge bonus for a single stat.
///
/// # Arguments
///
/// * `level1` - Neutral level-1 stats for the unit's rarity (ranking basis)
/// * `merges` - Merge level, 0 to 10
/// * `stat` - Stat to compute the bonus for
pub fn merge_bonus(level1: &StatLine, merges: u8, stat: StatKind) -> i32 {
    let points = 2 * i32::from(merges);
    let rank = stat_ranks(level1)[stat];
    points / 5 + i32::from(points % 5 > rank)
}

/// Merge bonus for all five stats at once.
pub fn merge_bonuses(level1: &StatLine, merges: u8) -> StatLine {
    let ranks = stat_ranks(level1);
    let points = 2 * i32::from(merges);

    let mut out = StatLine::ZERO;
    for stat in StatKind::iter() {
        out[stat] = points / 5 + i32::from(points % 5 > ranks[stat]);
    }
    out
}
