//! Color triangle.
//!
//! ```text
//! Red ──beats──▶ Green ──beats──▶ Blue ──beats──▶ Red
//! Colorless: neutral against everything, except raven weapons
//! ```

use crate::env::Color;
use crate::skills::SkillEffect;

use super::combatant::Combatant;

/// +1 when `color` beats `other`, −1 when it loses, 0 otherwise.
pub fn direction(color: Color, other: Color) -> i32 {
    use Color::*;
    match (color, other) {
        (Red, Green) | (Green, Blue) | (Blue, Red) => 1,
        (Green, Red) | (Blue, Green) | (Red, Blue) => -1,
        _ => 0,
    }
}

/// Signed triangle modifier, in percent, for `unit` attacking `foe`.
///
/// The magnitude is the base triangle percentage plus the largest Triangle
/// Adept bonus held by either side. A raven weapon turns an otherwise
/// neutral matchup against a colorless foe into advantage.
///
/// # Arguments
///
/// * `unit` - Attacking side of this strike
/// * `foe` - Side being struck
/// * `base_pct` - Triangle magnitude without adept bonuses
pub fn advantage_pct(unit: &Combatant<'_>, foe: &Combatant<'_>, base_pct: i32) -> i32 {
    let own = unit.weapon_type().color;
    let theirs = foe.weapon_type().color;

    let mut sign = direction(own, theirs);
    if sign == 0 {
        if theirs == Color::Colorless && unit.has(|e| matches!(e, SkillEffect::Raven)) {
            sign = 1;
        } else if own == Color::Colorless && foe.has(|e| matches!(e, SkillEffect::Raven)) {
            sign = -1;
        }
    }
    if sign == 0 {
        return 0;
    }

    let adept = adept_pct(unit).max(adept_pct(foe));
    sign * (base_pct + adept)
}

fn adept_pct(combatant: &Combatant<'_>) -> i32 {
    combatant
        .skills
        .effects()
        .filter_map(|(_, effect)| match effect {
            SkillEffect::TriangleAdept { pct } => Some(*pct),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}
