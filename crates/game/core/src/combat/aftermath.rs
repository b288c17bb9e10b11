//! Post-combat effects.
//!
//! Everything here happens simultaneously after the last strike and can
//! never defeat a unit: post-combat damage stops at 1 HP, and a unit already
//! at 0 stays at 0.
//!
//! | Effect          | Fires when                                        |
//! |-----------------|---------------------------------------------------|
//! | Self damage     | always, or only if the holder struck              |
//! | Poison          | holder struck, survived, and its role matches     |
//! | Pain            | the victim landed at least one strike             |
//! | Self buff       | attacker struck (replaces its old buffs)          |
//! | Inflicted debuff| holder struck and survived                        |

use crate::skills::{Aftermath, SkillEffect};
use crate::stats::StatLine;

use super::combatant::Combatant;

/// One side's standing after the last strike.
#[derive(Clone, Copy, Debug)]
pub struct Outcome<'c, 'a> {
    pub combatant: &'c Combatant<'a>,
    pub hp: i32,
    pub landed: u8,
}

impl Outcome<'_, '_> {
    fn struck(&self) -> bool {
        self.landed > 0
    }

    fn alive(&self) -> bool {
        self.hp > 0
    }
}

/// Post-combat damage owed by each side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PostCombatDamage {
    pub to_attacker: i32,
    pub to_defender: i32,
}

/// Buffs and debuffs carried into the next exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub buffs: StatLine,
    pub debuffs: StatLine,
}

/// Sums the post-combat damage both sides take.
pub fn post_combat_damage(
    attacker: Outcome<'_, '_>,
    defender: Outcome<'_, '_>,
) -> PostCombatDamage {
    let (a_self, a_foe) = damage_from(attacker, defender);
    let (d_self, d_foe) = damage_from(defender, attacker);
    PostCombatDamage {
        to_attacker: a_self + d_foe,
        to_defender: d_self + a_foe,
    }
}

/// `(damage to holder, damage to foe)` from the holder's effects.
fn damage_from(holder: Outcome<'_, '_>, foe: Outcome<'_, '_>) -> (i32, i32) {
    let role = holder.combatant.role;
    let mut to_self = 0;
    let mut to_foe = 0;

    for (_, effect) in holder.combatant.skills.effects() {
        match effect {
            SkillEffect::SelfDamage {
                amount,
                requires_attack,
            } => {
                if !requires_attack || holder.struck() {
                    to_self += amount;
                }
            }
            SkillEffect::FoeDamage {
                amount,
                kind,
                role: required,
            } => {
                if required.is_some_and(|r| r != role) {
                    continue;
                }
                let fires = match kind {
                    Aftermath::Poison => holder.struck() && holder.alive(),
                    Aftermath::Pain => foe.struck(),
                };
                if fires {
                    to_foe += amount;
                }
            }
            _ => {}
        }
    }
    (to_self, to_foe)
}

/// Applies post-combat damage without defeating the unit.
pub fn non_lethal(hp: i32, damage: i32) -> i32 {
    if hp <= 0 {
        0
    } else {
        (hp - damage.max(0)).max(1)
    }
}

/// Buff and debuff refresh for both sides, `(attacker, defender)`.
///
/// The attacker's buffs expire and are replaced by its own on-attack buffs;
/// the defender keeps its buffs. The attacker's debuffs are cleared and
/// replaced by whatever the surviving defender inflicts after striking. The
/// defender keeps its debuffs and takes the stronger of those and anything
/// the surviving attacker inflicts.
pub fn next_status(attacker: Outcome<'_, '_>, defender: Outcome<'_, '_>) -> (Status, Status) {
    let d_state = &defender.combatant.instance.state;

    let attacker_buffs = if attacker.struck() {
        strongest(attacker.combatant, |e| match e {
            SkillEffect::SelfBuff(line) => Some(*line),
            _ => None,
        })
    } else {
        StatLine::ZERO
    };
    let attacker_debuffs = inflicted(defender);
    let defender_debuffs = d_state.debuffs.max(&inflicted(attacker));

    (
        Status {
            buffs: attacker_buffs,
            debuffs: attacker_debuffs,
        },
        Status {
            buffs: d_state.buffs,
            debuffs: defender_debuffs,
        },
    )
}

/// Debuffs the holder puts on its foe, if it struck and survived.
fn inflicted(holder: Outcome<'_, '_>) -> StatLine {
    if !(holder.struck() && holder.alive()) {
        return StatLine::ZERO;
    }
    strongest(holder.combatant, |e| match e {
        SkillEffect::InflictDebuff(line) => Some(*line),
        _ => None,
    })
}

/// Per-stat maximum over matching effects. Buffs and debuffs do not stack.
fn strongest(
    combatant: &Combatant<'_>,
    pick: impl Fn(&SkillEffect) -> Option<StatLine>,
) -> StatLine {
    combatant
        .skills
        .effects()
        .filter_map(|(_, effect)| pick(effect))
        .fold(StatLine::ZERO, |acc, line| acc.max(&line))
}
