//! Stat resolution for unit instances.
//!
//! # Architecture
//!
//! ```text
//! Level 1:   base(rarity) ± variance
//! Level 40:  spread(rarity, variance)
//!              + merge bonus
//!              + weapon might                  (Atk)
//!              + Weapon / A / Seal stat deltas (role-matched, HP-gated)
//!              + buffs − debuffs
//!            floored at 0
//! ```
//!
//! HP gating needs the unit's max HP, and max HP itself is computed with
//! every HP-gated delta included. A max-HP bonus therefore never depends on
//! the HP it produces.

use strum::IntoEnumIterator;

use crate::combat::Role;
use crate::env::{AbilityDefinition, CatalogOracle, SkillSlot, SpreadLine};
use crate::error::{ErrorSeverity, GameError};
use crate::skills::SkillEffect;
use crate::state::UnitInstance;

use super::bonus::{StatSource, StatStack};
use super::core::{StatKind, StatLine};
use super::gauge::HpGauge;
use super::merge::merge_bonus;

/// Level a stat is resolved at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum Level {
    One,
    Forty,
}

/// Only levels 1 and 40 carry base stat data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no stat data for level {0}, expected 1 or 40")]
pub struct LevelError(pub u8);

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "STATS_LEVEL"
    }
}

impl TryFrom<u8> for Level {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::One),
            40 => Ok(Level::Forty),
            other => Err(LevelError(other)),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        match level {
            Level::One => 1,
            Level::Forty => 40,
        }
    }
}

/// Resolves one stat.
///
/// Returns `None` when the archetype has no data for the instance's rarity.
/// Callers must treat that as "unknown" rather than zero.
///
/// # Arguments
///
/// * `catalog` - Reference catalog
/// * `instance` - Unit to resolve
/// * `stat` - Stat to resolve
/// * `level` - Level 1 or 40
/// * `role` - Combat role, or `None` outside combat (role-conditional bonuses are absent)
pub fn resolve_stat(
    catalog: &(impl CatalogOracle + ?Sized),
    instance: &UnitInstance,
    stat: StatKind,
    level: Level,
    role: Option<Role>,
) -> Option<i32> {
    stat_breakdown(catalog, instance, stat, level, role).map(|stack| stack.total())
}

/// Resolves all five stats. See [`resolve_stat`].
pub fn resolve_stats(
    catalog: &(impl CatalogOracle + ?Sized),
    instance: &UnitInstance,
    level: Level,
    role: Option<Role>,
) -> Option<StatLine> {
    let resolver = Resolver::new(catalog, instance, level, role)?;
    let mut line = StatLine::ZERO;
    for stat in StatKind::iter() {
        line[stat] = resolver.stack(stat).total();
    }
    Some(line)
}

/// Contribution ledger behind [`resolve_stat`].
pub fn stat_breakdown(
    catalog: &(impl CatalogOracle + ?Sized),
    instance: &UnitInstance,
    stat: StatKind,
    level: Level,
    role: Option<Role>,
) -> Option<StatStack> {
    Resolver::new(catalog, instance, level, role).map(|resolver| resolver.stack(stat))
}

struct Resolver<'a> {
    instance: &'a UnitInstance,
    level: Level,
    role: Option<Role>,
    level1: StatLine,
    level40: SpreadLine,
    equipped: Vec<&'a AbilityDefinition>,
    gauge: HpGauge,
}

impl<'a> Resolver<'a> {
    fn new(
        catalog: &'a (impl CatalogOracle + ?Sized),
        instance: &'a UnitInstance,
        level: Level,
        role: Option<Role>,
    ) -> Option<Self> {
        let archetype = catalog.lookup_archetype(&instance.archetype);
        let Some(base) = archetype.rarity_stats(instance.rarity) else {
            tracing::warn!(
                archetype = %archetype.name,
                rarity = instance.rarity,
                "no base stats for rarity"
            );
            return None;
        };

        let equipped = SkillSlot::STAT_SLOTS
            .iter()
            .filter_map(|&slot| {
                let name = instance.loadout.get(slot)?;
                catalog.lookup_ability(slot, name)
            })
            .collect();

        let mut resolver = Self {
            instance,
            level,
            role,
            level1: base.level1,
            level40: base.level40,
            equipped,
            gauge: HpGauge::full(0),
        };
        let max_hp = resolver.build(StatKind::Hp, false).total();
        resolver.gauge = HpGauge::new(max_hp, instance.state.missing_hp);
        Some(resolver)
    }

    fn stack(&self, stat: StatKind) -> StatStack {
        // max HP is never gated on itself
        self.build(stat, stat != StatKind::Hp)
    }

    fn build(&self, stat: StatKind, gated: bool) -> StatStack {
        let variance = self.instance.variance;
        match self.level {
            Level::One => StatStack::new(self.level1[stat] + variance.shift(stat)),
            Level::Forty => {
                let mut stack = StatStack::new(variance.pick(stat, self.level40.get(stat)));
                stack.add(
                    StatSource::Merge,
                    merge_bonus(&self.level1, self.instance.merges, stat),
                );
                if stat == StatKind::Atk {
                    let might = self
                        .equipped
                        .iter()
                        .find(|def| def.slot == SkillSlot::Weapon)
                        .map_or(0, |def| def.might());
                    stack.add(StatSource::WeaponMight, might);
                }
                stack.add(StatSource::Skill, self.skill_delta(stat, gated));
                stack.add(StatSource::Buff, self.instance.state.buffs[stat]);
                stack.add(StatSource::Debuff, -self.instance.state.debuffs[stat]);
                stack
            }
        }
    }

    fn skill_delta(&self, stat: StatKind, gated: bool) -> i32 {
        self.equipped
            .iter()
            .filter(|def| {
                !gated
                    || def
                        .hp_condition()
                        .is_none_or(|condition| condition.holds(self.gauge))
            })
            .flat_map(|def| def.effects())
            .filter_map(|effect| match effect {
                SkillEffect::StatBonus { delta, role }
                    if role.is_none_or(|r| Some(r) == self.role) =>
                {
                    Some(delta[stat])
                }
                _ => None,
            })
            .sum()
    }
}
