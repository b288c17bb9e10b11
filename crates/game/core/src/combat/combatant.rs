//! Per-side combat snapshot.
//!
//! Everything the planner and the strike loop need about one unit is
//! resolved once, up front, into a [`Combatant`]. Stats do not change while
//! the exchange runs; only HP and special charge do, and those live in the
//! resolver's running state.

use crate::env::{CatalogOracle, DamageKind, Exposure, UnitArchetype, WeaponType};
use crate::skills::{SkillEffect, SkillSet};
use crate::state::UnitInstance;
use crate::stats::{HpGauge, Level, StatKind, StatLine, resolve_stats};

use super::context::Role;

/// Equipped weapon as seen by combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponProfile {
    pub weapon_type: WeaponType,
    pub range: u8,
}

impl WeaponProfile {
    pub fn damage_kind(&self) -> DamageKind {
        self.weapon_type.damage_kind()
    }
}

/// Resolved snapshot of one side.
#[derive(Clone, Debug)]
pub struct Combatant<'a> {
    pub instance: &'a UnitInstance,
    pub archetype: &'a UnitArchetype,
    pub role: Role,
    /// Stats in this role. Max HP is `stats.hp`.
    pub stats: StatLine,
    pub gauge: HpGauge,
    pub skills: SkillSet<'a>,
    /// `None` when no weapon is equipped (or the equipped one is unknown).
    pub weapon: Option<WeaponProfile>,
}

impl<'a> Combatant<'a> {
    /// Resolves `instance` for combat in `role`.
    ///
    /// A unit with no stat data for its rarity enters combat with all stats
    /// at zero, which means it is already defeated.
    pub fn new(
        catalog: &'a (impl CatalogOracle + ?Sized),
        instance: &'a UnitInstance,
        role: Role,
        level: Level,
    ) -> Self {
        let archetype = catalog.lookup_archetype(&instance.archetype);
        let stats = resolve_stats(catalog, instance, level, Some(role)).unwrap_or(StatLine::ZERO);
        let gauge = HpGauge::new(stats.hp, instance.state.missing_hp);
        let skills = SkillSet::equip(catalog, instance, gauge);
        let weapon = skills.weapon().map(|definition| WeaponProfile {
            weapon_type: archetype.weapon,
            range: definition
                .params
                .range
                .unwrap_or_else(|| archetype.weapon.kind.default_range()),
        });

        Self {
            instance,
            archetype,
            role,
            stats,
            gauge,
            skills,
            weapon,
        }
    }

    pub fn stat(&self, stat: StatKind) -> i32 {
        self.stats[stat]
    }

    pub fn max_hp(&self) -> i32 {
        self.stats.hp
    }

    /// Active effect test, HP-gated.
    pub fn has(&self, predicate: impl Fn(&SkillEffect) -> bool) -> bool {
        self.skills.any(predicate)
    }

    /// Categories effectiveness can target on this unit.
    pub fn exposure(&self) -> Exposure {
        self.archetype.exposure()
    }

    pub fn weapon_type(&self) -> WeaponType {
        self.archetype.weapon
    }

    /// Defense or Resistance, whichever mitigates `kind`.
    pub fn mitigation(&self, kind: DamageKind) -> i32 {
        self.stat(kind.mitigating_stat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{catalog, unit};

    #[test]
    fn weapon_range_falls_back_to_weapon_kind() {
        let catalog = catalog();
        let swordsman = unit("Swordsman");
        let combatant = Combatant::new(&catalog, &swordsman, Role::Attacker, Level::Forty);
        let weapon = combatant.weapon.unwrap();
        assert_eq!(weapon.range, 1);
        assert_eq!(weapon.damage_kind(), DamageKind::Physical);
    }

    #[test]
    fn missing_weapon_leaves_profile_empty() {
        let catalog = catalog();
        let bare = unit("Swordsman").without_skill(crate::env::SkillSlot::Weapon);
        let combatant = Combatant::new(&catalog, &bare, Role::Defender, Level::Forty);
        assert!(combatant.weapon.is_none());
    }

    #[test]
    fn gauge_starts_from_missing_hp() {
        let catalog = catalog();
        let mut hurt = unit("Swordsman");
        hurt.state.missing_hp = 15;
        let combatant = Combatant::new(&catalog, &hurt, Role::Defender, Level::Forty);
        assert_eq!(combatant.gauge.current, combatant.max_hp() - 15);
    }
}
