//! Equipped-skill lookups with HP gating.
//!
//! A [`SkillSet`] is built once per combatant from the catalog and the unit's
//! loadout. Its predicates apply each ability's HP precondition against the
//! HP gauge at combat start, so callers never re-check thresholds.

use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::env::{AbilityDefinition, CatalogOracle, SkillSlot};
use crate::state::UnitInstance;
use crate::stats::HpGauge;

use super::effect::{SkillEffect, SpecialKind};

const SLOT_COUNT: usize = 7;

/// Resolved loadout of one unit.
#[derive(Clone, Debug)]
pub struct SkillSet<'a> {
    equipped: ArrayVec<&'a AbilityDefinition, SLOT_COUNT>,
    gauge: HpGauge,
}

impl<'a> SkillSet<'a> {
    /// Looks up every equipped ability. Unknown names are dropped with a warning.
    pub fn equip(
        catalog: &'a (impl CatalogOracle + ?Sized),
        instance: &UnitInstance,
        gauge: HpGauge,
    ) -> Self {
        let mut equipped = ArrayVec::new();
        for slot in SkillSlot::iter() {
            let Some(name) = instance.loadout.get(slot) else {
                continue;
            };
            match catalog.lookup_ability(slot, name) {
                Some(definition) => equipped.push(definition),
                None => tracing::warn!(
                    unit = %instance.archetype,
                    slot = %slot,
                    ability = name,
                    "equipped ability not in catalog, ignoring"
                ),
            }
        }
        Self { equipped, gauge }
    }

    /// Definition in `slot`, regardless of HP gating.
    pub fn definition(&self, slot: SkillSlot) -> Option<&'a AbilityDefinition> {
        self.equipped.iter().copied().find(|def| def.slot == slot)
    }

    /// True when the ability's HP precondition (if any) holds.
    pub fn is_active(&self, definition: &AbilityDefinition) -> bool {
        definition
            .hp_condition()
            .is_none_or(|condition| condition.holds(self.gauge))
    }

    /// Name-pattern match on the ability in `slot`, HP-gated.
    pub fn has(&self, slot: SkillSlot, pattern: &str) -> bool {
        let pattern = pattern.to_ascii_lowercase();
        self.definition(slot).is_some_and(|def| {
            def.name.to_ascii_lowercase().contains(&pattern) && self.is_active(def)
        })
    }

    /// Effects of every active ability, in slot order.
    pub fn effects(&self) -> impl Iterator<Item = (SkillSlot, &'a SkillEffect)> + '_ {
        self.equipped
            .iter()
            .copied()
            .filter(|def| self.is_active(def))
            .flat_map(|def| def.effects().iter().map(move |effect| (def.slot, effect)))
    }

    /// True if any active effect satisfies `predicate`.
    pub fn any(&self, predicate: impl Fn(&SkillEffect) -> bool) -> bool {
        self.effects().any(|(_, effect)| predicate(effect))
    }

    /// Sum of `f` over all active effects.
    pub fn sum(&self, f: impl Fn(&SkillEffect) -> Option<i32>) -> i32 {
        self.effects().filter_map(|(_, effect)| f(effect)).sum()
    }

    pub fn weapon(&self) -> Option<&'a AbilityDefinition> {
        self.definition(SkillSlot::Weapon)
    }

    /// Equipped special and its cooldown. Specials are never HP-gated.
    pub fn special(&self) -> Option<(&'a AbilityDefinition, &'a SpecialKind)> {
        let definition = self.definition(SkillSlot::Special)?;
        definition.special_kind().map(|kind| (definition, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{catalog, unit};

    #[test]
    fn unknown_abilities_are_skipped() {
        let catalog = catalog();
        let mut instance = unit("Swordsman");
        instance.loadout.passive_c = Some("Not A Real Skill".into());
        let skills = SkillSet::equip(&catalog, &instance, HpGauge::full(40));
        assert!(skills.definition(SkillSlot::PassiveC).is_none());
        assert!(skills.definition(SkillSlot::Weapon).is_some());
    }

    #[test]
    fn has_respects_hp_gate() {
        let catalog = catalog();
        let mut instance = unit("Swordsman");
        instance.loadout.passive_b = Some("Vantage 3".into());

        let full = SkillSet::equip(&catalog, &instance, HpGauge::full(40));
        assert!(!full.has(SkillSlot::PassiveB, "Vantage"));

        // 30 / 40 = 75%
        let hurt = SkillSet::equip(&catalog, &instance, HpGauge::new(40, 10));
        assert!(hurt.has(SkillSlot::PassiveB, "vantage"));
    }

    #[test]
    fn gated_effects_disappear_from_effect_iteration() {
        let catalog = catalog();
        let mut instance = unit("Swordsman");
        instance.loadout.passive_b = Some("Vantage 3".into());

        let full = SkillSet::equip(&catalog, &instance, HpGauge::full(40));
        assert!(!full.any(|effect| matches!(effect, SkillEffect::Vantage)));
        let hurt = SkillSet::equip(&catalog, &instance, HpGauge::new(40, 30));
        assert!(hurt.any(|effect| matches!(effect, SkillEffect::Vantage)));
    }
}
