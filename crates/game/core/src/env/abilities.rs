//! Ability definitions as supplied by the reference catalog.
//!
//! The raw record (name, slot, numeric parameters, effect text) is classified
//! exactly once, when the definition is built. Everything downstream works
//! on the typed [`SkillEffect`] list and never looks at the text again.

use strum::{Display, EnumIter, EnumString};

use crate::skills::{self, HpCondition, SkillEffect, SpecialKind};

/// Loadout slot an ability is equipped in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum SkillSlot {
    Weapon,
    Assist,
    Special,
    #[strum(to_string = "A", serialize = "PassiveA")]
    PassiveA,
    #[strum(to_string = "B", serialize = "PassiveB")]
    PassiveB,
    #[strum(to_string = "C", serialize = "PassiveC")]
    PassiveC,
    #[strum(to_string = "S", serialize = "Seal")]
    Seal,
}

impl SkillSlot {
    /// Slots whose flat stat deltas count toward resolved stats.
    pub const STAT_SLOTS: [SkillSlot; 3] =
        [SkillSlot::Weapon, SkillSlot::PassiveA, SkillSlot::Seal];
}

/// Numeric parameters that depend on the ability's slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityParams {
    /// Weapon might.
    pub might: Option<i32>,
    /// Weapon range. Falls back to the weapon kind's default.
    pub range: Option<u8>,
    /// Special cooldown.
    pub cooldown: Option<u8>,
}

/// Immutable, classified ability definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityDefinition {
    pub name: String,
    pub slot: SkillSlot,
    pub params: AbilityParams,
    pub description: String,
    /// Movement/weapon gating for inheritance. Not used in combat.
    pub inherit: Option<String>,
    effects: Vec<SkillEffect>,
    hp_condition: Option<HpCondition>,
}

impl AbilityDefinition {
    /// Builds and classifies a definition.
    pub fn new(
        name: impl Into<String>,
        slot: SkillSlot,
        params: AbilityParams,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let description = description.into();
        let classified = skills::classify(slot, &name, &description);
        tracing::trace!(
            ability = %name,
            slot = %slot,
            effects = classified.effects.len(),
            "classified ability"
        );

        Self {
            name,
            slot,
            params,
            description,
            inherit: None,
            effects: classified.effects,
            hp_condition: classified.hp_condition,
        }
    }

    pub fn with_inherit(mut self, inherit: impl Into<String>) -> Self {
        self.inherit = Some(inherit.into());
        self
    }

    /// Typed effects, in description order.
    pub fn effects(&self) -> &[SkillEffect] {
        &self.effects
    }

    /// HP-percentage precondition from the effect text, if any.
    pub fn hp_condition(&self) -> Option<HpCondition> {
        self.hp_condition
    }

    pub fn might(&self) -> i32 {
        self.params.might.unwrap_or(0)
    }

    /// Special kind, for abilities equipped in the Special slot.
    pub fn special_kind(&self) -> Option<&SpecialKind> {
        self.effects.iter().find_map(|effect| match effect {
            SkillEffect::Special(kind) => Some(kind),
            _ => None,
        })
    }

    /// All integer literals in the description, left to right.
    pub fn numbers(&self) -> Vec<i32> {
        skills::extract_numbers(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_parses_letter_and_long_form() {
        assert_eq!("A".parse::<SkillSlot>().unwrap(), SkillSlot::PassiveA);
        assert_eq!("PassiveB".parse::<SkillSlot>().unwrap(), SkillSlot::PassiveB);
        assert_eq!("seal".parse::<SkillSlot>().unwrap(), SkillSlot::Seal);
        assert_eq!(SkillSlot::PassiveC.to_string(), "C");
    }

    #[test]
    fn numbers_come_from_the_description() {
        let fortress = AbilityDefinition::new(
            "Fortress Def 3",
            SkillSlot::PassiveA,
            AbilityParams::default(),
            "Grants Def+5. Inflicts Atk-3.",
        );
        assert_eq!(fortress.numbers(), vec![5, 3]);
    }
}
