//! Unit instances: a configured archetype plus its transient combat state.
//!
//! Instances are plain values. The engine reads them and returns fresh
//! [`TransientState`]s for the caller to persist; it never mutates its input.

use crate::env::{SkillSlot, Spread, UnitArchetype};
use crate::stats::{MAX_MERGES, StatKind, StatLine};

use super::error::InstanceError;

/// Lowest and highest rarity.
pub const RARITY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

// ============================================================================
// Variance
// ============================================================================

/// Optional boon and bane.
///
/// Boon and bane must name different stats. This is not enforced on
/// construction; see [`UnitInstance::validate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Variance {
    pub boon: Option<StatKind>,
    pub bane: Option<StatKind>,
}

impl Variance {
    pub const NEUTRAL: Variance = Variance {
        boon: None,
        bane: None,
    };

    pub fn new(boon: Option<StatKind>, bane: Option<StatKind>) -> Self {
        Self { boon, bane }
    }

    /// Level-1 adjustment: +1 for the boon, −1 for the bane.
    pub fn shift(&self, stat: StatKind) -> i32 {
        if self.boon == Some(stat) {
            1
        } else if self.bane == Some(stat) {
            -1
        } else {
            0
        }
    }

    /// Level-40 member of the spread for `stat`.
    pub fn pick(&self, stat: StatKind, spread: Spread) -> i32 {
        match self.shift(stat) {
            1 => spread.high(),
            -1 => spread.low(),
            _ => spread.mid(),
        }
    }
}

// ============================================================================
// Loadout
// ============================================================================

/// One optional ability name per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Loadout {
    pub weapon: Option<String>,
    pub assist: Option<String>,
    pub special: Option<String>,
    pub passive_a: Option<String>,
    pub passive_b: Option<String>,
    pub passive_c: Option<String>,
    pub seal: Option<String>,
}

impl Loadout {
    pub fn get(&self, slot: SkillSlot) -> Option<&str> {
        self.slot(slot).as_deref()
    }

    pub fn set(&mut self, slot: SkillSlot, name: Option<String>) {
        *self.slot_mut(slot) = name;
    }

    fn slot(&self, slot: SkillSlot) -> &Option<String> {
        match slot {
            SkillSlot::Weapon => &self.weapon,
            SkillSlot::Assist => &self.assist,
            SkillSlot::Special => &self.special,
            SkillSlot::PassiveA => &self.passive_a,
            SkillSlot::PassiveB => &self.passive_b,
            SkillSlot::PassiveC => &self.passive_c,
            SkillSlot::Seal => &self.seal,
        }
    }

    fn slot_mut(&mut self, slot: SkillSlot) -> &mut Option<String> {
        match slot {
            SkillSlot::Weapon => &mut self.weapon,
            SkillSlot::Assist => &mut self.assist,
            SkillSlot::Special => &mut self.special,
            SkillSlot::PassiveA => &mut self.passive_a,
            SkillSlot::PassiveB => &mut self.passive_b,
            SkillSlot::PassiveC => &mut self.passive_c,
            SkillSlot::Seal => &mut self.seal,
        }
    }
}

// ============================================================================
// Transient State
// ============================================================================

/// State carried from one exchange to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransientState {
    /// HP below max at the start of combat.
    pub missing_hp: i32,
    /// Special charge already accumulated (0 = fresh).
    pub special_charge: u8,
    /// Non-negative buff magnitudes.
    pub buffs: StatLine,
    /// Non-negative debuff magnitudes.
    pub debuffs: StatLine,
}

// ============================================================================
// Unit Instance
// ============================================================================

/// A specific configured unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitInstance {
    /// Archetype name, resolved through the catalog.
    pub archetype: String,
    pub rarity: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variance: Variance,
    #[cfg_attr(feature = "serde", serde(default))]
    pub merges: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loadout: Loadout,
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: TransientState,
}

impl UnitInstance {
    /// Neutral, unmerged instance with nothing equipped.
    pub fn new(archetype: impl Into<String>, rarity: u8) -> Self {
        Self {
            archetype: archetype.into(),
            rarity,
            variance: Variance::NEUTRAL,
            merges: 0,
            loadout: Loadout::default(),
            state: TransientState::default(),
        }
    }

    /// Instance wearing the archetype's default skills for `rarity`.
    pub fn with_default_loadout(archetype: &UnitArchetype, rarity: u8) -> Self {
        let mut instance = Self::new(archetype.name.clone(), rarity);
        for skill in &archetype.skills {
            if let Some(name) = archetype.default_skill(skill.slot, rarity) {
                instance.loadout.set(skill.slot, Some(name.to_string()));
            }
        }
        instance
    }

    #[must_use]
    pub fn with_variance(mut self, boon: Option<StatKind>, bane: Option<StatKind>) -> Self {
        self.variance = Variance::new(boon, bane);
        self
    }

    #[must_use]
    pub fn with_merges(mut self, merges: u8) -> Self {
        self.merges = merges;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, slot: SkillSlot, name: impl Into<String>) -> Self {
        self.loadout.set(slot, Some(name.into()));
        self
    }

    #[must_use]
    pub fn without_skill(mut self, slot: SkillSlot) -> Self {
        self.loadout.set(slot, None);
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: TransientState) -> Self {
        self.state = state;
        self
    }

    /// Checks the construction invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`InstanceError`] found.
    pub fn validate(&self) -> Result<(), InstanceError> {
        if !RARITY_RANGE.contains(&self.rarity) {
            return Err(InstanceError::RarityOutOfRange {
                rarity: self.rarity,
            });
        }
        if self.merges > MAX_MERGES {
            return Err(InstanceError::MergeOutOfRange {
                merges: self.merges,
                max: MAX_MERGES,
            });
        }
        if let (Some(boon), Some(bane)) = (self.variance.boon, self.variance.bane)
            && boon == bane
        {
            return Err(InstanceError::BoonEqualsBane { stat: boon });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variance_picks_from_spread() {
        let spread = Spread(30, 33, 36);
        let variance = Variance::new(Some(StatKind::Atk), Some(StatKind::Def));
        assert_eq!(variance.pick(StatKind::Atk, spread), 36);
        assert_eq!(variance.pick(StatKind::Def, spread), 30);
        assert_eq!(variance.pick(StatKind::Spd, spread), 33);
    }

    #[test]
    fn loadout_get_and_set_round_trip_every_slot() {
        use strum::IntoEnumIterator;

        let mut loadout = Loadout::default();
        for slot in SkillSlot::iter() {
            loadout.set(slot, Some(slot.to_string()));
        }
        for slot in SkillSlot::iter() {
            assert_eq!(loadout.get(slot), Some(slot.to_string().as_str()));
        }
    }

    #[test]
    fn validate_rejects_same_boon_and_bane() {
        let unit = UnitInstance::new("Generic", 5)
            .with_variance(Some(StatKind::Spd), Some(StatKind::Spd));
        assert_eq!(
            unit.validate(),
            Err(InstanceError::BoonEqualsBane { stat: StatKind::Spd })
        );
    }

    #[test]
    fn validate_rejects_out_of_range_rarity_and_merges() {
        assert!(matches!(
            UnitInstance::new("Generic", 6).validate(),
            Err(InstanceError::RarityOutOfRange { rarity: 6 })
        ));
        assert!(matches!(
            UnitInstance::new("Generic", 5).with_merges(11).validate(),
            Err(InstanceError::MergeOutOfRange { merges: 11, .. })
        ));
        assert!(UnitInstance::new("Generic", 5).with_merges(10).validate().is_ok());
    }

    #[test]
    fn default_loadout_follows_rarity() {
        use crate::env::LearnableSkill;

        let mut archetype = UnitArchetype::generic();
        archetype.skills = vec![
            LearnableSkill {
                slot: SkillSlot::Weapon,
                name: "Iron Sword".into(),
                rarity: 1,
            },
            LearnableSkill {
                slot: SkillSlot::Weapon,
                name: "Steel Sword".into(),
                rarity: 3,
            },
            LearnableSkill {
                slot: SkillSlot::PassiveA,
                name: "Death Blow 3".into(),
                rarity: 5,
            },
        ];
        let unit = UnitInstance::with_default_loadout(&archetype, 3);
        assert_eq!(unit.loadout.get(SkillSlot::Weapon), Some("Steel Sword"));
        assert_eq!(unit.loadout.get(SkillSlot::PassiveA), None);
    }
}
