//! Typed ability effects.
//!
//! Every ability family the engine understands is a [`SkillEffect`] variant
//! with its own parameters. The planner, the damage step and the aftermath
//! step each match on the variants they care about.

use crate::combat::Role;
use crate::env::{DamageKind, Exposure, WeaponType};
use crate::stats::{HpGauge, StatKind, StatLine};

/// HP-percentage precondition carried by an ability's effect text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HpCondition {
    /// HP at combat start ≥ N% of max.
    AtLeast(i32),
    /// HP at combat start ≤ N% of max.
    AtMost(i32),
}

impl HpCondition {
    pub fn holds(&self, gauge: HpGauge) -> bool {
        match *self {
            HpCondition::AtLeast(pct) => gauge.percent_at_least(pct),
            HpCondition::AtMost(pct) => gauge.percent_at_most(pct),
        }
    }
}

/// Which post-combat damage rule a foe-damaging effect follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aftermath {
    /// Needs the holder to have attacked and survived.
    Poison,
    /// Needs the damaged foe to have landed at least one hit.
    Pain,
}

/// One classified ability effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Flat stat deltas, optionally only for one side of the exchange.
    StatBonus { delta: StatLine, role: Option<Role> },
    /// ×1.5 against units exposed to any listed category.
    Effective(Exposure),
    /// Cancels effectiveness against the holder for the listed categories.
    NeutralizeEffective(Exposure),
    /// Extra color-triangle magnitude, in percent.
    TriangleAdept { pct: i32 },
    /// Advantage against colorless foes.
    Raven,
    /// Two hits per attack when initiating.
    BraveStrike,
    /// Holder may counter at any range.
    CounterAnyRange,
    /// Neither side can counter.
    NoCounter,
    /// When initiating: no own follow-up, and a foe dealing `against` damage
    /// cannot counter if the holder leads in Spd by `speed_margin`.
    Sweep { against: DamageKind, speed_margin: i32 },
    /// Guaranteed follow-up for the holder and none for a foe wielding `target`.
    Breaker { target: WeaponType },
    /// Guaranteed follow-up, optionally role-restricted.
    GuaranteedFollowUp {
        role: Option<Role>,
        requires_counter: bool,
    },
    /// Neither side can follow up.
    NoFollowUp,
    /// Counter before the foe's first hit when defending.
    Vantage,
    /// Follow-up before the foe's counter when initiating.
    Desperation,
    /// Extra special charge per attack when Atk leads by `atk_margin`.
    HeavyBlade { atk_margin: i32 },
    /// Foe's special charges one slower per attack.
    Guard,
    /// Shift to the equipped special's cooldown.
    CooldownShift(i32),
    /// Flat damage added when the holder's special triggers.
    SpecialDamage(i32),
    /// Heal a share of damage dealt.
    Lifesteal { pct: i32 },
    /// Removes the staff damage penalty.
    FullStaffDamage,
    /// Adds the holder's total active buffs as bonus damage.
    BuffsAsDamage,
    /// Post-combat damage to the holder.
    SelfDamage { amount: i32, requires_attack: bool },
    /// Post-combat damage to the foe.
    FoeDamage {
        amount: i32,
        kind: Aftermath,
        role: Option<Role>,
    },
    /// Debuff put on the foe after combat.
    InflictDebuff(StatLine),
    /// Buff granted to the holder after it attacks.
    SelfBuff(StatLine),
    /// Special behavior, for abilities in the Special slot.
    Special(SpecialKind),
}

// ============================================================================
// Specials
// ============================================================================

/// Extra damage an on-attack special adds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialBonus {
    /// `pct`% of one of the holder's stats.
    Stat { stat: StatKind, pct: i32 },
    /// `pct`% of the holder's missing HP.
    MissingHp { pct: i32 },
}

/// Parameters of an on-attack special.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeSpecial {
    /// Damage multiplier above 100%.
    pub offense_pct: i32,
    /// Share of the foe's mitigation ignored.
    pub ignore_mit_pct: i32,
    pub bonus: Option<SpecialBonus>,
    /// Share of damage dealt healed back.
    pub heal_pct: i32,
}

impl StrikeSpecial {
    /// The magnitude the effect text is expected to state.
    pub(crate) fn primary_mut(&mut self) -> &mut i32 {
        if let Some(SpecialBonus::Stat { pct, .. } | SpecialBonus::MissingHp { pct }) =
            &mut self.bonus
        {
            pct
        } else if self.ignore_mit_pct > 0 {
            &mut self.ignore_mit_pct
        } else if self.offense_pct > 0 {
            &mut self.offense_pct
        } else {
            &mut self.heal_pct
        }
    }
}

/// Behavior of an equipped special.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialKind {
    /// Fires on the holder's own hit.
    Strike(StrikeSpecial),
    /// Cuts an incoming hit from range `range` by `pct`%.
    Reduction { pct: i32, range: u8 },
    /// Survive a lethal hit at 1 HP.
    Miracle,
    /// Pre-combat area damage, `pct`% of (Atk − mitigation).
    AreaBlast { pct: i32 },
    /// Charged by healing allies only.
    Healing,
    /// Grants another action after combat.
    Galeforce,
    /// Unrecognized special: charges, never fires.
    Inert,
}

impl SpecialKind {
    /// Healing specials charge only from healing allies, never in combat.
    pub fn charges_in_combat(&self) -> bool {
        !matches!(self, SpecialKind::Healing)
    }
}
