//! Damage formula.
//!
//! All multipliers are integer percentages so every step truncates toward
//! zero exactly, with no floating point involved.

use crate::config::CombatConfig;
use crate::env::{Exposure, WeaponKind};
use crate::skills::SkillEffect;

use super::combatant::Combatant;

// ============================================================================
// Damage Parameters
// ============================================================================

/// Inputs of one damage computation.
///
/// Percentages are whole numbers: `effectiveness_pct = 150` is ×1.5,
/// `advantage_pct = -20` is −0.2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageParams {
    pub atk: i32,
    /// Effectiveness multiplier, 100 when not effective.
    pub effectiveness_pct: i32,
    /// Signed color-triangle modifier.
    pub advantage_pct: i32,
    /// Defender's Def or Res.
    pub mitigation: i32,
    /// Class-wide multiplier, 100 unless a penalty applies.
    pub class_pct: i32,
    /// Flat damage added before mitigation.
    pub bonus: i32,
    /// Offense multiplier on top of 100%.
    pub offense_pct: i32,
    /// Share of mitigation ignored.
    pub mitigation_pct: i32,
}

impl DamageParams {
    /// Identity parameters for `atk`.
    pub fn new(atk: i32) -> Self {
        Self {
            atk,
            effectiveness_pct: 100,
            advantage_pct: 0,
            mitigation: 0,
            class_pct: 100,
            bonus: 0,
            offense_pct: 0,
            mitigation_pct: 0,
        }
    }

    /// Baseline parameters for `unit` striking `foe`, before specials.
    ///
    /// # Arguments
    ///
    /// * `unit` - Striking side
    /// * `foe` - Side being struck
    /// * `advantage_pct` - Triangle modifier from [`advantage_pct`](super::triangle::advantage_pct)
    /// * `config` - Combat tunables
    pub fn between(
        unit: &Combatant<'_>,
        foe: &Combatant<'_>,
        advantage_pct: i32,
        config: &CombatConfig,
    ) -> Self {
        let Some(weapon) = unit.weapon else {
            return Self::new(0);
        };

        let effectiveness_pct = if is_effective(unit, foe) {
            100 + config.effective_bonus_pct
        } else {
            100
        };
        let class_pct = if weapon.weapon_type.kind == WeaponKind::Staff
            && !unit.has(|e| matches!(e, SkillEffect::FullStaffDamage))
        {
            config.staff_damage_pct
        } else {
            100
        };
        let bonus = if unit.has(|e| matches!(e, SkillEffect::BuffsAsDamage)) {
            unit.instance.state.buffs.combat_total()
        } else {
            0
        };

        Self {
            atk: unit.stats.atk,
            effectiveness_pct,
            advantage_pct,
            mitigation: foe.mitigation(weapon.damage_kind()),
            class_pct,
            bonus,
            offense_pct: 0,
            mitigation_pct: 0,
        }
    }
}

impl Default for DamageParams {
    fn default() -> Self {
        Self::new(0)
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Computes one hit's damage.
///
/// # Formula
///
/// ```text
/// raw       = atk × eff
/// adv       = raw × adv%
/// mitigated = max(raw + adv + bonus − (mit − mit × mit%), 0)
/// classed   = class% × mitigated
/// result    = (100% + offense%) × classed
/// ```
///
/// Each product truncates toward zero.
pub fn damage(params: &DamageParams) -> i32 {
    let raw = params.atk * params.effectiveness_pct / 100;
    let adv = raw * params.advantage_pct / 100;
    let ignored = params.mitigation * params.mitigation_pct / 100;
    let mitigated = (raw + adv + params.bonus - (params.mitigation - ignored)).max(0);
    let classed = params.class_pct * mitigated / 100;
    (100 + params.offense_pct) * classed / 100
}

/// Whether `unit`'s weapon is effective against `foe`, after `foe`'s
/// neutralization effects.
pub fn is_effective(unit: &Combatant<'_>, foe: &Combatant<'_>) -> bool {
    let exposure = foe.exposure();
    let targets = unit
        .skills
        .effects()
        .filter_map(|(_, effect)| match effect {
            SkillEffect::Effective(targets) => Some(*targets & exposure),
            _ => None,
        })
        .fold(Exposure::empty(), |acc, hit| acc | hit);
    if targets.is_empty() {
        return false;
    }

    let shielded = foe
        .skills
        .effects()
        .filter_map(|(_, effect)| match effect {
            SkillEffect::NeutralizeEffective(covered) => Some(*covered),
            _ => None,
        })
        .fold(Exposure::empty(), |acc, covered| acc | covered);
    !shielded.contains(targets)
}

/// Applies damage to current HP, floored at 0.
pub fn apply_damage(current_hp: i32, damage: i32) -> i32 {
    (current_hp - damage.max(0)).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Role;
    use crate::env::SkillSlot;
    use crate::stats::Level;
    use crate::testing::{catalog, unit};

    #[test]
    fn identity_parameters_return_attack() {
        for atk in [0, 1, 17, 53, 99] {
            assert_eq!(damage(&DamageParams::new(atk)), atk);
        }
    }

    #[test]
    fn every_step_truncates() {
        // raw = 33 * 150 / 100 = 49
        // adv = 49 * 20 / 100 = 9
        // mitigated = 49 + 9 + 0 - (25 - 25 * 30 / 100 = 7) = 40
        // classed = 50 * 40 / 100 = 20
        // result = 150 * 20 / 100 = 30
        let params = DamageParams {
            atk: 33,
            effectiveness_pct: 150,
            advantage_pct: 20,
            mitigation: 25,
            class_pct: 50,
            bonus: 0,
            offense_pct: 50,
            mitigation_pct: 30,
        };
        assert_eq!(damage(&params), 30);
    }

    #[test]
    fn negative_advantage_truncates_toward_zero() {
        // raw 47, adv = 47 * -20 / 100 = -9 (not -10)
        let params = DamageParams {
            advantage_pct: -20,
            ..DamageParams::new(47)
        };
        assert_eq!(damage(&params), 38);
    }

    #[test]
    fn mitigation_above_attack_floors_at_zero() {
        let params = DamageParams {
            mitigation: 60,
            ..DamageParams::new(20)
        };
        assert_eq!(damage(&params), 0);
        assert_eq!(apply_damage(5, 9), 0);
    }

    #[test]
    fn bow_is_effective_against_fliers_unless_shielded() {
        let catalog = catalog();
        let archer = unit("Archer");
        let flier = unit("Flier");
        let shielded = unit("Flier").with_skill(SkillSlot::PassiveA, "Iote's Shield");
        let bow = Combatant::new(&catalog, &archer, Role::Attacker, Level::Forty);
        let open = Combatant::new(&catalog, &flier, Role::Defender, Level::Forty);
        let safe = Combatant::new(&catalog, &shielded, Role::Defender, Level::Forty);

        assert!(is_effective(&bow, &open));
        assert!(!is_effective(&bow, &safe));
        assert!(!is_effective(&open, &bow));
    }

    #[test]
    fn staff_damage_is_halved() {
        let catalog = catalog();
        let cleric = unit("Cleric");
        let swordsman = unit("Swordsman");
        let staff = Combatant::new(&catalog, &cleric, Role::Attacker, Level::Forty);
        let foe = Combatant::new(&catalog, &swordsman, Role::Defender, Level::Forty);

        // atk 28 + 10 = 38, vs Res 15 → 23, halved → 11
        let params = DamageParams::between(&staff, &foe, 0, &CombatConfig::default());
        assert_eq!(params.class_pct, 50);
        assert_eq!(damage(&params), 11);
    }
}
