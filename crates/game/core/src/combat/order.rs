//! Attack order planning.
//!
//! # Architecture
//!
//! ```text
//! no attacker weapon ─────────────────────────────▶ []
//! can_counter   = defender armed ∧ ¬NoCounter ∧ ¬sweep ∧ (same range ∨ any-range counter)
//! follow-ups    = guarantee ⊕ denial, else Spd lead ≥ threshold
//! vantage       = defender Vantage ∧ can_counter
//! desperation   = attacker Desperation ∧ attacker follows up
//!
//! [vantage D] → A (×2 brave) → [desperation A (×2)] → [D if countering and not vantage]
//!             → [A follow-up (×2) unless desperation] → [D follow-up]
//! ```

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::env::{WeaponKind, WeaponType};
use crate::skills::SkillEffect;
use crate::stats::StatKind;

use super::combatant::Combatant;
use super::context::Role;

/// Planned strikes, each naming the side that attacks.
pub type AttackOrder = ArrayVec<Role, { CombatConfig::MAX_STRIKES }>;

/// Decisions behind a planned order, kept for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrderPlan {
    pub can_counter: bool,
    pub attacker_follows_up: bool,
    pub defender_follows_up: bool,
    pub vantage: bool,
    pub desperation: bool,
    pub strikes_per_attack: u8,
}

/// Plans the strike sequence for `attacker` initiating against `defender`.
pub fn plan_attack_order(
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    config: &CombatConfig,
) -> AttackOrder {
    let mut order = AttackOrder::new();
    let Some(plan) = plan(attacker, defender, config) else {
        return order;
    };

    let a = usize::from(plan.strikes_per_attack);
    if plan.vantage {
        order.push(Role::Defender);
    }
    order.extend(std::iter::repeat_n(Role::Attacker, a));
    if plan.desperation {
        order.extend(std::iter::repeat_n(Role::Attacker, a));
    }
    if plan.can_counter && !plan.vantage {
        order.push(Role::Defender);
    }
    if plan.attacker_follows_up && !plan.desperation {
        order.extend(std::iter::repeat_n(Role::Attacker, a));
    }
    if plan.can_counter && plan.defender_follows_up {
        order.push(Role::Defender);
    }

    tracing::debug!(
        attacker = %attacker.archetype.name,
        defender = %defender.archetype.name,
        ?plan,
        ?order,
        "planned attack order"
    );
    order
}

/// Evaluates every ordering rule. `None` when the attacker is unarmed.
pub fn plan(
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    config: &CombatConfig,
) -> Option<OrderPlan> {
    attacker.weapon?;

    let can_counter = can_counter(attacker, defender);
    let attacker_follows_up = does_follow_up(attacker, defender, can_counter, config);
    let defender_follows_up = does_follow_up(defender, attacker, can_counter, config);
    let vantage = can_counter && defender.has(|e| matches!(e, SkillEffect::Vantage));
    let desperation =
        attacker_follows_up && attacker.has(|e| matches!(e, SkillEffect::Desperation));
    let strikes_per_attack = if attacker.has(|e| matches!(e, SkillEffect::BraveStrike)) {
        2
    } else {
        1
    };

    Some(OrderPlan {
        can_counter,
        attacker_follows_up,
        defender_follows_up,
        vantage,
        desperation,
        strikes_per_attack,
    })
}

/// Whether the defender gets to strike at all.
pub fn can_counter(attacker: &Combatant<'_>, defender: &Combatant<'_>) -> bool {
    let (Some(attack_weapon), Some(defend_weapon)) = (attacker.weapon, defender.weapon) else {
        return false;
    };

    let no_counter = |e: &SkillEffect| matches!(e, SkillEffect::NoCounter);
    if attacker.has(no_counter) || defender.has(no_counter) {
        return false;
    }

    let speed_lead = attacker.stat(StatKind::Spd) - defender.stat(StatKind::Spd);
    let swept = attacker.has(|e| match e {
        SkillEffect::Sweep {
            against,
            speed_margin,
        } => *against == defend_weapon.damage_kind() && speed_lead >= *speed_margin,
        _ => false,
    });
    if swept {
        return false;
    }

    attack_weapon.range == defend_weapon.range
        || defender.has(|e| matches!(e, SkillEffect::CounterAnyRange))
}

/// Whether `unit` makes a follow-up attack against `foe`.
///
/// A guarantee and a denial cancel out; either on its own decides. With
/// neither (or both) the Spd lead decides.
pub fn does_follow_up(
    unit: &Combatant<'_>,
    foe: &Combatant<'_>,
    can_counter: bool,
    config: &CombatConfig,
) -> bool {
    let foe_weapon = foe.weapon_type();
    let own_weapon = unit.weapon_type();

    let guaranteed = unit.has(|e| match e {
        SkillEffect::Breaker { target } => breaks(*target, foe_weapon),
        SkillEffect::GuaranteedFollowUp {
            role,
            requires_counter,
        } => role.is_none_or(|r| r == unit.role) && (!*requires_counter || can_counter),
        _ => false,
    });

    let denied = foe
        .has(|e| matches!(e, SkillEffect::Breaker { target } if breaks(*target, own_weapon)))
        || unit.has(|e| matches!(e, SkillEffect::NoFollowUp))
        || foe.has(|e| matches!(e, SkillEffect::NoFollowUp))
        || (unit.role == Role::Attacker && unit.has(|e| matches!(e, SkillEffect::Sweep { .. })));

    match (guaranteed, denied) {
        (true, false) => true,
        (false, true) => false,
        _ => unit.stat(StatKind::Spd) - foe.stat(StatKind::Spd) >= config.follow_up_threshold,
    }
}

/// Breaker targets match on weapon kind, and on color for tomes.
fn breaks(target: WeaponType, weapon: WeaponType) -> bool {
    target.kind == weapon.kind && (target.kind != WeaponKind::Tome || target.color == weapon.color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SkillSlot;
    use crate::state::UnitInstance;
    use crate::stats::Level;
    use crate::testing::{catalog, unit};

    use Role::{Attacker as A, Defender as D};

    fn order_of(attacker: &UnitInstance, defender: &UnitInstance) -> Vec<Role> {
        let catalog = catalog();
        let a = Combatant::new(&catalog, attacker, Role::Attacker, Level::Forty);
        let d = Combatant::new(&catalog, defender, Role::Defender, Level::Forty);
        plan_attack_order(&a, &d, &CombatConfig::default()).to_vec()
    }

    #[test]
    fn unarmed_attacker_plans_nothing() {
        let bare = unit("Swordsman").without_skill(SkillSlot::Weapon);
        assert!(order_of(&bare, &unit("Axeman")).is_empty());
    }

    #[test]
    fn faster_attacker_follows_up() {
        // Spd 30 vs 20
        assert_eq!(order_of(&unit("Swordsman"), &unit("Lancer")), vec![A, D, A]);
        // Spd 20 vs 30
        assert_eq!(order_of(&unit("Lancer"), &unit("Swordsman")), vec![A, D, D]);
    }

    #[test]
    fn speed_lead_must_reach_threshold() {
        // Swordsman leads Axeman by exactly 5; Mage leads Axeman by 1
        assert_eq!(order_of(&unit("Axeman"), &unit("Swordsman")), vec![A, D, D]);
        assert_eq!(order_of(&unit("Mage"), &unit("Axeman")), vec![A]);
    }

    #[test]
    fn range_mismatch_blocks_counter_unless_close_counter() {
        let mage = unit("Mage");
        // bow-range tome against a sword: no counter at all
        assert_eq!(order_of(&mage, &unit("Swordsman")), vec![A]);

        // Spd 30 - 26 = 4, no follow-up for the counter either
        let close = unit("Swordsman").with_skill(SkillSlot::PassiveA, "Close Counter");
        assert_eq!(order_of(&mage, &close), vec![A, D]);
    }

    #[test]
    fn brave_weapon_doubles_each_attack() {
        let brave = unit("Swordsman").with_skill(SkillSlot::Weapon, "Brave Sword");
        // Spd 30 - 5 = 25 vs Lancer 20 → follow-up
        assert_eq!(order_of(&brave, &unit("Lancer")), vec![A, A, D, A, A]);
    }

    #[test]
    fn vantage_needs_low_hp_and_a_counter() {
        let mut vantage = unit("Swordsman").with_skill(SkillSlot::PassiveB, "Vantage 3");
        vantage.state.missing_hp = 20;
        // Axeman Spd 25 vs Swordsman 30: defender follows up
        assert_eq!(order_of(&unit("Axeman"), &vantage), vec![D, A, D]);

        vantage.state.missing_hp = 0;
        assert_eq!(order_of(&unit("Axeman"), &vantage), vec![A, D, D]);
    }

    #[test]
    fn desperation_moves_follow_up_before_counter() {
        let mut desperate = unit("Swordsman").with_skill(SkillSlot::PassiveB, "Desperation 3");
        desperate.state.missing_hp = 20;
        assert_eq!(order_of(&desperate, &unit("Lancer")), vec![A, A, D]);
    }

    #[test]
    fn breaker_forces_and_denies_follow_ups() {
        let breaker = unit("Axeman").with_skill(SkillSlot::PassiveB, "Swordbreaker 3");
        // Swordsman Spd 30 vs Axeman 25 would normally follow up
        assert_eq!(order_of(&unit("Swordsman"), &breaker), vec![A, D, D]);
        assert_eq!(order_of(&breaker, &unit("Swordsman")), vec![A, D, A]);
    }

    #[test]
    fn wary_fighter_stops_everyone() {
        let wary = unit("Lancer").with_skill(SkillSlot::PassiveB, "Wary Fighter 3");
        assert_eq!(order_of(&unit("Swordsman"), &wary), vec![A, D]);
    }

    #[test]
    fn windsweep_blocks_physical_counters_and_own_follow_up() {
        let windsweep = unit("Swordsman").with_skill(SkillSlot::Weapon, "Windsweep");
        // Spd 30 vs 20: no lance counter, and no follow-up either
        assert_eq!(order_of(&windsweep, &unit("Lancer")), vec![A]);

        // Spd 20 vs 30 gives no lead, so the counter stands
        let slow = unit("Lancer").with_skill(SkillSlot::Weapon, "Windsweep");
        assert_eq!(order_of(&slow, &unit("Swordsman")), vec![A, D, D]);
    }

    #[test]
    fn sweep_matches_only_the_named_damage_kind() {
        let watersweep = unit("Swordsman").with_skill(SkillSlot::Weapon, "Watersweep");
        // a lance is physical: the counter stands, the follow-up is still lost
        assert_eq!(order_of(&watersweep, &unit("Lancer")), vec![A, D]);

        // Mage Spd 26 vs Cleric 24 against a magical staff
        let mage = unit("Mage").with_skill(SkillSlot::Weapon, "Watersweep");
        assert_eq!(order_of(&unit("Mage"), &unit("Cleric")), vec![A, D]);
        assert_eq!(order_of(&mage, &unit("Cleric")), vec![A]);
    }

    #[test]
    fn sweep_does_nothing_for_a_defender() {
        let windsweep = unit("Swordsman").with_skill(SkillSlot::Weapon, "Windsweep");
        assert_eq!(
            order_of(&unit("Lancer"), &windsweep),
            order_of(&unit("Lancer"), &unit("Swordsman"))
        );
        assert_eq!(order_of(&unit("Lancer"), &windsweep), vec![A, D, D]);
    }

    #[test]
    fn firesweep_stops_counters_both_ways() {
        let firesweep = unit("Swordsman").with_skill(SkillSlot::Weapon, "Firesweep Sword");
        // the holder keeps its own follow-up
        assert_eq!(order_of(&firesweep, &unit("Lancer")), vec![A, A]);
        assert_eq!(order_of(&unit("Lancer"), &firesweep), vec![A]);
    }

    #[test]
    fn conditional_follow_up_applies_only_when_defending() {
        let armads = unit("Axeman").with_skill(SkillSlot::Weapon, "Armads");
        // Axeman Spd 25 vs Swordsman 30: guaranteed as defender
        assert_eq!(order_of(&unit("Swordsman"), &armads), vec![A, D, A, D]);
        // As attacker Armads does nothing and Swordsman outspeeds
        assert_eq!(order_of(&armads, &unit("Swordsman")), vec![A, D, D]);
    }

    #[test]
    fn sequence_never_exceeds_strike_cap() {
        let mut brave = unit("Swordsman")
            .with_skill(SkillSlot::Weapon, "Brave Sword")
            .with_skill(SkillSlot::PassiveB, "Desperation 3");
        brave.state.missing_hp = 30;
        let mut vantage = unit("Lancer")
            .with_skill(SkillSlot::PassiveB, "Vantage 3")
            .with_skill(SkillSlot::Weapon, "Armads");
        vantage.state.missing_hp = 20;
        assert!(order_of(&brave, &vantage).len() <= CombatConfig::MAX_STRIKES);
    }
}
