//! Exchange resolution.
//!
//! [`CombatEngine`] is the single entry point for a 1v1 exchange. It holds a
//! read-only catalog and the combat tunables, and every call is a pure
//! function of its inputs.
//!
//! # Architecture
//!
//! ```text
//! UnitInstance ×2 ──▶ Combatant ×2 ──▶ AttackOrder
//!                                          │
//!                 pre-combat area blast ◀──┘
//!                            │
//!                 strike loop (damage, specials, lifesteal)
//!                            │
//!                 post-combat damage (non-lethal) ──▶ buffs/debuffs ──▶ CombatResult
//! ```

use crate::config::CombatConfig;
use crate::env::{CatalogOracle, SkillSlot};
use crate::skills::{SkillEffect, SkillSet, SpecialBonus, SpecialKind, StrikeSpecial};
use crate::state::{TransientState, UnitInstance};
use crate::stats::{HpGauge, Level, StatKind, resolve_stat};

use super::aftermath::{self, Outcome};
use super::combatant::Combatant;
use super::context::{CombatContext, Role};
use super::damage::{DamageParams, apply_damage, damage};
use super::order::{self, AttackOrder};
use super::result::{CombatResult, SideSummary, StrikeRecord};
use super::special::SpecialGauge;
use super::triangle::advantage_pct;

// ============================================================================
// Attacker / Defender Pair
// ============================================================================

/// Per-side values keyed by role.
#[derive(Clone, Copy, Debug)]
struct Pair<T> {
    attacker: T,
    defender: T,
}

impl<T> Pair<T> {
    fn from_fn(mut f: impl FnMut(Role) -> T) -> Self {
        Self {
            attacker: f(Role::Attacker),
            defender: f(Role::Defender),
        }
    }

    fn get(&self, role: Role) -> &T {
        match role {
            Role::Attacker => &self.attacker,
            Role::Defender => &self.defender,
        }
    }

    /// `(role's value, opposite role's value)`.
    fn split_mut(&mut self, role: Role) -> (&mut T, &mut T) {
        match role {
            Role::Attacker => (&mut self.attacker, &mut self.defender),
            Role::Defender => (&mut self.defender, &mut self.attacker),
        }
    }
}

/// Mutable state of one side while strikes execute.
#[derive(Clone, Copy, Debug)]
struct Running<'a> {
    hp: i32,
    landed: u8,
    special: Option<SpecialGauge<'a>>,
    special_damage: i32,
}

impl<'a> Running<'a> {
    fn start(combatant: &Combatant<'a>) -> Self {
        Self {
            hp: combatant.gauge.current,
            landed: 0,
            special: SpecialGauge::of(combatant),
            special_damage: 0,
        }
    }
}

// ============================================================================
// Combat Engine
// ============================================================================

/// Resolves exchanges against a reference catalog.
pub struct CombatEngine<'c, C: CatalogOracle + ?Sized> {
    catalog: &'c C,
    config: CombatConfig,
}

impl<'c, C: CatalogOracle + ?Sized> CombatEngine<'c, C> {
    pub fn new(catalog: &'c C, config: CombatConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &'c C {
        self.catalog
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Stat at `level`. `None` when the archetype has no data for the
    /// instance's rarity.
    ///
    /// # Arguments
    ///
    /// * `instance` - Unit to resolve
    /// * `stat` - Stat to resolve
    /// * `level` - Level 1 or 40
    /// * `context` - `instance`'s view of the exchange it is engaged in, or
    ///   `None` for display (role-conditional bonuses are absent)
    pub fn resolve_stat(
        &self,
        instance: &UnitInstance,
        stat: StatKind,
        level: Level,
        context: Option<&CombatContext<'_>>,
    ) -> Option<i32> {
        let role = context.map(CombatContext::role);
        resolve_stat(self.catalog, instance, stat, level, role)
    }

    /// True when the ability in `slot` matches `pattern` (case-insensitive
    /// substring) and its HP precondition holds at the unit's current HP.
    pub fn has_ability(&self, instance: &UnitInstance, slot: SkillSlot, pattern: &str) -> bool {
        let max_hp = self
            .resolve_stat(instance, StatKind::Hp, self.config.combat_level, None)
            .unwrap_or(0);
        let gauge = HpGauge::new(max_hp, instance.state.missing_hp);
        SkillSet::equip(self.catalog, instance, gauge).has(slot, pattern)
    }

    /// Numbers stated in the equipped ability's text, left to right.
    ///
    /// Returns `[0]` when nothing is equipped in `slot`, the name is unknown,
    /// or the text has no numbers.
    pub fn ability_numbers(&self, instance: &UnitInstance, slot: SkillSlot) -> Vec<i32> {
        let numbers = instance
            .loadout
            .get(slot)
            .and_then(|name| self.catalog.lookup_ability(slot, name))
            .map(|definition| definition.numbers())
            .unwrap_or_default();
        if numbers.is_empty() {
            vec![0]
        } else {
            numbers
        }
    }

    /// Strike sequence for the exchange `context` describes.
    pub fn plan_attack_order(&self, context: &CombatContext<'_>) -> AttackOrder {
        let (attacker, defender) = context.sides();
        let combatants = self.combatants(attacker, defender);
        order::plan_attack_order(&combatants.attacker, &combatants.defender, &self.config)
    }

    fn combatants<'a>(
        &self,
        attacker: &'a UnitInstance,
        defender: &'a UnitInstance,
    ) -> Pair<Combatant<'a>>
    where
        'c: 'a,
    {
        let level = self.config.combat_level;
        Pair {
            attacker: Combatant::new(self.catalog, attacker, Role::Attacker, level),
            defender: Combatant::new(self.catalog, defender, Role::Defender, level),
        }
    }

    /// Resolves one exchange with `attacker` initiating against `defender`.
    pub fn resolve(&self, attacker: &UnitInstance, defender: &UnitInstance) -> CombatResult {
        let units = self.combatants(attacker, defender);
        let order = order::plan_attack_order(&units.attacker, &units.defender, &self.config);

        let base = Pair::from_fn(|role| {
            let (unit, foe) = (units.get(role), units.get(role.opposite()));
            let advantage = advantage_pct(unit, foe, self.config.triangle_pct);
            DamageParams::between(unit, foe, advantage, &self.config)
        });
        let mut sides = Pair {
            attacker: Running::start(&units.attacker),
            defender: Running::start(&units.defender),
        };
        let mut result = CombatResult::default();

        result.area_damage = area_blast(&units, &mut sides);
        for &striker in &order {
            let (s, o) = sides.split_mut(striker);
            if s.hp == 0 || o.hp == 0 {
                if s.hp == 0 && o.hp == 0 {
                    break;
                }
                continue;
            }
            let record = strike(
                units.get(striker),
                units.get(striker.opposite()),
                base.get(striker),
                s,
                o,
            );
            let (attacker_hp, defender_hp) = (sides.attacker.hp, sides.defender.hp);
            let record = StrikeRecord {
                attacker_hp,
                defender_hp,
                ..record
            };
            tracing::debug!(
                striker = ?record.striker,
                damage = record.damage,
                special = record.special,
                defensive_special = record.defensive_special,
                attacker_hp,
                defender_hp,
                "strike"
            );
            result.strikes.push(record);
        }

        self.finish(&units, &base, &order, sides, &mut result);
        result
    }

    /// Post-combat effects and per-side summaries.
    fn finish(
        &self,
        units: &Pair<Combatant<'_>>,
        base: &Pair<DamageParams>,
        order: &AttackOrder,
        mut sides: Pair<Running<'_>>,
        result: &mut CombatResult,
    ) {
        let outcome = |role: Role, side: &Running<'_>| Outcome {
            combatant: units.get(role),
            hp: side.hp,
            landed: side.landed,
        };
        let a = outcome(Role::Attacker, &sides.attacker);
        let d = outcome(Role::Defender, &sides.defender);
        let post = aftermath::post_combat_damage(a, d);
        let (a_status, d_status) = aftermath::next_status(a, d);

        sides.attacker.hp = aftermath::non_lethal(sides.attacker.hp, post.to_attacker);
        sides.defender.hp = aftermath::non_lethal(sides.defender.hp, post.to_defender);

        for (role, status) in [(Role::Attacker, a_status), (Role::Defender, d_status)] {
            let unit = units.get(role);
            let side = *sides.get(role);
            let mut special = side.special;
            let galeforce_ready = role == Role::Attacker
                && side.hp > 0
                && special.is_some_and(|g| g.is_ready() && *g.kind() == SpecialKind::Galeforce);
            if galeforce_ready && let Some(gauge) = special.as_mut() {
                gauge.reset();
            }

            *result.side_mut(role) = SideSummary {
                hit_damage: damage(base.get(role)),
                hits_planned: order
                    .iter()
                    .filter(|&&r| r == role)
                    .count()
                    .try_into()
                    .unwrap_or(u8::MAX),
                hits_landed: side.landed,
                special_damage: side.special_damage,
                hp: side.hp,
                max_hp: unit.max_hp(),
                special_countdown: special.map(|g| g.countdown()),
                galeforce_ready,
                next_state: TransientState {
                    missing_hp: unit.max_hp() - side.hp,
                    special_charge: special.map_or(0, |g| g.accumulated()),
                    buffs: status.buffs,
                    debuffs: status.debuffs,
                },
            };
        }
    }
}

// ============================================================================
// Strike Steps
// ============================================================================

/// Pre-combat area damage from the attacker's charged special. Returns the
/// HP actually removed from the defender.
fn area_blast(units: &Pair<Combatant<'_>>, sides: &mut Pair<Running<'_>>) -> i32 {
    let attacker = &units.attacker;
    let defender = &units.defender;
    let Some(gauge) = sides.attacker.special.as_mut() else {
        return 0;
    };
    let SpecialKind::AreaBlast { pct } = *gauge.kind() else {
        return 0;
    };
    let Some(weapon) = attacker.weapon else {
        return 0;
    };
    if !gauge.is_ready() {
        return 0;
    }

    let gap = (attacker.stat(StatKind::Atk) - defender.mitigation(weapon.damage_kind())).max(0);
    let blast = pct * gap / 100;
    gauge.reset();

    let before = sides.defender.hp;
    sides.defender.hp = aftermath::non_lethal(before, blast);
    tracing::debug!(blast, defender_hp = sides.defender.hp, "area blast");
    before - sides.defender.hp
}

/// Executes one strike of `unit` against `foe`. HP fields of the returned
/// record are filled in by the caller.
fn strike<'a>(
    unit: &Combatant<'a>,
    foe: &Combatant<'a>,
    base: &DamageParams,
    s: &mut Running<'a>,
    o: &mut Running<'a>,
) -> StrikeRecord {
    let mut params = *base;
    let mut heal_pct = unit.skills.sum(|e| match e {
        SkillEffect::Lifesteal { pct } => Some(*pct),
        _ => None,
    });

    let mut special = false;
    if let Some(gauge) = s.special.as_mut() {
        match gauge.kind() {
            SpecialKind::Strike(on_attack) if gauge.is_ready() => {
                apply_strike_special(unit, s.hp, on_attack, &mut params);
                heal_pct += on_attack.heal_pct;
                gauge.reset();
                special = true;
            }
            kind if kind.charges_in_combat() => gauge.charge(attack_charge(unit, foe)),
            _ => {}
        }
    }

    let hit = damage(&params);
    if special {
        s.special_damage += hit - damage(base);
    }

    let mut dealt = hit;
    let mut defensive_special = false;
    if let Some(gauge) = o.special.as_mut() {
        let incoming_range = unit.weapon.map(|w| w.range);
        match *gauge.kind() {
            SpecialKind::Reduction { pct, range }
                if gauge.is_ready() && incoming_range == Some(range) =>
            {
                dealt -= dealt * pct / 100;
                gauge.reset();
                defensive_special = true;
            }
            SpecialKind::Miracle if gauge.is_ready() && dealt >= o.hp && o.hp > 1 => {
                dealt = o.hp - 1;
                gauge.reset();
                defensive_special = true;
            }
            kind if kind.charges_in_combat() && !guards(unit) => gauge.charge(1),
            _ => {}
        }
    }

    o.hp = apply_damage(o.hp, dealt);
    s.landed += 1;

    if heal_pct > 0 && s.hp > 0 && o.hp > 0 {
        let heal = dealt * heal_pct / 100;
        s.hp = (s.hp + heal).min(unit.max_hp());
    }

    StrikeRecord {
        striker: unit.role,
        damage: dealt,
        special,
        defensive_special,
        attacker_hp: 0,
        defender_hp: 0,
    }
}

/// Folds an on-attack special into the strike's damage parameters.
fn apply_strike_special(
    unit: &Combatant<'_>,
    current_hp: i32,
    on_attack: &StrikeSpecial,
    params: &mut DamageParams,
) {
    let scaled = match on_attack.bonus {
        Some(SpecialBonus::Stat { stat, pct }) => unit.stat(stat) * pct / 100,
        Some(SpecialBonus::MissingHp { pct }) => (unit.max_hp() - current_hp) * pct / 100,
        None => 0,
    };
    let flat = unit.skills.sum(|e| match e {
        SkillEffect::SpecialDamage(amount) => Some(*amount),
        _ => None,
    });
    params.bonus += scaled + flat;
    params.offense_pct = on_attack.offense_pct;
    params.mitigation_pct = on_attack.ignore_mit_pct;
}

/// Charge the striker's own special gains from one attack.
///
/// ```text
/// 1 + [Atk lead ≥ heavy-blade margin] − [foe has a charge-denial effect], floored at 0
/// ```
fn attack_charge(unit: &Combatant<'_>, foe: &Combatant<'_>) -> i32 {
    let lead = unit.stat(StatKind::Atk) - foe.stat(StatKind::Atk);
    let heavy = unit.has(|e| {
        matches!(e, SkillEffect::HeavyBlade { atk_margin } if lead >= *atk_margin)
    });
    let denied = guards(foe);
    (1 + i32::from(heavy) - i32::from(denied)).max(0)
}

fn guards(combatant: &Combatant<'_>) -> bool {
    combatant.has(|e| matches!(e, SkillEffect::Guard))
}
