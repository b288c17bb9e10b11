//! Classification table: ability record → typed effects.
//!
//! # Architecture
//!
//! ```text
//! Special slot    → special table (by name), magnitude from the text's first "N%"
//! Assist slot     → no combat effects
//! other slots     → family table (by name)
//!                     ├─ family owns its text → done
//!                     └─ otherwise           → sentence rules
//! ```
//!
//! Families cover abilities whose behavior is not spelled out in a
//! machine-readable way (breakers, Vantage, Guard, sweeps, ...). Sentence
//! rules cover the regular phrasing shared by most weapons and passives.

use crate::combat::Role;
use crate::env::{Color, DamageKind, SkillSlot, WeaponKind, WeaponType};
use crate::stats::StatKind;

use super::effect::{
    Aftermath, HpCondition, SkillEffect, SpecialBonus, SpecialKind, StrikeSpecial,
};
use super::text::{
    exposure_words, extract_numbers, first_percent, parse_cooldown_shift, parse_hp_condition,
    parse_stat_deltas, role_clause, sentences,
};

/// Output of classification for one ability.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classified {
    pub effects: Vec<SkillEffect>,
    pub hp_condition: Option<HpCondition>,
}

/// Classifies one ability record.
///
/// # Arguments
///
/// * `slot` - Slot the ability is defined for
/// * `name` - Ability name, possibly tiered ("Fury 3")
/// * `description` - Effect text
pub fn classify(slot: SkillSlot, name: &str, description: &str) -> Classified {
    match slot {
        SkillSlot::Special => Classified {
            effects: vec![SkillEffect::Special(classify_special(name, description))],
            hp_condition: None,
        },
        SkillSlot::Assist => Classified::default(),
        SkillSlot::Weapon
        | SkillSlot::PassiveA
        | SkillSlot::PassiveB
        | SkillSlot::PassiveC
        | SkillSlot::Seal => {
            let mut effects = Vec::new();
            let owns_text = match Family::of(name) {
                Some(family) => family.effects(name, description, &mut effects),
                None => false,
            };
            if !owns_text {
                for sentence in sentences(description) {
                    classify_sentence(slot, sentence, &mut effects);
                }
            }
            Classified {
                effects,
                hp_condition: parse_hp_condition(description),
            }
        }
    }
}

// ============================================================================
// Families
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    Breaker,
    Vantage,
    Desperation,
    WaryFighter,
    HeavyBlade,
    Guard,
    Raven,
    TriangleAdept,
    Brave,
    Sweep(DamageKind),
    Firesweep,
    WrathfulStaff,
    PoisonStrike,
    Pain,
}

/// Matched case-insensitively as a substring of the ability name.
const FAMILIES: &[(&str, Family)] = &[
    ("breaker", Family::Breaker),
    ("vantage", Family::Vantage),
    ("desperation", Family::Desperation),
    ("wary fighter", Family::WaryFighter),
    ("heavy blade", Family::HeavyBlade),
    ("guard", Family::Guard),
    ("raven", Family::Raven),
    ("triangle adept", Family::TriangleAdept),
    ("ruby ", Family::TriangleAdept),
    ("sapphire ", Family::TriangleAdept),
    ("emerald ", Family::TriangleAdept),
    ("brave ", Family::Brave),
    ("dire thunder", Family::Brave),
    ("windsweep", Family::Sweep(DamageKind::Physical)),
    ("watersweep", Family::Sweep(DamageKind::Magical)),
    ("firesweep", Family::Firesweep),
    ("wrathful staff", Family::WrathfulStaff),
    ("poison strike", Family::PoisonStrike),
    ("pain", Family::Pain),
];

impl Family {
    fn of(name: &str) -> Option<Family> {
        let lower = name.to_ascii_lowercase();
        FAMILIES
            .iter()
            .find(|(pattern, _)| lower.contains(pattern))
            .map(|(_, family)| *family)
    }

    /// Pushes the family's effects. Returns true when the family accounts for
    /// the whole description.
    fn effects(self, name: &str, description: &str, out: &mut Vec<SkillEffect>) -> bool {
        let numbers = extract_numbers(description);
        match self {
            Family::Breaker => {
                if let Some(target) = breaker_target(name) {
                    out.push(SkillEffect::Breaker { target });
                }
                true
            }
            Family::Vantage => {
                out.push(SkillEffect::Vantage);
                true
            }
            Family::Desperation => {
                out.push(SkillEffect::Desperation);
                true
            }
            Family::WaryFighter => {
                out.push(SkillEffect::NoFollowUp);
                true
            }
            Family::HeavyBlade => {
                let atk_margin = numbers.first().copied().unwrap_or(1);
                out.push(SkillEffect::HeavyBlade { atk_margin });
                true
            }
            Family::Guard => {
                out.push(SkillEffect::Guard);
                true
            }
            Family::Raven => {
                out.push(SkillEffect::Raven);
                true
            }
            Family::TriangleAdept => {
                let pct = first_percent(description).unwrap_or(20);
                out.push(SkillEffect::TriangleAdept { pct });
                true
            }
            Family::Brave => {
                out.push(SkillEffect::BraveStrike);
                false
            }
            Family::Sweep(against) => {
                let speed_margin = numbers.last().copied().unwrap_or(1);
                out.push(SkillEffect::Sweep {
                    against,
                    speed_margin,
                });
                true
            }
            Family::Firesweep => {
                out.push(SkillEffect::NoCounter);
                false
            }
            Family::WrathfulStaff => {
                out.push(SkillEffect::FullStaffDamage);
                true
            }
            Family::PoisonStrike => {
                let amount = numbers.first().copied().unwrap_or(10);
                out.push(SkillEffect::FoeDamage {
                    amount,
                    kind: Aftermath::Poison,
                    role: Some(Role::Attacker),
                });
                true
            }
            Family::Pain => {
                let amount = numbers.first().copied().unwrap_or(10);
                out.push(SkillEffect::FoeDamage {
                    amount,
                    kind: Aftermath::Pain,
                    role: None,
                });
                true
            }
        }
    }
}

/// Weapon category named by a breaker skill ("Swordbreaker 3", "R Tomebreaker").
fn breaker_target(name: &str) -> Option<WeaponType> {
    let lower = name.to_ascii_lowercase();
    let prefix = lower.split("breaker").next()?.trim();
    let target = match prefix {
        "sword" => WeaponType::new(Color::Red, WeaponKind::Sword),
        "lance" => WeaponType::new(Color::Blue, WeaponKind::Lance),
        "axe" => WeaponType::new(Color::Green, WeaponKind::Axe),
        "bow" => WeaponType::new(Color::Colorless, WeaponKind::Bow),
        "dagger" => WeaponType::new(Color::Colorless, WeaponKind::Dagger),
        "r tome" => WeaponType::new(Color::Red, WeaponKind::Tome),
        "b tome" => WeaponType::new(Color::Blue, WeaponKind::Tome),
        "g tome" => WeaponType::new(Color::Green, WeaponKind::Tome),
        _ => {
            tracing::warn!(ability = name, "breaker skill targets an unknown weapon");
            return None;
        }
    };
    Some(target)
}

// ============================================================================
// Sentence Rules
// ============================================================================

fn classify_sentence(slot: SkillSlot, sentence: &str, out: &mut Vec<SkillEffect>) {
    let lower = sentence.to_ascii_lowercase();

    // ally-support effects are outside a 1v1 exchange
    if lower.contains("allies") || lower.contains("ally") {
        return;
    }

    if lower.contains("effective") {
        let targets = exposure_words(sentence);
        if !targets.is_empty() {
            if lower.contains("neutralizes") {
                out.push(SkillEffect::NeutralizeEffective(targets));
            } else if lower.contains("effective against") {
                out.push(SkillEffect::Effective(targets));
            }
        }
        return;
    }

    if lower.contains("counterattack regardless") {
        out.push(SkillEffect::CounterAnyRange);
        return;
    }

    if lower.contains("cooldown count") {
        if let Some(shift) = parse_cooldown_shift(sentence) {
            out.push(SkillEffect::CooldownShift(shift));
        }
        // blade tomes put the cooldown clause and the buff clause together
        if lower.contains("total bonuses") {
            out.push(SkillEffect::BuffsAsDamage);
        }
        return;
    }

    // weapons with built-in Vantage or Desperation (Sol Katti)
    if lower.contains("before foe's first attack") {
        out.push(SkillEffect::Vantage);
        return;
    }
    if lower.contains("before foe can counterattack") {
        out.push(SkillEffect::Desperation);
        return;
    }

    if lower.contains("guaranteed follow-up") {
        out.push(SkillEffect::GuaranteedFollowUp {
            role: role_clause(sentence),
            requires_counter: lower.contains("can counter"),
        });
        return;
    }

    if slot == SkillSlot::Weapon && (lower.contains("recovers hp") || lower.contains("restores hp"))
    {
        let pct = first_percent(sentence).unwrap_or(50);
        out.push(SkillEffect::Lifesteal { pct });
        return;
    }

    if lower.contains("when special triggers") {
        if let Some(amount) = extract_numbers(sentence).first() {
            out.push(SkillEffect::SpecialDamage(*amount));
        }
        return;
    }

    if lower.contains("total bonuses") {
        out.push(SkillEffect::BuffsAsDamage);
        return;
    }

    if lower.contains("damage to unit") {
        if let Some(amount) = extract_numbers(sentence).last() {
            out.push(SkillEffect::SelfDamage {
                amount: *amount,
                requires_attack: lower.contains("if unit attacked"),
            });
        }
        return;
    }

    let Some(delta) = parse_stat_deltas(sentence) else {
        return;
    };
    if lower.contains("through its next action") {
        out.push(SkillEffect::InflictDebuff(delta.magnitude()));
    } else if lower.contains("for 1 turn") {
        out.push(SkillEffect::SelfBuff(delta.magnitude()));
    } else {
        out.push(SkillEffect::StatBonus {
            delta,
            role: role_clause(sentence),
        });
    }
}

// ============================================================================
// Specials
// ============================================================================

const fn strike(offense_pct: i32, ignore_mit_pct: i32, heal_pct: i32) -> SpecialKind {
    SpecialKind::Strike(StrikeSpecial {
        offense_pct,
        ignore_mit_pct,
        bonus: None,
        heal_pct,
    })
}

const fn scaled(stat: StatKind, pct: i32) -> SpecialKind {
    SpecialKind::Strike(StrikeSpecial {
        offense_pct: 0,
        ignore_mit_pct: 0,
        bonus: Some(SpecialBonus::Stat { stat, pct }),
        heal_pct: 0,
    })
}

const fn vengeful(pct: i32) -> SpecialKind {
    SpecialKind::Strike(StrikeSpecial {
        offense_pct: 0,
        ignore_mit_pct: 0,
        bonus: Some(SpecialBonus::MissingHp { pct }),
        heal_pct: 0,
    })
}

/// Exact names, or prefixes when the pattern ends in a space.
const SPECIALS: &[(&str, SpecialKind)] = &[
    ("glimmer", strike(50, 0, 0)),
    ("night sky", strike(50, 0, 0)),
    ("astra", strike(150, 0, 0)),
    ("moonbow", strike(0, 30, 0)),
    ("luna", strike(0, 50, 0)),
    ("aether", strike(0, 50, 50)),
    ("sol", strike(0, 0, 50)),
    ("noontime", strike(0, 0, 30)),
    ("daylight", strike(0, 0, 30)),
    ("bonfire", scaled(StatKind::Def, 50)),
    ("ignis", scaled(StatKind::Def, 80)),
    ("glowing ember", scaled(StatKind::Def, 50)),
    ("iceberg", scaled(StatKind::Res, 50)),
    ("glacies", scaled(StatKind::Res, 80)),
    ("chilling wind", scaled(StatKind::Res, 50)),
    ("draconic aura", scaled(StatKind::Atk, 30)),
    ("dragon gaze", scaled(StatKind::Atk, 30)),
    ("dragon fang", scaled(StatKind::Atk, 50)),
    ("retribution", vengeful(30)),
    ("reprisal", vengeful(30)),
    ("vengeance", vengeful(50)),
    ("buckler", SpecialKind::Reduction { pct: 30, range: 1 }),
    ("escutcheon", SpecialKind::Reduction { pct: 30, range: 1 }),
    ("pavise", SpecialKind::Reduction { pct: 50, range: 1 }),
    ("holy vestments", SpecialKind::Reduction { pct: 30, range: 2 }),
    ("sacred cowl", SpecialKind::Reduction { pct: 30, range: 2 }),
    ("aegis", SpecialKind::Reduction { pct: 50, range: 2 }),
    ("miracle", SpecialKind::Miracle),
    ("blazing ", SpecialKind::AreaBlast { pct: 150 }),
    ("growing ", SpecialKind::AreaBlast { pct: 100 }),
    ("rising ", SpecialKind::AreaBlast { pct: 100 }),
    ("galeforce", SpecialKind::Galeforce),
    ("imbue", SpecialKind::Healing),
    ("heavenly light", SpecialKind::Healing),
    ("kindled-fire balm", SpecialKind::Healing),
    ("solid-earth balm", SpecialKind::Healing),
    ("still-water balm", SpecialKind::Healing),
    ("swift-winds balm", SpecialKind::Healing),
];

fn classify_special(name: &str, description: &str) -> SpecialKind {
    let lower = name.trim().to_ascii_lowercase();
    let found = SPECIALS.iter().find(|(pattern, _)| {
        if pattern.ends_with(' ') {
            lower.starts_with(pattern)
        } else {
            lower == *pattern
        }
    });

    let Some((_, template)) = found else {
        tracing::warn!(special = name, "unrecognized special, treating as inert");
        return SpecialKind::Inert;
    };

    let mut kind = *template;
    if let Some(pct) = first_percent(description) {
        match &mut kind {
            SpecialKind::Strike(strike) => *strike.primary_mut() = pct,
            SpecialKind::Reduction { pct: reduction, .. } => *reduction = pct,
            SpecialKind::Miracle
            | SpecialKind::AreaBlast { .. }
            | SpecialKind::Healing
            | SpecialKind::Galeforce
            | SpecialKind::Inert => {}
        }
    }
    kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatLine;

    fn run(slot: SkillSlot, name: &str, description: &str) -> Classified {
        classify(slot, name, description)
    }

    #[test]
    fn stat_passive_becomes_unconditional_bonus() {
        let out = run(SkillSlot::PassiveA, "Attack +3", "Grants Atk+3.");
        assert_eq!(
            out.effects,
            vec![SkillEffect::StatBonus {
                delta: StatLine::new(0, 3, 0, 0, 0),
                role: None
            }]
        );
        assert_eq!(out.hp_condition, None);
    }

    #[test]
    fn blow_skill_is_attacker_only() {
        let out = run(
            SkillSlot::PassiveA,
            "Death Blow 3",
            "Grants Atk+6 during combat if unit initiated combat.",
        );
        assert_eq!(
            out.effects,
            vec![SkillEffect::StatBonus {
                delta: StatLine::new(0, 6, 0, 0, 0),
                role: Some(Role::Attacker)
            }]
        );
    }

    #[test]
    fn fortress_keeps_both_halves_as_one_signed_line() {
        let out = run(
            SkillSlot::PassiveA,
            "Fortress Def 3",
            "Grants Def+5. Inflicts Atk-3.",
        );
        let total = out
            .effects
            .iter()
            .filter_map(|effect| match effect {
                SkillEffect::StatBonus { delta, .. } => Some(*delta),
                _ => None,
            })
            .fold(StatLine::ZERO, |acc, delta| acc + delta);
        assert_eq!(total, StatLine::new(0, -3, 0, 5, 0));
    }

    #[test]
    fn fury_gets_stats_and_self_damage() {
        let out = run(
            SkillSlot::PassiveA,
            "Fury 3",
            "Grants Atk/Spd/Def/Res+3. Deals 6 damage to unit after combat.",
        );
        assert_eq!(
            out.effects,
            vec![
                SkillEffect::StatBonus {
                    delta: StatLine::new(0, 3, 3, 3, 3),
                    role: None
                },
                SkillEffect::SelfDamage {
                    amount: 6,
                    requires_attack: false
                },
            ]
        );
    }

    #[test]
    fn breaker_targets_the_named_weapon_and_carries_hp_gate() {
        let out = run(
            SkillSlot::PassiveB,
            "R Tomebreaker 3",
            "If unit's HP ≥ 50% in combat against a red tome user, unit makes a guaranteed follow-up attack and foe cannot make a follow-up attack.",
        );
        assert_eq!(
            out.effects,
            vec![SkillEffect::Breaker {
                target: WeaponType::new(Color::Red, WeaponKind::Tome)
            }]
        );
        assert_eq!(out.hp_condition, Some(HpCondition::AtLeast(50)));
    }

    #[test]
    fn brave_weapon_keeps_its_speed_penalty() {
        let out = run(
            SkillSlot::Weapon,
            "Brave Sword+",
            "Spd-5. Attacks twice when unit initiates combat.",
        );
        assert_eq!(
            out.effects,
            vec![
                SkillEffect::BraveStrike,
                SkillEffect::StatBonus {
                    delta: StatLine::new(0, 0, -5, 0, 0),
                    role: None
                },
            ]
        );
    }

    #[test]
    fn ally_sentences_are_ignored() {
        let out = run(
            SkillSlot::Weapon,
            "Cymbeline",
            "Grants adjacent allies Atk+4 through their next actions at the start of each turn.",
        );
        assert!(out.effects.is_empty());
    }

    #[test]
    fn conditional_follow_up_reads_role() {
        let out = run(
            SkillSlot::Weapon,
            "Armads",
            "If unit's HP ≥ 80% and foe initiates combat, unit makes a guaranteed follow-up attack.",
        );
        assert_eq!(
            out.effects,
            vec![SkillEffect::GuaranteedFollowUp {
                role: Some(Role::Defender),
                requires_counter: false
            }]
        );
        assert_eq!(out.hp_condition, Some(HpCondition::AtLeast(80)));
    }

    #[test]
    fn weapon_desperation_is_read_from_the_sentence() {
        let out = run(
            SkillSlot::Weapon,
            "Sol Katti",
            "If unit's HP ≤ 50% and unit initiates combat, unit can make a follow-up attack before foe can counterattack.",
        );
        assert_eq!(out.effects, vec![SkillEffect::Desperation]);
        assert_eq!(out.hp_condition, Some(HpCondition::AtMost(50)));
    }

    #[test]
    fn dagger_splits_debuff_and_self_buff() {
        let out = run(
            SkillSlot::Weapon,
            "Rogue Dagger",
            "After combat, if unit attacked, inflicts Def/Res-3 on foe through its next action. Grants unit Def/Res+3 for 1 turn.",
        );
        assert_eq!(
            out.effects,
            vec![
                SkillEffect::InflictDebuff(StatLine::new(0, 0, 0, 3, 3)),
                SkillEffect::SelfBuff(StatLine::new(0, 0, 0, 3, 3)),
            ]
        );
    }

    #[test]
    fn effectiveness_and_neutralization_are_distinguished() {
        let bow = run(SkillSlot::Weapon, "Silver Bow", "Effective against flying units.");
        assert_eq!(
            bow.effects,
            vec![SkillEffect::Effective(crate::env::Exposure::FLYING)]
        );

        let shield = run(
            SkillSlot::PassiveA,
            "Iote's Shield",
            "Neutralizes \"effective against flying\" bonuses.",
        );
        assert_eq!(
            shield.effects,
            vec![SkillEffect::NeutralizeEffective(
                crate::env::Exposure::FLYING
            )]
        );
    }

    #[test]
    fn blade_tome_gets_cooldown_and_buff_damage() {
        let out = run(
            SkillSlot::Weapon,
            "Raudrblade",
            "Slows Special trigger (cooldown count+1). Grants bonus damage equal to total bonuses on unit during combat.",
        );
        assert_eq!(
            out.effects,
            vec![SkillEffect::CooldownShift(1), SkillEffect::BuffsAsDamage]
        );
    }

    #[test]
    fn specials_use_table_then_description_percent() {
        let luna = run(
            SkillSlot::Special,
            "Luna",
            "Treats foe's Def/Res as if reduced by 50% during combat.",
        );
        assert_eq!(
            luna.effects,
            vec![SkillEffect::Special(strike(0, 50, 0))]
        );

        let growing = run(
            SkillSlot::Special,
            "Growing Flame",
            "Before combat this unit initiates, foes in a wide area take damage equal to (unit's Atk minus foe's Def or Res).",
        );
        assert_eq!(
            growing.effects,
            vec![SkillEffect::Special(SpecialKind::AreaBlast { pct: 100 })]
        );
    }

    #[test]
    fn sol_does_not_swallow_balms() {
        let balm = run(SkillSlot::Special, "Solid-Earth Balm", "");
        assert_eq!(balm.effects, vec![SkillEffect::Special(SpecialKind::Healing)]);
    }

    #[test]
    fn unknown_special_is_inert() {
        let out = run(SkillSlot::Special, "Mystery Flash", "Does something.");
        assert_eq!(out.effects, vec![SkillEffect::Special(SpecialKind::Inert)]);
    }

    #[test]
    fn assists_have_no_combat_effects() {
        let out = run(SkillSlot::Assist, "Rally Attack", "Grants Atk+4 to target ally.");
        assert_eq!(out, Classified::default());
    }
}
