//! Shared test fixtures.
//!
//! A small synthetic catalog with round-number stats so expected damage can
//! be worked out by hand in each test.
//!
//! | Archetype | Weapon         | Move     | HP | Atk | Spd | Def | Res |
//! |-----------|----------------|----------|----|-----|-----|-----|-----|
//! | Swordsman | Red Sword      | Infantry | 40 | 30  | 30  | 20  | 15  |
//! | Lancer    | Blue Lance     | Armored  | 45 | 32  | 20  | 30  | 15  |
//! | Axeman    | Green Axe      | Cavalry  | 42 | 33  | 25  | 22  | 18  |
//! | Archer    | Colorless Bow  | Infantry | 35 | 30  | 28  | 15  | 15  |
//! | Flier     | Blue Lance     | Flying   | 36 | 28  | 32  | 16  | 28  |
//! | Mage      | Red Tome       | Infantry | 34 | 32  | 26  | 14  | 26  |
//! | Cleric    | Colorless Staff| Infantry | 36 | 28  | 24  | 16  | 30  |
//!
//! Level-40 neutral values, 5★ only, before weapon might.

use std::collections::BTreeMap;

use crate::env::{
    AbilityDefinition, AbilityParams, CatalogOracle, CatalogSnapshot, Color, LearnableSkill,
    MoveType, RarityStats, SkillSlot, Spread, SpreadLine, UnitArchetype, WeaponKind, WeaponType,
};
use crate::state::UnitInstance;
use crate::stats::StatLine;

fn spread(mid: i32) -> Spread {
    Spread(mid - 3, mid, mid + 3)
}

fn archetype(
    name: &str,
    color: Color,
    kind: WeaponKind,
    movement: MoveType,
    level1: StatLine,
    level40: [i32; 5],
    weapon: &str,
) -> UnitArchetype {
    let [hp, atk, spd, def, res] = level40;
    let stats = BTreeMap::from([(
        5,
        RarityStats {
            level1,
            level40: SpreadLine {
                hp: spread(hp),
                atk: spread(atk),
                spd: spread(spd),
                def: spread(def),
                res: spread(res),
            },
        },
    )]);
    UnitArchetype {
        name: name.to_string(),
        movement,
        weapon: WeaponType::new(color, kind),
        stats,
        skills: vec![LearnableSkill {
            slot: SkillSlot::Weapon,
            name: weapon.to_string(),
            rarity: 1,
        }],
    }
}

fn weapon(name: &str, might: i32, description: &str) -> AbilityDefinition {
    AbilityDefinition::new(
        name,
        SkillSlot::Weapon,
        AbilityParams {
            might: Some(might),
            ..AbilityParams::default()
        },
        description,
    )
}

fn passive(name: &str, slot: SkillSlot, description: &str) -> AbilityDefinition {
    AbilityDefinition::new(name, slot, AbilityParams::default(), description)
}

fn special(name: &str, cooldown: u8, description: &str) -> AbilityDefinition {
    AbilityDefinition::new(
        name,
        SkillSlot::Special,
        AbilityParams {
            cooldown: Some(cooldown),
            ..AbilityParams::default()
        },
        description,
    )
}

pub fn catalog() -> CatalogSnapshot {
    use Color::*;
    use MoveType::*;
    use WeaponKind::*;

    let archetypes = [
        archetype(
            "Swordsman",
            Red,
            Sword,
            Infantry,
            StatLine::new(18, 8, 8, 6, 4),
            [40, 30, 30, 20, 15],
            "Iron Sword",
        ),
        archetype(
            "Lancer",
            Blue,
            Lance,
            Armored,
            StatLine::new(20, 9, 4, 9, 3),
            [45, 32, 20, 30, 15],
            "Iron Lance",
        ),
        archetype(
            "Axeman",
            Green,
            Axe,
            Cavalry,
            StatLine::new(19, 9, 6, 6, 5),
            [42, 33, 25, 22, 18],
            "Iron Axe",
        ),
        archetype(
            "Archer",
            Colorless,
            Bow,
            Infantry,
            StatLine::new(17, 8, 7, 5, 5),
            [35, 30, 28, 15, 15],
            "Iron Bow",
        ),
        archetype(
            "Flier",
            Blue,
            Lance,
            Flying,
            StatLine::new(16, 7, 9, 5, 8),
            [36, 28, 32, 16, 28],
            "Iron Lance",
        ),
        archetype(
            "Mage",
            Red,
            Tome,
            Infantry,
            StatLine::new(16, 8, 7, 4, 7),
            [34, 32, 26, 14, 26],
            "Fire",
        ),
        archetype(
            "Cleric",
            Colorless,
            Staff,
            Infantry,
            StatLine::new(17, 6, 6, 5, 8),
            [36, 28, 24, 16, 30],
            "Assault",
        ),
    ];

    let abilities = [
        weapon("Iron Sword", 6, ""),
        weapon("Iron Lance", 6, ""),
        weapon("Iron Axe", 6, ""),
        weapon("Iron Bow", 4, "Effective against flying units."),
        weapon("Fire", 4, ""),
        weapon("Assault", 10, ""),
        weapon(
            "Brave Sword",
            5,
            "Spd-5. If unit initiates combat, unit attacks twice.",
        ),
        weapon(
            "Killing Edge",
            7,
            "Accelerates Special trigger (cooldown count-1).",
        ),
        weapon(
            "Armads",
            16,
            "If unit's HP ≥ 80% and foe initiates combat, unit makes a guaranteed follow-up attack.",
        ),
        weapon("Raven Tome", 4, "Grants weapon-triangle advantage against colorless foes."),
        weapon(
            "Sol Katti",
            6,
            "If unit's HP ≤ 50% and unit initiates combat, unit can make a follow-up attack before foe can counterattack.",
        ),
        weapon("Nosferatu", 7, "Recovers HP = 50% of damage dealt."),
        weapon(
            "Wo Dao",
            9,
            "Deals +10 damage when Special triggers.",
        ),
        weapon(
            "Windsweep",
            8,
            "If unit initiates combat, unit cannot make a follow-up attack. If unit's Spd - foe's Spd ≥ 1 and foe uses sword, lance, axe, bow, or dagger, foe cannot counterattack.",
        ),
        weapon(
            "Watersweep",
            8,
            "If unit initiates combat, unit cannot make a follow-up attack. If unit's Spd - foe's Spd ≥ 1 and foe uses magic, foe cannot counterattack.",
        ),
        weapon("Firesweep Sword", 11, "Unit and foe cannot counterattack."),
        weapon(
            "Pain",
            3,
            "Deals 10 damage to target and foes within 2 spaces of target after combat.",
        ),
        passive("Attack +3", SkillSlot::PassiveA, "Grants Atk+3."),
        passive(
            "Death Blow 3",
            SkillSlot::PassiveA,
            "If unit initiates combat, grants Atk+6 during combat.",
        ),
        passive(
            "Fury 3",
            SkillSlot::PassiveA,
            "Grants Atk/Spd/Def/Res+3. After combat, deals 6 damage to unit.",
        ),
        passive(
            "Close Counter",
            SkillSlot::PassiveA,
            "Unit can counterattack regardless of foe's range.",
        ),
        passive(
            "Triangle Adept 3",
            SkillSlot::PassiveA,
            "If unit has weapon-triangle advantage, boosts Atk by 20%. If unit has weapon-triangle disadvantage, reduces Atk by 20%.",
        ),
        passive(
            "Iote's Shield",
            SkillSlot::PassiveA,
            "Neutralizes \"effective against flying\" bonuses.",
        ),
        passive(
            "Heavy Blade 3",
            SkillSlot::PassiveA,
            "If unit's Atk - foe's Atk ≥ 1, unit gains +1 cooldown charge per attack.",
        ),
        passive(
            "Vantage 3",
            SkillSlot::PassiveB,
            "If unit's HP ≤ 75% and foe initiates combat, unit can counterattack before foe's first attack.",
        ),
        passive(
            "Desperation 3",
            SkillSlot::PassiveB,
            "If unit's HP ≤ 75% and unit initiates combat, unit can make a follow-up attack before foe can counterattack.",
        ),
        passive(
            "Swordbreaker 3",
            SkillSlot::PassiveB,
            "If unit's HP ≥ 50% in combat against a sword foe, unit makes a guaranteed follow-up attack and foe cannot make a follow-up attack.",
        ),
        passive(
            "Wary Fighter 3",
            SkillSlot::PassiveB,
            "If unit's HP ≥ 50%, unit and foe cannot make a follow-up attack.",
        ),
        passive(
            "Guard 3",
            SkillSlot::PassiveB,
            "At start of combat, if unit's HP ≥ 80%, inflicts Special cooldown charge -1 on foe per unit's attack.",
        ),
        passive(
            "Poison Strike 3",
            SkillSlot::PassiveB,
            "Inflicts 10 damage to foe after combat if unit initiated combat.",
        ),
        passive(
            "Seal Atk 3",
            SkillSlot::PassiveB,
            "Inflicts Atk-7 on foe through its next action after combat.",
        ),
        passive(
            "Hone Atk 3",
            SkillSlot::PassiveC,
            "At start of turn, grants Atk+4 to adjacent allies for 1 turn.",
        ),
        passive("Fortress Def 3", SkillSlot::Seal, "Grants Def+5. Inflicts Atk-3."),
        special(
            "Miracle",
            5,
            "If unit's HP > 1 and foe would reduce unit's HP to 0, unit survives with 1 HP.",
        ),
        special("Moonbow", 2, "Treats foe's Def/Res as if reduced by 30% during combat."),
        special("Bonfire", 3, "Boosts damage by 50% of unit's Def."),
        special("Night Sky", 3, "Boosts damage dealt by 50%."),
        special("Sol", 3, "Heals unit by 50% of damage dealt."),
        special("Pavise", 3, "Reduces damage from an adjacent foe's attack by 50%."),
        special(
            "Holy Vestments",
            3,
            "Reduces damage inflicted by attacks from foes 2 spaces away by 30%.",
        ),
        special(
            "Blazing Flame",
            4,
            "Before combat this unit initiates, foes in a line centered on target take damage equal to 1.5 x (unit's Atk minus foe's Def or Res).",
        ),
        special(
            "Galeforce",
            5,
            "If unit initiates combat, grants another action after combat.",
        ),
        special("Imbue", 1, "When healing an ally with a staff, increases recovered HP by 10."),
    ];

    CatalogSnapshot::builder()
        .archetypes(archetypes)
        .abilities(abilities)
        .build()
        .expect("fixture catalog is consistent")
}

/// 5★ neutral instance of `name` with its default weapon.
pub fn unit(name: &str) -> UnitInstance {
    let catalog = catalog();
    UnitInstance::with_default_loadout(catalog.lookup_archetype(name), 5)
}
