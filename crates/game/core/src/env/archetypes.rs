//! Unit archetype definitions.
//!
//! An archetype is the immutable template behind every unit instance: its
//! movement category, weapon category, base stats per rarity, and the skills
//! it learns by default.

use std::collections::BTreeMap;
use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

use crate::env::abilities::SkillSlot;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::{StatKind, StatLine};

// ============================================================================
// Movement and Weapon Categories
// ============================================================================

/// Movement category of a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MoveType {
    Infantry,
    Cavalry,
    Flying,
    Armored,
}

impl MoveType {
    pub fn exposure(self) -> Exposure {
        match self {
            MoveType::Infantry => Exposure::INFANTRY,
            MoveType::Cavalry => Exposure::CAVALRY,
            MoveType::Flying => Exposure::FLYING,
            MoveType::Armored => Exposure::ARMORED,
        }
    }
}

/// Weapon color for the color triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Color {
    Red,
    Blue,
    Green,
    Colorless,
}

/// Weapon kind, independent of color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum WeaponKind {
    Sword,
    Lance,
    Axe,
    Tome,
    Bow,
    Dagger,
    Staff,
    Breath,
}

/// Which defensive stat mitigates an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageKind {
    /// Mitigated by Defense.
    Physical,
    /// Mitigated by Resistance.
    Magical,
}

impl DamageKind {
    pub fn mitigating_stat(self) -> StatKind {
        match self {
            DamageKind::Physical => StatKind::Def,
            DamageKind::Magical => StatKind::Res,
        }
    }
}

impl WeaponKind {
    pub fn damage_kind(self) -> DamageKind {
        match self {
            WeaponKind::Tome | WeaponKind::Staff | WeaponKind::Breath => DamageKind::Magical,
            WeaponKind::Sword
            | WeaponKind::Lance
            | WeaponKind::Axe
            | WeaponKind::Bow
            | WeaponKind::Dagger => DamageKind::Physical,
        }
    }

    /// Attack range when the weapon definition does not specify one.
    pub fn default_range(self) -> u8 {
        match self {
            WeaponKind::Sword | WeaponKind::Lance | WeaponKind::Axe | WeaponKind::Breath => 1,
            WeaponKind::Tome | WeaponKind::Bow | WeaponKind::Dagger | WeaponKind::Staff => 2,
        }
    }
}

/// A color × weapon-kind pair, written as e.g. `"Red Sword"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct WeaponType {
    pub color: Color,
    pub kind: WeaponKind,
}

impl WeaponType {
    pub const fn new(color: Color, kind: WeaponKind) -> Self {
        Self { color, kind }
    }

    pub fn damage_kind(&self) -> DamageKind {
        self.kind.damage_kind()
    }

    /// Categories a unit of this weapon type can be singled out by.
    pub fn exposure(&self) -> Exposure {
        match self.kind {
            WeaponKind::Breath => Exposure::DRAGON,
            _ => Exposure::empty(),
        }
    }
}

impl std::fmt::Display for WeaponType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

/// Weapon category string could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown weapon category '{0}', expected '<Color> <Kind>' such as 'Red Sword'")]
pub struct WeaponTypeError(pub String);

impl GameError for WeaponTypeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "CATALOG_WEAPON_TYPE"
    }
}

impl FromStr for WeaponType {
    type Err = WeaponTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(color), Some(kind), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(WeaponTypeError(s.to_string()));
        };
        let color = color
            .parse::<Color>()
            .map_err(|_| WeaponTypeError(s.to_string()))?;
        let kind = kind
            .parse::<WeaponKind>()
            .map_err(|_| WeaponTypeError(s.to_string()))?;
        Ok(Self { color, kind })
    }
}

impl TryFrom<String> for WeaponType {
    type Error = WeaponTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeaponType> for String {
    fn from(value: WeaponType) -> Self {
        value.to_string()
    }
}

bitflags::bitflags! {
    /// Categories an "effective against" weapon can target.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Exposure: u8 {
        const INFANTRY = 1 << 0;
        const CAVALRY = 1 << 1;
        const FLYING = 1 << 2;
        const ARMORED = 1 << 3;
        const DRAGON = 1 << 4;
    }
}

impl Exposure {
    /// Parses a category word as written in effect text ("flying", "dragons").
    pub fn from_word(word: &str) -> Option<Self> {
        let word = word.trim_matches(|c: char| !c.is_ascii_alphabetic());
        match word.to_ascii_lowercase().as_str() {
            "infantry" => Some(Self::INFANTRY),
            "cavalry" => Some(Self::CAVALRY),
            "flying" | "fliers" | "flier" => Some(Self::FLYING),
            "armored" | "armor" => Some(Self::ARMORED),
            "dragon" | "dragons" => Some(Self::DRAGON),
            _ => None,
        }
    }
}

// ============================================================================
// Base Stats
// ============================================================================

/// Level-40 value for one stat as (bane, neutral, boon).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spread(pub i32, pub i32, pub i32);

impl Spread {
    pub fn low(&self) -> i32 {
        self.0
    }

    pub fn mid(&self) -> i32 {
        self.1
    }

    pub fn high(&self) -> i32 {
        self.2
    }
}

/// Level-40 spreads for all five stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadLine {
    pub hp: Spread,
    pub atk: Spread,
    pub spd: Spread,
    pub def: Spread,
    pub res: Spread,
}

impl SpreadLine {
    pub fn get(&self, stat: StatKind) -> Spread {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Atk => self.atk,
            StatKind::Spd => self.spd,
            StatKind::Def => self.def,
            StatKind::Res => self.res,
        }
    }

    /// Neutral (mid) values.
    pub fn neutral(&self) -> StatLine {
        StatLine::new(
            self.hp.mid(),
            self.atk.mid(),
            self.spd.mid(),
            self.def.mid(),
            self.res.mid(),
        )
    }
}

/// Base stats for one rarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RarityStats {
    /// Neutral level-1 values.
    pub level1: StatLine,
    /// Level-40 (bane, neutral, boon) triples.
    pub level40: SpreadLine,
}

/// A skill the archetype knows, and the rarity at which it becomes default.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LearnableSkill {
    pub slot: SkillSlot,
    pub name: String,
    pub rarity: u8,
}

// ============================================================================
// Archetype
// ============================================================================

/// Immutable unit template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitArchetype {
    pub name: String,
    pub movement: MoveType,
    pub weapon: WeaponType,
    /// Base stats keyed by rarity. Rarities the unit cannot reach are absent.
    pub stats: BTreeMap<u8, RarityStats>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<LearnableSkill>,
}

impl UnitArchetype {
    pub const GENERIC_NAME: &'static str = "Generic";

    /// Baseline fallback archetype: a colorless infantry sword user with flat
    /// stats at every rarity and no skills.
    pub fn generic() -> Self {
        let stats = (1..=5u8)
            .map(|rarity| {
                let step = i32::from(rarity);
                let flat = |base: i32| Spread(base + step - 3, base + step, base + step + 3);
                (
                    rarity,
                    RarityStats {
                        level1: StatLine::new(15 + step, 5 + step, 5 + step, 5 + step, 5 + step),
                        level40: SpreadLine {
                            hp: flat(35),
                            atk: flat(25),
                            spd: flat(25),
                            def: flat(20),
                            res: flat(20),
                        },
                    },
                )
            })
            .collect();

        Self {
            name: Self::GENERIC_NAME.to_string(),
            movement: MoveType::Infantry,
            weapon: WeaponType::new(Color::Colorless, WeaponKind::Sword),
            stats,
            skills: Vec::new(),
        }
    }

    pub fn rarity_stats(&self, rarity: u8) -> Option<&RarityStats> {
        self.stats.get(&rarity)
    }

    /// Categories this archetype is exposed to via effectiveness.
    pub fn exposure(&self) -> Exposure {
        self.movement.exposure() | self.weapon.exposure()
    }

    /// Default skill for `slot` at `rarity`: the last listed skill for that
    /// slot unlocked at or below the rarity.
    pub fn default_skill(&self, slot: SkillSlot, rarity: u8) -> Option<&str> {
        self.skills
            .iter()
            .rev()
            .find(|skill| skill.slot == slot && skill.rarity <= rarity)
            .map(|skill| skill.name.as_str())
    }
}
