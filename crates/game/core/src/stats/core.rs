//! Core stats: the five combat attributes every unit carries.
//!
//! A [`StatLine`] is used for anything shaped like "one number per stat":
//! base values, skill deltas, buff and debuff magnitudes, resolved stats.

use std::ops::{Add, AddAssign, Index, IndexMut, Neg, Sub};

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The five combat stats, in canonical order.
///
/// The declaration order is the tie-break order used when ranking stats for
/// merge bonuses: HP, Atk, Spd, Def, Res.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum StatKind {
    #[strum(to_string = "HP")]
    Hp,
    #[strum(to_string = "Atk", serialize = "Attack")]
    Atk,
    #[strum(to_string = "Spd", serialize = "Speed")]
    Spd,
    #[strum(to_string = "Def", serialize = "Defense")]
    Def,
    #[strum(to_string = "Res", serialize = "Resistance")]
    Res,
}

impl StatKind {
    pub const COUNT: usize = 5;

    /// Position of this stat in the canonical order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stats that can be buffed or debuffed in combat (everything but HP).
    pub fn combat() -> impl Iterator<Item = StatKind> {
        Self::iter().filter(|stat| *stat != StatKind::Hp)
    }
}

/// One signed value per stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatLine {
    pub hp: i32,
    pub atk: i32,
    pub spd: i32,
    pub def: i32,
    pub res: i32,
}

impl StatLine {
    pub const ZERO: StatLine = StatLine::new(0, 0, 0, 0, 0);

    pub const fn new(hp: i32, atk: i32, spd: i32, def: i32, res: i32) -> Self {
        Self {
            hp,
            atk,
            spd,
            def,
            res,
        }
    }

    /// Builds a line with `value` on every stat in `stats` and zero elsewhere.
    pub fn splat(stats: impl IntoIterator<Item = StatKind>, value: i32) -> Self {
        let mut line = Self::ZERO;
        for stat in stats {
            line[stat] = value;
        }
        line
    }

    pub fn get(&self, stat: StatKind) -> i32 {
        self[stat]
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Iterates `(stat, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, i32)> + '_ {
        StatKind::iter().map(move |stat| (stat, self[stat]))
    }

    /// Per-stat maximum. Used where same-stat effects do not stack.
    pub fn max(&self, other: &StatLine) -> StatLine {
        let mut out = *self;
        for stat in StatKind::iter() {
            out[stat] = out[stat].max(other[stat]);
        }
        out
    }

    /// Per-stat absolute value.
    pub fn magnitude(&self) -> StatLine {
        let mut out = *self;
        for stat in StatKind::iter() {
            out[stat] = out[stat].abs();
        }
        out
    }

    /// Sum of Atk/Spd/Def/Res.
    pub fn combat_total(&self) -> i32 {
        StatKind::combat().map(|stat| self[stat]).sum()
    }
}

impl Index<StatKind> for StatLine {
    type Output = i32;

    fn index(&self, stat: StatKind) -> &i32 {
        match stat {
            StatKind::Hp => &self.hp,
            StatKind::Atk => &self.atk,
            StatKind::Spd => &self.spd,
            StatKind::Def => &self.def,
            StatKind::Res => &self.res,
        }
    }
}

impl IndexMut<StatKind> for StatLine {
    fn index_mut(&mut self, stat: StatKind) -> &mut i32 {
        match stat {
            StatKind::Hp => &mut self.hp,
            StatKind::Atk => &mut self.atk,
            StatKind::Spd => &mut self.spd,
            StatKind::Def => &mut self.def,
            StatKind::Res => &mut self.res,
        }
    }
}

impl Add for StatLine {
    type Output = StatLine;

    fn add(mut self, rhs: StatLine) -> StatLine {
        self += rhs;
        self
    }
}

impl AddAssign for StatLine {
    fn add_assign(&mut self, rhs: StatLine) {
        for stat in StatKind::iter() {
            self[stat] += rhs[stat];
        }
    }
}

impl Sub for StatLine {
    type Output = StatLine;

    fn sub(self, rhs: StatLine) -> StatLine {
        self + (-rhs)
    }
}

impl Neg for StatLine {
    type Output = StatLine;

    fn neg(self) -> StatLine {
        StatLine::new(-self.hp, -self.atk, -self.spd, -self.def, -self.res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_kind_parses_short_and_long_names() {
        assert_eq!("Atk".parse::<StatKind>().unwrap(), StatKind::Atk);
        assert_eq!("attack".parse::<StatKind>().unwrap(), StatKind::Atk);
        assert_eq!("HP".parse::<StatKind>().unwrap(), StatKind::Hp);
        assert_eq!("res".parse::<StatKind>().unwrap(), StatKind::Res);
        assert!("Luck".parse::<StatKind>().is_err());
    }

    #[test]
    fn splat_sets_only_listed_stats() {
        let line = StatLine::splat([StatKind::Def, StatKind::Res], 3);
        assert_eq!(line, StatLine::new(0, 0, 0, 3, 3));
    }

    #[test]
    fn max_takes_the_stronger_entry_per_stat() {
        let a = StatLine::new(0, 7, 0, 3, 0);
        let b = StatLine::new(0, 4, 0, 5, 2);
        assert_eq!(a.max(&b), StatLine::new(0, 7, 0, 5, 2));
    }

    #[test]
    fn combat_total_ignores_hp() {
        let line = StatLine::new(10, 1, 2, 3, 4);
        assert_eq!(line.combat_total(), 10);
    }
}
