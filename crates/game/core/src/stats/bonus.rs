//! Contribution ledger for a single resolved stat.
//!
//! Every resolved stat is the floored sum of its contributions:
//!
//! ```text
//! value = max(base + merge + weapon + skills + buff - debuff, 0)
//! ```
//!
//! The ledger keeps each contribution with its source so callers can show a
//! breakdown without re-running the resolver.

/// Where a stat contribution came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatSource {
    /// Archetype base value for the unit's rarity, level and variance.
    Base,
    /// Merge-level bonus point(s).
    Merge,
    /// Weapon might (Atk only).
    WeaponMight,
    /// Stat delta from an equipped Weapon, PassiveA or Seal ability.
    Skill,
    /// Active buff magnitude.
    Buff,
    /// Active debuff magnitude (stored negated).
    Debuff,
}

/// A single signed contribution to a stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contribution {
    pub source: StatSource,
    pub amount: i32,
}

/// Ordered set of contributions for one stat.
///
/// # Example
/// ```
/// # use combat_core::stats::{StatSource, StatStack};
/// let mut stack = StatStack::new(37);
/// stack.add(StatSource::WeaponMight, 13);
/// stack.add(StatSource::Skill, 3);
/// stack.add(StatSource::Debuff, -60);
/// // 37 + 13 + 3 - 60 = -7, floored
/// assert_eq!(stack.total(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatStack {
    contributions: Vec<Contribution>,
}

impl StatStack {
    /// Starts a stack from the archetype base value.
    pub fn new(base: i32) -> Self {
        Self {
            contributions: vec![Contribution {
                source: StatSource::Base,
                amount: base,
            }],
        }
    }

    /// Adds a contribution. Zero amounts are not recorded.
    pub fn add(&mut self, source: StatSource, amount: i32) {
        if amount != 0 {
            self.contributions.push(Contribution { source, amount });
        }
    }

    /// Sum of all contributions, floored at zero.
    pub fn total(&self) -> i32 {
        self.raw_total().max(0)
    }

    /// Sum of all contributions without the floor.
    pub fn raw_total(&self) -> i32 {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    /// Sum of contributions from one source.
    pub fn from_source(&self, source: StatSource) -> i32 {
        self.contributions
            .iter()
            .filter(|c| c.source == source)
            .map(|c| c.amount)
            .sum()
    }

    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }
}
