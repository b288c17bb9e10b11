//! Ability predicate layer.
//!
//! Abilities are classified once, when the catalog builds its
//! [`AbilityDefinition`](crate::env::AbilityDefinition)s, into typed
//! [`SkillEffect`] variants. Combat code queries a per-unit [`SkillSet`]
//! that applies HP gating.

mod classify;
mod effect;
mod query;
mod text;

pub use classify::{Classified, classify};
pub use effect::{Aftermath, HpCondition, SkillEffect, SpecialBonus, SpecialKind, StrikeSpecial};
pub use query::SkillSet;
pub use text::{extract_numbers, first_percent, parse_hp_condition, parse_stat_deltas};
