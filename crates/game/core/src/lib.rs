//! Deterministic 1v1 combat resolution.
//!
//! `combat-core` defines the canonical rules for a single exchange between
//! two configured units: stat resolution, ability classification, attack
//! ordering, damage, specials and post-combat effects. It exposes pure APIs
//! that never perform I/O; reference data comes in through a
//! [`CatalogOracle`], and every exchange flows through [`CombatEngine`].
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod skills;
pub mod state;
pub mod stats;

#[cfg(test)]
mod testing;

pub use combat::{
    AttackOrder, CombatContext, CombatEngine, CombatResult, Combatant, DamageParams, Role,
    SideSummary, StrikeRecord, advantage_pct, apply_damage, damage,
};
pub use config::CombatConfig;
pub use env::{
    AbilityDefinition, AbilityParams, CatalogBuilder, CatalogError, CatalogOracle,
    CatalogSnapshot, Color, DamageKind, Exposure, MoveType, SkillSlot, UnitArchetype, WeaponKind,
    WeaponType,
};
pub use error::{ErrorSeverity, GameError};
pub use skills::{HpCondition, SkillEffect, SkillSet, SpecialKind};
pub use state::{InstanceError, Loadout, TransientState, UnitInstance, Variance};
pub use stats::{HpGauge, Level, StatKind, StatLine, StatStack, resolve_stat, resolve_stats};
