//! Combat resolution system.
//!
//! Resolves a single 1v1 exchange. All combat logic is deterministic and
//! side-effect free: the same two instances against the same catalog always
//! produce the same [`CombatResult`].
//!
//! # Architecture
//!
//! - **Combatant**: each side resolved once into stats, skills and weapon
//! - **Order**: strike sequence from range, Spd and ordering skills
//! - **Damage**: integer-percent formula, truncating at every step
//! - **Resolve**: strike loop with specials, then non-lethal aftermath
//!
//! # Core Functions
//!
//! - `CombatEngine::resolve`: complete exchange resolution
//! - `plan_attack_order`: who strikes, in what order
//! - `damage`: one hit's damage from its parameters
//! - `advantage_pct`: color-triangle modifier

pub mod aftermath;
pub mod combatant;
pub mod context;
pub mod damage;
pub mod order;
pub mod resolve;
pub mod result;
pub mod special;
pub mod triangle;

pub use aftermath::{PostCombatDamage, Status, non_lethal};
pub use combatant::{Combatant, WeaponProfile};
pub use context::{CombatContext, Role};
pub use damage::{DamageParams, apply_damage, damage, is_effective};
pub use order::{AttackOrder, OrderPlan, can_counter, does_follow_up, plan_attack_order};
pub use resolve::CombatEngine;
pub use result::{CombatResult, SideSummary, StrikeRecord};
pub use special::{SpecialGauge, effective_cooldown};
pub use triangle::advantage_pct;
