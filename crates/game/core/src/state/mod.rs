//! Unit instance state.
//!
//! Instances are the engine's only per-call input. Everything here is a
//! plain value type; the resolver hands back new [`TransientState`]s rather
//! than mutating what it was given.
mod error;
mod instance;

pub use error::InstanceError;
pub use instance::{Loadout, RARITY_RANGE, TransientState, UnitInstance, Variance};
