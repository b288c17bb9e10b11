//! Reference catalog content and loaders.
//!
//! This crate houses the static combat content and the loaders for its
//! RON/TOML data files:
//! - Unit archetypes: base stats per rarity and default skills (RON)
//! - Abilities: weapons, specials and passives with their effect text (RON)
//! - Combat configuration (TOML)
//!
//! Content is assembled into a [`CatalogSnapshot`](combat_core::CatalogSnapshot)
//! that the engine reads through the `CatalogOracle` trait. It never appears
//! in unit instances.
//!
//! All loaders use combat-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, AbilityRecord, ArchetypeLoader, ConfigLoader, ContentFactory, LoadResult,
};
