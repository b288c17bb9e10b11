//! Read-only reference data.
//!
//! The catalog is injected into the engine as a [`CatalogOracle`]; nothing in
//! the crate reads global tables. [`CatalogSnapshot`] is the in-memory
//! implementation used by loaders and tests.
mod abilities;
mod archetypes;
mod error;
mod snapshot;

pub use abilities::{AbilityDefinition, AbilityParams, SkillSlot};
pub use archetypes::{
    Color, DamageKind, Exposure, LearnableSkill, MoveType, RarityStats, Spread, SpreadLine,
    UnitArchetype, WeaponKind, WeaponType, WeaponTypeError,
};
pub use error::CatalogError;
pub use snapshot::{CatalogBuilder, CatalogSnapshot};

/// Reference catalog of archetypes and abilities.
///
/// Implementations must be immutable once built so a single catalog can be
/// shared across threads and concurrent resolutions.
pub trait CatalogOracle: Send + Sync {
    /// Archetype by exact name.
    fn archetype(&self, name: &str) -> Option<&UnitArchetype>;

    /// Archetype used when a lookup misses.
    fn default_archetype(&self) -> &UnitArchetype;

    /// Ability by slot and exact name.
    fn lookup_ability(&self, slot: SkillSlot, name: &str) -> Option<&AbilityDefinition>;

    /// Archetype by name, falling back to [`default_archetype`](Self::default_archetype).
    ///
    /// Never fails.
    fn lookup_archetype(&self, name: &str) -> &UnitArchetype {
        match self.archetype(name) {
            Some(archetype) => archetype,
            None => {
                let fallback = self.default_archetype();
                tracing::warn!(
                    requested = name,
                    fallback = %fallback.name,
                    "unknown archetype, using default"
                );
                fallback
            }
        }
    }
}
