//! Catalog assembly errors.

use crate::env::SkillSlot;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while assembling a [`CatalogSnapshot`](super::CatalogSnapshot).
///
/// Lookups against a finished catalog never fail; these only surface while
/// reference data is being loaded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    /// Two archetypes share a name.
    #[error("archetype '{0}' defined more than once")]
    DuplicateArchetype(String),

    /// Two abilities share a name within the same slot.
    #[error("ability '{name}' defined more than once in slot {slot}")]
    DuplicateAbility { slot: SkillSlot, name: String },

    /// The configured default archetype is not in the catalog.
    #[error("default archetype '{0}' not found, using the built-in generic unit")]
    MissingDefaultArchetype(String),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateArchetype(_) | Self::DuplicateAbility { .. } => {
                ErrorSeverity::Validation
            }
            Self::MissingDefaultArchetype(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateArchetype(_) => "CATALOG_DUPLICATE_ARCHETYPE",
            Self::DuplicateAbility { .. } => "CATALOG_DUPLICATE_ABILITY",
            Self::MissingDefaultArchetype(_) => "CATALOG_MISSING_DEFAULT",
        }
    }
}
