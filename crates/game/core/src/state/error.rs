//! Unit instance validation errors.
//!
//! The resolver never validates its inputs. Callers that build instances
//! from untrusted data run [`UnitInstance::validate`](crate::state::UnitInstance::validate)
//! first and get one of these.

use crate::error::{ErrorSeverity, GameError};
use crate::stats::StatKind;

/// A unit instance breaks one of its construction invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstanceError {
    /// Rarity outside 1..=5.
    #[error("Rarity {rarity} is out of range (1-5)")]
    RarityOutOfRange { rarity: u8 },

    /// Merge level above the cap.
    #[error("Merge level {merges} exceeds maximum {max}")]
    MergeOutOfRange { merges: u8, max: u8 },

    /// Boon and bane name the same stat.
    #[error("Boon and bane both target {stat}")]
    BoonEqualsBane { stat: StatKind },
}

impl GameError for InstanceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RarityOutOfRange { .. } => "INSTANCE_RARITY",
            Self::MergeOutOfRange { .. } => "INSTANCE_MERGE",
            Self::BoonEqualsBane { .. } => "INSTANCE_VARIANCE",
        }
    }
}
