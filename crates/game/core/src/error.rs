//! Common error infrastructure for combat-core.
//!
//! Combat resolution itself is total: unknown names fall back to defaults and
//! missing stat data becomes a `None` sentinel. The error types here describe
//! input the caller may want to reject up front (instance validation,
//! catalog assembly, weapon category parsing).

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// A fallback exists; the caller may continue with degraded data.
    ///
    /// Examples: configured default archetype missing from the catalog
    Recoverable,

    /// Invalid input, should not be used without changes.
    ///
    /// Examples: boon equal to bane, duplicate ability name
    Validation,

    /// Unexpected inconsistency that indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: std::fmt::Display + std::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
