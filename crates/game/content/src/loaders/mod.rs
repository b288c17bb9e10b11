//! Content loaders for reading catalog data from files.
//!
//! Each loader turns one RON/TOML file into combat-core values;
//! [`ContentFactory`] ties them together for a data directory.

pub mod abilities;
pub mod archetypes;
pub mod config;
pub mod factory;

pub use abilities::{AbilityLoader, AbilityRecord};
pub use archetypes::ArchetypeLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
