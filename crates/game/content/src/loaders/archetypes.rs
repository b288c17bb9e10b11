//! Archetype catalog loader.

use std::path::Path;

use combat_core::UnitArchetype;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Archetype catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroCatalog {
    pub heroes: Vec<UnitArchetype>,
}

/// Loader for unit archetypes from RON files.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    /// Load archetypes from a RON file.
    ///
    /// Weapon categories are written as `"<Color> <Kind>"` strings and are
    /// validated here; an unknown category fails the whole file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a HeroCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<UnitArchetype>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse hero catalog RON {}: {}", path.display(), e)
        })
    }

    /// Parse archetypes from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<UnitArchetype>> {
        let catalog: HeroCatalog = ron::from_str(content)?;
        tracing::debug!(count = catalog.heroes.len(), "loaded archetypes");
        Ok(catalog.heroes)
    }
}
