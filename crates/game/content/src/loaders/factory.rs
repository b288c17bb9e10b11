//! Content factory for building the reference catalog from data files.

use std::path::{Path, PathBuf};

use combat_core::{AbilityDefinition, CatalogSnapshot, CombatConfig, UnitArchetype};

use crate::loaders::{AbilityLoader, ArchetypeLoader, ConfigLoader, LoadResult};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── heroes.ron
/// └── skills.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory for the data set shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load unit archetypes from `heroes.ron`.
    pub fn load_archetypes(&self) -> LoadResult<Vec<UnitArchetype>> {
        let path = self.data_dir.join("heroes.ron");
        ArchetypeLoader::load(&path)
    }

    /// Load and classify abilities from `skills.ron`.
    pub fn load_abilities(&self) -> LoadResult<Vec<AbilityDefinition>> {
        let path = self.data_dir.join("skills.ron");
        AbilityLoader::load(&path)
    }

    /// Assembles the reference catalog.
    ///
    /// The config's `default_archetype` becomes the fallback for unknown
    /// names. Duplicate archetypes or abilities fail the load.
    ///
    /// # Arguments
    ///
    /// * `config` - Combat configuration (load via `load_config()`)
    pub fn load_catalog(&self, config: &CombatConfig) -> LoadResult<CatalogSnapshot> {
        let catalog = CatalogSnapshot::builder()
            .archetypes(self.load_archetypes()?)
            .abilities(self.load_abilities()?)
            .default_archetype(config.default_archetype.clone())
            .build()
            .map_err(|e| {
                anyhow::anyhow!(
                    "Failed to assemble catalog from {}: {}",
                    self.data_dir.display(),
                    e
                )
            })?;

        tracing::info!(
            archetypes = catalog.archetype_count(),
            abilities = catalog.ability_count(),
            data_dir = %self.data_dir.display(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Loads the config and the catalog built from it.
    pub fn load_all(&self) -> LoadResult<(CombatConfig, CatalogSnapshot)> {
        let config = self.load_config()?;
        let catalog = self.load_catalog(&config)?;
        Ok((config, catalog))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert!(ContentFactory::bundled().data_dir().ends_with("data"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let factory = ContentFactory::new("/nonexistent/combat-data");
        let err = factory.load_config().unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
