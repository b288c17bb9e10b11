//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys take their [`CombatConfig::default`] values.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing CombatConfig
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)?;
        Ok(config)
    }
}
