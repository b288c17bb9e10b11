//! Ability catalog loader.
//!
//! Ability records are plain data; classification into typed effects
//! happens in [`AbilityDefinition::new`] as each record is converted.

use std::path::Path;

use combat_core::{AbilityDefinition, AbilityParams, SkillSlot};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One ability as written in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRecord {
    pub name: String,
    pub slot: SkillSlot,
    #[serde(default)]
    pub params: AbilityParams,
    #[serde(default)]
    pub description: String,
    /// Movement/weapon restriction on who may inherit it.
    #[serde(default)]
    pub inherit: Option<String>,
}

impl AbilityRecord {
    /// Classifies the record into a definition.
    pub fn into_definition(self) -> AbilityDefinition {
        let definition =
            AbilityDefinition::new(self.name, self.slot, self.params, self.description);
        match self.inherit {
            Some(inherit) => definition.with_inherit(inherit),
            None => definition,
        }
    }
}

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<AbilityRecord>,
}

/// Loader for the ability catalog from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load and classify every ability in a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a SkillCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse skill catalog RON {}: {}", path.display(), e)
        })
    }

    /// Parse and classify abilities from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<AbilityDefinition>> {
        let catalog: SkillCatalog = ron::from_str(content)?;
        let definitions: Vec<_> = catalog
            .skills
            .into_iter()
            .map(AbilityRecord::into_definition)
            .collect();
        tracing::debug!(count = definitions.len(), "loaded abilities");
        Ok(definitions)
    }
}
