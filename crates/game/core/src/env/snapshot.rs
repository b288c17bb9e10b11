//! In-memory catalog backed by ordered maps.
//!
//! [`CatalogSnapshot`] is the standard [`CatalogOracle`] implementation. The
//! content loader builds one from data files; tests build small synthetic
//! ones in code.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::{AbilityDefinition, CatalogError, CatalogOracle, SkillSlot, UnitArchetype};

/// Immutable archetype and ability tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogSnapshot {
    archetypes: BTreeMap<String, UnitArchetype>,
    abilities: BTreeMap<SkillSlot, BTreeMap<String, AbilityDefinition>>,
    default_name: String,
    fallback: UnitArchetype,
}

impl CatalogSnapshot {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn archetypes(&self) -> impl Iterator<Item = &UnitArchetype> {
        self.archetypes.values()
    }

    pub fn abilities(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.abilities.values().flat_map(|by_name| by_name.values())
    }

    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.values().map(BTreeMap::len).sum()
    }
}

impl CatalogOracle for CatalogSnapshot {
    fn archetype(&self, name: &str) -> Option<&UnitArchetype> {
        self.archetypes.get(name)
    }

    fn default_archetype(&self) -> &UnitArchetype {
        self.archetypes
            .get(&self.default_name)
            .unwrap_or(&self.fallback)
    }

    fn lookup_ability(&self, slot: SkillSlot, name: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(&slot)?.get(name)
    }
}

/// Collects definitions and checks for duplicates.
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    archetypes: Vec<UnitArchetype>,
    abilities: Vec<AbilityDefinition>,
    default_name: Option<String>,
}

impl CatalogBuilder {
    pub fn archetype(mut self, archetype: UnitArchetype) -> Self {
        self.archetypes.push(archetype);
        self
    }

    pub fn archetypes(mut self, archetypes: impl IntoIterator<Item = UnitArchetype>) -> Self {
        self.archetypes.extend(archetypes);
        self
    }

    pub fn ability(mut self, ability: AbilityDefinition) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn abilities(mut self, abilities: impl IntoIterator<Item = AbilityDefinition>) -> Self {
        self.abilities.extend(abilities);
        self
    }

    /// Name of the archetype unknown lookups fall back to.
    pub fn default_archetype(mut self, name: impl Into<String>) -> Self {
        self.default_name = Some(name.into());
        self
    }

    /// Builds the snapshot.
    ///
    /// A missing default archetype is not an error: lookups fall back to
    /// [`UnitArchetype::generic`] and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on duplicate archetype or ability names.
    pub fn build(self) -> Result<CatalogSnapshot, CatalogError> {
        let mut archetypes = BTreeMap::new();
        for archetype in self.archetypes {
            match archetypes.entry(archetype.name.clone()) {
                Entry::Occupied(_) => return Err(CatalogError::DuplicateArchetype(archetype.name)),
                Entry::Vacant(slot) => {
                    slot.insert(archetype);
                }
            }
        }

        let mut abilities: BTreeMap<SkillSlot, BTreeMap<String, AbilityDefinition>> =
            BTreeMap::new();
        for ability in self.abilities {
            let by_name = abilities.entry(ability.slot).or_default();
            match by_name.entry(ability.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(CatalogError::DuplicateAbility {
                        slot: ability.slot,
                        name: ability.name,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(ability);
                }
            }
        }

        let default_name = self
            .default_name
            .unwrap_or_else(|| UnitArchetype::GENERIC_NAME.to_string());
        if !archetypes.contains_key(&default_name) && default_name != UnitArchetype::GENERIC_NAME {
            let error = CatalogError::MissingDefaultArchetype(default_name.clone());
            tracing::warn!(%error, "catalog default archetype missing");
        }

        Ok(CatalogSnapshot {
            archetypes,
            abilities,
            default_name,
            fallback: UnitArchetype::generic(),
        })
    }
}
