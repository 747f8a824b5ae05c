//! Species lookup.

use crate::{species::Species, types::SpeciesId};
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("species '{0}' is already registered")]
    Duplicate(SpeciesId),
    #[error("unknown species '{0}'")]
    Unknown(String),
}

/// Registered species by id.
///
/// Species are immutable once registered and handed out as
/// `Arc<Species>`, so independent growth runs can share them.
#[derive(Debug, Default)]
pub struct SpeciesRegistry {
    species: BTreeMap<SpeciesId, Arc<Species>>,
}

impl SpeciesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in species.
    pub fn with_defaults() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(Species::spruce())?;
        Ok(registry)
    }

    pub fn register(&mut self, species: Species) -> Result<Arc<Species>, RegistryError> {
        if self.species.contains_key(&species.id) {
            return Err(RegistryError::Duplicate(species.id));
        }
        let species = Arc::new(species);
        self.species.insert(species.id.clone(), Arc::clone(&species));
        tracing::debug!(id = %species.id, "registered species");
        Ok(species)
    }

    pub fn get(&self, id: &SpeciesId) -> Option<Arc<Species>> {
        self.species.get(id).cloned()
    }

    /// Looks a species up by id or, failing that, by display name
    /// (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<Arc<Species>> {
        self.species
            .get(&SpeciesId::new(name))
            .or_else(|| {
                self.species
                    .values()
                    .find(|s| s.name.eq_ignore_ascii_case(name))
            })
            .cloned()
    }

    pub fn require(&self, name: &str) -> Result<Arc<Species>, RegistryError> {
        self.get_by_name(name)
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Species>> {
        self.species.values()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
