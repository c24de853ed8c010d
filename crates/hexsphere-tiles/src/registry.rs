//! Sphere registry: named lookup for every sphere an orchestrator manages.

use std::collections::HashMap;

use crate::error::RegistryError;
use crate::sphere::Hexsphere;

/// All spheres owned by one orchestrator.
///
/// Passed around by reference; there is no global instance.
#[derive(Debug, Default)]
pub struct SphereRegistry {
    spheres: Vec<Hexsphere>,
    name_index: HashMap<String, usize>,
}

impl SphereRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sphere. Returns its index on success.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register(&mut self, sphere: Hexsphere) -> Result<usize, RegistryError> {
        if self.name_index.contains_key(sphere.name()) {
            return Err(RegistryError::DuplicateName(sphere.name().to_string()));
        }

        let idx = self.spheres.len();
        self.name_index.insert(sphere.name().to_string(), idx);
        self.spheres.push(sphere);
        Ok(idx)
    }

    /// Remove a sphere by name, returning it.
    ///
    /// Indices of spheres registered after it shift down by one.
    pub fn remove(&mut self, name: &str) -> Result<Hexsphere, RegistryError> {
        let idx = self
            .name_index
            .remove(name)
            .ok_or_else(|| RegistryError::UnknownSphere(name.to_string()))?;
        let sphere = self.spheres.remove(idx);
        for slot in self.name_index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Ok(sphere)
    }

    /// Look up a sphere by name.
    pub fn get_by_name(&self, name: &str) -> Option<&Hexsphere> {
        self.name_index.get(name).map(|&idx| &self.spheres[idx])
    }

    /// Look up a sphere by name for editing.
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut Hexsphere> {
        self.name_index
            .get(name)
            .map(|&idx| &mut self.spheres[idx])
    }

    /// Look up a sphere by index.
    pub fn get_by_index(&self, idx: usize) -> Option<&Hexsphere> {
        self.spheres.get(idx)
    }

    /// Number of registered spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Iterate over all registered spheres in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Hexsphere> {
        self.spheres.iter()
    }

    /// Iterate mutably over all registered spheres.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Hexsphere> {
        self.spheres.iter_mut()
    }
}
