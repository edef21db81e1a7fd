//! Resource registry keyed by Terraform type name.

use std::collections::HashMap;

use tf_mapper::{MemoryResourceData, ResourceData, Schema};

use crate::resource::{Resource, ResourceError};
use crate::resources::builtin_resources;

/// Central registry of the resources the provider manages.
///
/// Each resource's schema is built once, when the registry is created.
pub struct ResourceRegistry {
    resources: Vec<&'static dyn Resource>,
    schemas: Vec<Schema>,
    by_type_name: HashMap<&'static str, usize>,
}

impl ResourceRegistry {
    /// Creates a registry pre-loaded with all builtin resources.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_resources(builtin_resources())
    }

    /// Creates a registry over `resources`. Later duplicates replace earlier ones.
    #[must_use]
    pub fn from_resources(resources: Vec<&'static dyn Resource>) -> Self {
        let schemas = resources.iter().map(|resource| resource.schema()).collect();
        let by_type_name = resources
            .iter()
            .enumerate()
            .map(|(idx, resource)| (resource.type_name(), idx))
            .collect();

        Self {
            resources,
            schemas,
            by_type_name,
        }
    }

    /// Looks up a resource by type name.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&'static dyn Resource> {
        self.by_type_name
            .get(type_name)
            .and_then(|&idx| self.resources.get(idx))
            .copied()
    }

    /// Returns the cached schema of a resource type.
    #[must_use]
    pub fn schema(&self, type_name: &str) -> Option<&Schema> {
        self.by_type_name.get(type_name).and_then(|&idx| self.schemas.get(idx))
    }

    /// Returns `true` if `type_name` is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.by_type_name.contains_key(type_name)
    }

    /// Returns the registered type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.iter().map(|resource| resource.type_name())
    }

    /// Returns the number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if no resources are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Creates empty state for a resource type.
    pub fn new_state(&self, type_name: &str) -> Result<MemoryResourceData<'_>, ResourceError> {
        self.schema(type_name)
            .map(MemoryResourceData::new)
            .ok_or_else(|| unknown(type_name))
    }

    /// Applies an API response to state using the resource's cached schema.
    pub fn apply_response(&self, type_name: &str, body: &str, dest: &mut dyn ResourceData) -> Result<(), ResourceError> {
        let (resource, schema) = self.entry(type_name)?;
        resource.apply_response(body, dest, schema)
    }

    fn entry(&self, type_name: &str) -> Result<(&'static dyn Resource, &Schema), ResourceError> {
        let resource = self.get(type_name).ok_or_else(|| unknown(type_name))?;
        let schema = self.schema(type_name).ok_or_else(|| unknown(type_name))?;
        Ok((resource, schema))
    }
}

fn unknown(type_name: &str) -> ResourceError {
    ResourceError::UnknownResource {
        type_name: type_name.to_owned(),
    }
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("type_names", &self.type_names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
