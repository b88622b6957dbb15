//! Extension registry.

use std::sync::Arc;

use mbdefaults_core::ConfigTarget;
use tracing::info;

use crate::{DefaultsDescriptor, DefinitionDescriptor, DefinitionResolver, HideElsewhere, RegistryError, VisibilityFilter};

/// Registry of definition descriptors and visibility filters.
///
/// Descriptors are listed in registration order.
#[derive(Default)]
pub struct ExtensionRegistry {
    descriptors: Vec<Arc<dyn DefinitionDescriptor>>,
    filters: Vec<Arc<dyn VisibilityFilter>>,
}

impl ExtensionRegistry {
    /// Create a new registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor.
    pub fn register_descriptor(&mut self, descriptor: Arc<dyn DefinitionDescriptor>) -> Result<(), RegistryError> {
        if self.descriptor(descriptor.id()).is_some() {
            return Err(RegistryError::Duplicate {
                kind: "descriptor",
                id: descriptor.id().to_string(),
            });
        }
        info!(id = descriptor.id(), "Registered definition descriptor");
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Register a visibility filter.
    pub fn register_filter(&mut self, filter: Arc<dyn VisibilityFilter>) -> Result<(), RegistryError> {
        if self.filter(filter.id()).is_some() {
            return Err(RegistryError::Duplicate {
                kind: "filter",
                id: filter.id().to_string(),
            });
        }
        info!(id = filter.id(), "Registered visibility filter");
        self.filters.push(filter);
        Ok(())
    }

    /// Get a descriptor by ID.
    pub fn descriptor(&self, id: &str) -> Option<&Arc<dyn DefinitionDescriptor>> {
        self.descriptors.iter().find(|d| d.id() == id)
    }

    /// Get a visibility filter by ID.
    pub fn filter(&self, id: &str) -> Option<&Arc<dyn VisibilityFilter>> {
        self.filters.iter().find(|f| f.id() == id)
    }

    /// List all descriptors.
    pub fn descriptors(&self) -> &[Arc<dyn DefinitionDescriptor>] {
        &self.descriptors
    }

    /// Descriptors every filter lets through for `context`.
    pub fn visible_descriptors(&self, context: &ConfigTarget) -> Vec<&Arc<dyn DefinitionDescriptor>> {
        self.descriptors
            .iter()
            .filter(|&d| self.filters.iter().all(|f| f.filter(context, &**d)))
            .collect()
    }
}

/// Register the defaults provider and its visibility filter.
///
/// Either both are added or, on a duplicate, neither is.
pub fn register(registry: &mut ExtensionRegistry, resolver: Arc<DefinitionResolver>) -> Result<(), RegistryError> {
    if registry.descriptor(DefaultsDescriptor::ID).is_some() {
        return Err(RegistryError::Duplicate {
            kind: "descriptor",
            id: DefaultsDescriptor::ID.to_string(),
        });
    }
    if registry.filter(HideElsewhere::ID).is_some() {
        return Err(RegistryError::Duplicate {
            kind: "filter",
            id: HideElsewhere::ID.to_string(),
        });
    }
    registry.register_descriptor(Arc::new(DefaultsDescriptor::new(resolver)))?;
    registry.register_filter(Arc::new(HideElsewhere))?;
    Ok(())
}
