//! Definition provider descriptor and its visibility filter.

use std::sync::Arc;

use mbdefaults_core::{Action, ConfigTarget, Definition, ExecutionHandle, Listener, DEFAULT_SCRIPT_ID};

use crate::{DefinitionResolver, Result};

/// A kind of pipeline definition the host can offer.
pub trait DefinitionDescriptor: Send + Sync {
    /// Stable identifier.
    fn id(&self) -> &str;

    /// Label shown in configuration pages.
    fn display_name(&self) -> String;

    /// Create the definition for a starting run.
    fn create(
        &self,
        handle: &ExecutionHandle,
        listener: &dyn Listener,
        actions: &[Action],
    ) -> Result<Definition>;
}

/// Decides whether a descriptor is offered for a configuration target.
pub trait VisibilityFilter: Send + Sync {
    /// Stable identifier.
    fn id(&self) -> &str;

    /// Return false to hide `descriptor` when rendering `context`.
    fn filter(&self, context: &ConfigTarget, descriptor: &dyn DefinitionDescriptor) -> bool;
}

/// Provider for "pipeline script from default Jenkinsfile".
pub struct DefaultsDescriptor {
    resolver: Arc<DefinitionResolver>,
}

impl DefaultsDescriptor {
    /// Descriptor identifier.
    pub const ID: &'static str = "multibranch-defaults";

    /// Create the descriptor.
    pub fn new(resolver: Arc<DefinitionResolver>) -> Self {
        Self { resolver }
    }
}

impl DefinitionDescriptor for DefaultsDescriptor {
    fn id(&self) -> &str {
        Self::ID
    }

    fn display_name(&self) -> String {
        format!("Pipeline script from default {}", DEFAULT_SCRIPT_ID)
    }

    fn create(
        &self,
        handle: &ExecutionHandle,
        listener: &dyn Listener,
        actions: &[Action],
    ) -> Result<Definition> {
        self.resolver.create(handle, listener, actions)
    }
}

/// Shows the defaults provider only on branch jobs of a
/// multibranch-with-defaults project. Other descriptors are never hidden.
#[derive(Debug, Default, Clone, Copy)]
pub struct HideElsewhere;

impl HideElsewhere {
    /// Filter identifier.
    pub const ID: &'static str = "multibranch-defaults-visibility";
}

impl VisibilityFilter for HideElsewhere {
    fn id(&self) -> &str {
        Self::ID
    }

    fn filter(&self, context: &ConfigTarget, descriptor: &dyn DefinitionDescriptor) -> bool {
        if descriptor.id() == DefaultsDescriptor::ID {
            return context.is_defaults_branch_job();
        }
        true
    }
}
