//! Default pipeline definitions for multibranch branch jobs.
//!
//! Provides the definition provider a host registers at start-up, its
//! visibility filter, and the resolver that turns the default script into
//! a runnable definition.

#![warn(missing_docs)]

pub mod error;
pub mod host;
pub mod runtime;
pub mod resolver;
pub mod descriptor;
pub mod registry;

pub use error::{BinderError, RegistryError, RuntimeError, Result};
pub use host::{HostContext, HostInstance, StaticHost};
pub use runtime::{DefinitionBuilder, ScriptDefinitionRuntime, ScriptRuntime};
pub use resolver::DefinitionResolver;
pub use descriptor::{DefaultsDescriptor, DefinitionDescriptor, HideElsewhere, VisibilityFilter};
pub use registry::{register, ExtensionRegistry};
