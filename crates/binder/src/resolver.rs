//! Resolution of the default pipeline script for a branch run.

use std::sync::Arc;

use mbdefaults_core::{Action, BranchRun, Definition, ExecutionHandle, Listener, DEFAULT_SCRIPT_ID};
use mbdefaults_storage::ConfigStore;
use tracing::{debug, info, instrument, warn};

use crate::{BinderError, HostContext, Result, ScriptRuntime};

/// Resolves the default script for a branch run into a definition.
///
/// Where the script comes from (checkout, workspace, managed files) is
/// decided entirely by the store. Nothing is cached: every call performs
/// a fresh lookup.
#[derive(Clone)]
pub struct DefinitionResolver {
    host: Arc<dyn HostContext>,
    store: Arc<dyn ConfigStore>,
    runtime: Arc<dyn ScriptRuntime>,
}

impl DefinitionResolver {
    /// Create a resolver.
    pub fn new(
        host: Arc<dyn HostContext>,
        store: Arc<dyn ConfigStore>,
        runtime: Arc<dyn ScriptRuntime>,
    ) -> Self {
        Self { host, store, runtime }
    }

    /// Create the definition for the run behind `handle`.
    ///
    /// Fails with [`BinderError::Environment`] before touching the store
    /// when the host is unavailable or the handle is not running a branch
    /// job, and with [`BinderError::NotFound`] when no tier has the script.
    #[instrument(skip_all, fields(handle = %handle.id))]
    pub fn create(
        &self,
        handle: &ExecutionHandle,
        listener: &dyn Listener,
        actions: &[Action],
    ) -> Result<Definition> {
        let run = self.branch_run(handle)?;

        let Some(config) = self.store.lookup(run, DEFAULT_SCRIPT_ID)? else {
            warn!(job = %run.job, "No default {} in any tier", DEFAULT_SCRIPT_ID);
            return Err(BinderError::NotFound {
                id: DEFAULT_SCRIPT_ID.to_string(),
            });
        };

        info!(job = %run.job, origin = %config.origin, "Using default {}", DEFAULT_SCRIPT_ID);
        let definition = self
            .runtime
            .build(&config.content, true)
            .create(handle, listener, actions)?;
        Ok(definition)
    }

    fn branch_run<'a>(&self, handle: &'a ExecutionHandle) -> Result<&'a BranchRun> {
        let Some(instance) = self.host.instance() else {
            warn!("Host instance unavailable");
            return Err(BinderError::Environment("host is not available".to_string()));
        };
        debug!(host = %instance.name, "Host available");

        let Some(exec) = handle.current_executable() else {
            warn!("Handle has no executable");
            return Err(BinderError::Environment("handle has no executable".to_string()));
        };

        exec.as_branch_run().ok_or_else(|| {
            warn!(kind = exec.kind(), "Not a branch job run");
            BinderError::Environment(format!("{} is not a branch job run", exec.kind()))
        })
    }
}
