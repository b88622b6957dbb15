//! Workspace tier: scripts left in the run's workspace directory.

use std::fs;

use mbdefaults_core::{BranchRun, ConfigOrigin, NamedConfig};
use tracing::{debug, instrument};

use super::{validate_id, ConfigStore, Result, StoreError};

/// Reads `<workspace>/<id>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkspaceTier;

impl WorkspaceTier {
    /// Create the tier.
    pub fn new() -> Self {
        Self
    }
}

impl ConfigStore for WorkspaceTier {
    #[instrument(skip(self, run), fields(job = %run.job))]
    fn lookup(&self, run: &BranchRun, id: &str) -> Result<Option<NamedConfig>> {
        validate_id(id)?;

        let Some(workspace) = &run.workspace else {
            debug!("Run has no workspace");
            return Ok(None);
        };

        let path = workspace.join(id);
        if !path.is_file() {
            debug!(path = %path.display(), "Not present in workspace");
            return Ok(None);
        }

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(NamedConfig::new(id, content, ConfigOrigin::Workspace))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => Err(StoreError::NotUtf8(id.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
