//! Execution handles and the runs behind them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::HandleId;

/// Handle to one in-progress job run.
///
/// The host creates a handle when a run starts and drops it when the run
/// finishes. Consumers only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionHandle {
    /// Handle ID
    pub id: HandleId,

    /// The executable currently attached to this handle
    executable: Option<RunContext>,
}

impl ExecutionHandle {
    /// Create a handle with an attached executable.
    pub fn new(executable: RunContext) -> Self {
        Self {
            id: HandleId::new(),
            executable: Some(executable),
        }
    }

    /// Create a handle whose executable has not been attached yet.
    pub fn detached() -> Self {
        Self {
            id: HandleId::new(),
            executable: None,
        }
    }

    /// The run this handle is executing, if the host has attached one.
    pub fn current_executable(&self) -> Option<&RunContext> {
        self.executable.as_ref()
    }
}

/// The kinds of run a handle can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunContext {
    /// A run of a job generated for one branch of a multibranch project.
    BranchJobRun(BranchRun),

    /// A run of a standalone pipeline job.
    StandaloneRun(JobRun),

    /// Any other executable the host schedules (freestyle builds, scans, ...).
    Other {
        /// Host-specific kind name
        kind: String,
    },
}

impl RunContext {
    /// Returns the branch run, if this is one.
    pub fn as_branch_run(&self) -> Option<&BranchRun> {
        match self {
            RunContext::BranchJobRun(run) => Some(run),
            _ => None,
        }
    }

    /// Short kind label for log output.
    pub fn kind(&self) -> &str {
        match self {
            RunContext::BranchJobRun(_) => "branch_job_run",
            RunContext::StandaloneRun(_) => "standalone_run",
            RunContext::Other { kind } => kind,
        }
    }
}

/// A run of a branch job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRun {
    /// Branch job name (usually `<project>/<branch>`)
    pub job: String,

    /// Branch name
    pub branch: String,

    /// Run number
    pub number: u32,

    /// Workspace directory allocated for the run
    pub workspace: Option<PathBuf>,

    /// Source checkout of the branch
    pub checkout: Option<Checkout>,
}

impl BranchRun {
    /// Create a branch run with no workspace or checkout.
    pub fn new(job: impl Into<String>, branch: impl Into<String>, number: u32) -> Self {
        Self {
            job: job.into(),
            branch: branch.into(),
            number,
            workspace: None,
            checkout: None,
        }
    }

    /// Set workspace.
    pub fn with_workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Set checkout.
    pub fn with_checkout(mut self, checkout: Checkout) -> Self {
        self.checkout = Some(checkout);
        self
    }
}

/// Where a branch's source was checked out from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    /// Local git repository path
    pub repository: PathBuf,

    /// Revision to read from; the branch name is used when unset
    pub revision: Option<String>,
}

impl Checkout {
    /// Create a checkout pointing at a repository.
    pub fn new(repository: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
            revision: None,
        }
    }

    /// Pin a revision.
    pub fn at(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }
}

/// A run of a standalone job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRun {
    /// Job name
    pub job: String,

    /// Run number
    pub number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_run_is_narrowed() {
        let ctx = RunContext::BranchJobRun(BranchRun::new("app/main", "main", 3));
        let run = ctx.as_branch_run().unwrap();
        assert_eq!(run.branch, "main");
        assert_eq!(ctx.kind(), "branch_job_run");
    }

    #[test]
    fn test_other_kinds_are_not_branch_runs() {
        let standalone = RunContext::StandaloneRun(JobRun { job: "deploy".into(), number: 1 });
        let other = RunContext::Other { kind: "freestyle".into() };
        assert!(standalone.as_branch_run().is_none());
        assert!(other.as_branch_run().is_none());
        assert_eq!(other.kind(), "freestyle");
    }

    #[test]
    fn test_detached_handle_has_no_executable() {
        let handle = ExecutionHandle::detached();
        assert!(handle.current_executable().is_none());
    }

    #[test]
    fn test_run_context_serializes_with_type_tag() {
        let ctx = RunContext::StandaloneRun(JobRun { job: "deploy".into(), number: 7 });
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["type"], "standalone_run");
        assert_eq!(json["job"], "deploy");
    }
}
