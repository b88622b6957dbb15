//! Core data model for multibranch default pipeline definitions.
//!
//! Everything here is owned by the orchestration host and handed to the
//! binder read-only: execution handles, run contexts, the configuration
//! targets a UI renders for, and the definitions handed back.

#![warn(missing_docs)]

mod id;
mod run;
mod job;
mod config;
mod definition;
mod listener;

pub use id::HandleId;
pub use run::{ExecutionHandle, RunContext, BranchRun, JobRun, Checkout};
pub use job::{ConfigTarget, Job, ParentKind, MultiBranchKind};
pub use config::{NamedConfig, ConfigOrigin, DEFAULT_SCRIPT_ID};
pub use definition::{Definition, Action};
pub use listener::{Listener, TracingListener, BufferListener};
