//! Configuration targets rendered by the host UI.

use serde::{Deserialize, Serialize};

/// The object a configuration page is being rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum ConfigTarget {
    /// A job configuration page
    Job(Job),

    /// A folder configuration page
    Folder {
        /// Folder name
        name: String,
    },

    /// Instance-wide configuration
    Global,
}

/// A job and the container it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job name
    pub name: String,

    /// Parent container kind
    pub parent: ParentKind,
}

impl Job {
    /// Create a job.
    pub fn new(name: impl Into<String>, parent: ParentKind) -> Self {
        Self {
            name: name.into(),
            parent,
        }
    }
}

/// Kind of container a job belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentKind {
    /// Top level of the instance
    Root,
    /// Plain folder
    Folder,
    /// Multibranch project
    MultiBranch(MultiBranchKind),
}

/// Flavours of multibranch project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiBranchKind {
    /// Branches carry their own script
    Standard,
    /// Branches fall back to a default script
    WithDefaults,
}

impl ConfigTarget {
    /// True for a job generated by a multibranch-with-defaults project.
    pub fn is_defaults_branch_job(&self) -> bool {
        matches!(
            self,
            ConfigTarget::Job(Job {
                parent: ParentKind::MultiBranch(MultiBranchKind::WithDefaults),
                ..
            })
        )
    }
}
