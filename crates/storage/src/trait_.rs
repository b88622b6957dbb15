//! Config store trait abstraction.

use mbdefaults_core::{BranchRun, NamedConfig};

/// Error type for config store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during config store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Git operation error
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Snippet is not valid UTF-8
    #[error("Config {0:?} is not valid UTF-8")]
    NotUtf8(String),

    /// Identifier cannot name a single file
    #[error("Invalid config id: {0:?}")]
    InvalidId(String),
}

/// Lookup of named configuration snippets for a run.
///
/// `Ok(None)` means the store has nothing under `id`; errors are reserved
/// for stores that could not be read.
pub trait ConfigStore: Send + Sync {
    /// Find the snippet named `id` for `run`.
    fn lookup(&self, run: &BranchRun, id: &str) -> Result<Option<NamedConfig>>;
}

/// Reject identifiers that are empty or could escape a directory.
pub fn validate_id(id: &str) -> Result<()> {
    let bad = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains('/')
        || id.contains('\\')
        || id.contains('\0');
    if bad {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(())
}
