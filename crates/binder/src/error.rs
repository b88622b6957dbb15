//! Error types for definition resolution.

use mbdefaults_storage::StoreError;

/// Result type for binder operations.
pub type Result<T> = std::result::Result<T, BinderError>;

/// Errors that abort a run at start-up.
#[derive(Debug, thiserror::Error)]
pub enum BinderError {
    /// Host not ready, or the handle is not running a branch job
    #[error("inappropriate context: {0}")]
    Environment(String),

    /// No tier had the default script
    #[error("Default {id} not found. Check configuration.")]
    NotFound {
        /// Missing identifier
        id: String,
    },

    /// Config store could not be read
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Script runtime refused the script
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Errors from a script runtime.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Script text is blank
    #[error("script is empty")]
    EmptyScript,

    /// Runtime-specific failure
    #[error("{0}")]
    Other(String),
}

/// Errors from extension registration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// An extension with the same ID is already registered
    #[error("{kind} already registered: {id}")]
    Duplicate {
        /// Extension kind
        kind: &'static str,
        /// Extension ID
        id: String,
    },
}
