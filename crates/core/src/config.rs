//! Named configuration snippets.

use serde::{Deserialize, Serialize};

/// Identifier of the pipeline script every branch falls back to.
pub const DEFAULT_SCRIPT_ID: &str = "Jenkinsfile";

/// A configuration snippet resolved by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedConfig {
    /// Identifier
    pub id: String,

    /// Text payload
    pub content: String,

    /// Tier the snippet was found in
    pub origin: ConfigOrigin,
}

impl NamedConfig {
    /// Create a named config.
    pub fn new(id: impl Into<String>, content: impl Into<String>, origin: ConfigOrigin) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            origin,
        }
    }
}

/// Lookup tier a named config came from, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigOrigin {
    /// The branch's source checkout
    Checkout,
    /// The run's workspace directory
    Workspace,
    /// Instance-wide managed files
    Global,
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfigOrigin::Checkout => "checkout",
            ConfigOrigin::Workspace => "workspace",
            ConfigOrigin::Global => "global",
        };
        f.write_str(s)
    }
}
