//! Resolved pipeline definitions.

use serde::{Deserialize, Serialize};

use crate::HandleId;

/// An action the host attaches to a run (causes, parameters, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action name
    pub name: String,

    /// Opaque payload
    pub payload: serde_json::Value,
}

impl Action {
    /// Create an action.
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// A runnable pipeline definition.
///
/// Fields are private; a definition does not change after construction.
/// Two definitions compare equal when built from the same inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    handle: HandleId,
    script: String,
    sandboxed: bool,
    actions: Vec<Action>,
}

impl Definition {
    /// Build a definition.
    pub fn new(handle: HandleId, script: impl Into<String>, sandboxed: bool, actions: Vec<Action>) -> Self {
        Self {
            handle,
            script: script.into(),
            sandboxed,
            actions,
        }
    }

    /// Handle the definition was created for.
    pub fn handle(&self) -> HandleId {
        self.handle
    }

    /// Script text.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Whether the script runs in the sandbox.
    pub fn is_sandboxed(&self) -> bool {
        self.sandboxed
    }

    /// Actions forwarded from the host.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}
