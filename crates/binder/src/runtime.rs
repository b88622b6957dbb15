//! Script runtime factory seam.

use mbdefaults_core::{Action, Definition, ExecutionHandle, Listener};

use crate::RuntimeError;

/// Turns script text into something that can create definitions.
pub trait ScriptRuntime: Send + Sync {
    /// Prepare a builder for `script`. `sandboxed` is passed through as given.
    fn build(&self, script: &str, sandboxed: bool) -> Box<dyn DefinitionBuilder>;
}

/// Creates the definition for one run.
pub trait DefinitionBuilder {
    /// Create the definition for `handle`.
    fn create(
        &self,
        handle: &ExecutionHandle,
        listener: &dyn Listener,
        actions: &[Action],
    ) -> Result<Definition, RuntimeError>;
}

/// Runtime that packages the script text as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptDefinitionRuntime;

impl ScriptDefinitionRuntime {
    /// Create the runtime.
    pub fn new() -> Self {
        Self
    }
}

impl ScriptRuntime for ScriptDefinitionRuntime {
    fn build(&self, script: &str, sandboxed: bool) -> Box<dyn DefinitionBuilder> {
        Box::new(ScriptBuilder {
            script: script.to_string(),
            sandboxed,
        })
    }
}

struct ScriptBuilder {
    script: String,
    sandboxed: bool,
}

impl DefinitionBuilder for ScriptBuilder {
    fn create(
        &self,
        handle: &ExecutionHandle,
        listener: &dyn Listener,
        actions: &[Action],
    ) -> Result<Definition, RuntimeError> {
        if self.script.trim().is_empty() {
            return Err(RuntimeError::EmptyScript);
        }
        listener.log(&format!(
            "Loaded default pipeline script for {} ({} sandbox)",
            handle.id,
            if self.sandboxed { "in" } else { "outside" }
        ));
        Ok(Definition::new(handle.id, self.script.clone(), self.sandboxed, actions.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbdefaults_core::{BranchRun, BufferListener, RunContext};

    fn handle() -> ExecutionHandle {
        ExecutionHandle::new(RunContext::BranchJobRun(BranchRun::new("app/main", "main", 1)))
    }

    #[test]
    fn test_builds_definition_with_forwarded_actions() {
        let handle = handle();
        let listener = BufferListener::new();
        let actions = vec![Action::new("cause", serde_json::json!({"user": "alice"}))];

        let def = ScriptDefinitionRuntime::new()
            .build("pipeline {}", true)
            .create(&handle, &listener, &actions)
            .unwrap();

        assert_eq!(def.script(), "pipeline {}");
        assert!(def.is_sandboxed());
        assert_eq!(def.handle(), handle.id);
        assert_eq!(def.actions(), actions.as_slice());
        assert_eq!(listener.lines().len(), 1);
    }

    #[test]
    fn test_sandbox_flag_is_passed_through() {
        let def = ScriptDefinitionRuntime::new()
            .build("pipeline {}", false)
            .create(&handle(), &BufferListener::new(), &[])
            .unwrap();
        assert!(!def.is_sandboxed());
    }

    #[test]
    fn test_blank_script_is_rejected() {
        let result = ScriptDefinitionRuntime::new()
            .build("  \n", true)
            .create(&handle(), &BufferListener::new(), &[]);
        assert!(matches!(result, Err(RuntimeError::EmptyScript)));
    }
}
