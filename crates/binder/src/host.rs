//! Host context seam.

/// Identity of a running host instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInstance {
    /// Instance name
    pub name: String,
}

/// Access to the host instance.
pub trait HostContext: Send + Sync {
    /// The running instance, or `None` while the host is starting up or
    /// shutting down.
    fn instance(&self) -> Option<&HostInstance>;
}

/// Host context with a fixed answer.
#[derive(Debug, Clone)]
pub struct StaticHost {
    instance: Option<HostInstance>,
}

impl StaticHost {
    /// A host that is up.
    pub fn running(name: impl Into<String>) -> Self {
        Self {
            instance: Some(HostInstance { name: name.into() }),
        }
    }

    /// A host that is not usable.
    pub fn unavailable() -> Self {
        Self { instance: None }
    }
}

impl HostContext for StaticHost {
    fn instance(&self) -> Option<&HostInstance> {
        self.instance.as_ref()
    }
}
