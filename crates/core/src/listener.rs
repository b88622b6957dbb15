//! Build-log listeners.

use std::sync::Mutex;

/// Receives build-log lines for a run.
pub trait Listener: Send + Sync {
    /// Write one line to the run's log.
    fn log(&self, line: &str);
}

/// Listener that forwards lines to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl Listener for TracingListener {
    fn log(&self, line: &str) {
        tracing::info!(target: "build_log", "{}", line);
    }
}

/// Listener that keeps lines in memory.
#[derive(Debug, Default)]
pub struct BufferListener {
    lines: Mutex<Vec<String>>,
}

impl BufferListener {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Listener for BufferListener {
    fn log(&self, line: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line.to_string()),
            Err(poisoned) => poisoned.into_inner().push(line.to_string()),
        }
    }
}
