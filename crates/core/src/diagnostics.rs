use std::sync::Mutex;

/// Human-readable notices that are not part of an operation's result
pub trait Diagnostics: Send + Sync {
    fn notice(&self, message: &str);
}

/// Writes each notice as a line on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn notice(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Keeps notices in memory
#[derive(Debug, Default)]
pub struct RecordedDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordedDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Diagnostics for RecordedDiagnostics {
    fn notice(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
