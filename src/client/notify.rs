//! Toast Notification Collaborator
//!
//! The toast mechanism itself is outside this subsystem; the guards and the
//! ceremony orchestrator only depend on this trait. Implementations render
//! however the host UI renders.

/// User-visible, non-blocking notification sink
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);
}

/// Notifier that drops everything (headless embeddings)
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
}

/// Severity of a recorded toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// Notifier that records every toast, for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: std::sync::Mutex<Vec<(ToastLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All toasts recorded so far, in order
    pub fn toasts(&self) -> Vec<(ToastLevel, String)> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    fn record(&self, level: ToastLevel, message: &str) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push((level, message.to_string()));
        }
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.record(ToastLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.record(ToastLevel::Error, message);
    }

    fn warning(&self, message: &str) {
        self.record(ToastLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.record(ToastLevel::Info, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("one");
        notifier.error("two");

        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0], (ToastLevel::Success, "one".to_string()));
        assert_eq!(toasts[1], (ToastLevel::Error, "two".to_string()));
    }
}
