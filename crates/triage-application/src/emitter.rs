//! Notification emitter shared by the workflows.

use std::sync::Arc;

use triage_core::notification::{Notification, Notifier, Severity};

/// Builds notifications and hands them to the injected [`Notifier`].
///
/// Every notification is traced as well, so failures surfaced to the operator
/// also show up in the logs.
#[derive(Clone)]
pub struct NotificationEmitter {
    notifier: Arc<dyn Notifier>,
}

impl NotificationEmitter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Emits a notification. Errors are sticky, the rest auto-dismiss.
    pub fn notify(&self, title: &str, message: impl Into<String>, severity: Severity) {
        let notification = Notification::new(title, message, severity);
        match severity {
            Severity::Error => {
                tracing::error!("[Notification] {}: {}", notification.title, notification.message)
            }
            Severity::Warning => {
                tracing::warn!("[Notification] {}: {}", notification.title, notification.message)
            }
            Severity::Success | Severity::Info => {
                tracing::info!("[Notification] {}: {}", notification.title, notification.message)
            }
        }
        self.notifier.notify(notification);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify("Success", message, Severity::Success);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify("Warning", message, Severity::Warning);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify("Error", message, Severity::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingNotifier;
    use triage_core::notification::DismissMode;

    #[test]
    fn test_helpers_set_title_and_mode() {
        let notifier = Arc::new(RecordingNotifier::default());
        let emitter = NotificationEmitter::new(notifier.clone());

        emitter.success("saved");
        emitter.warning("careful");
        emitter.error("broken");
        emitter.notify("Heads up", "fyi", Severity::Info);

        let seen = notifier.all();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0].title, "Success");
        assert_eq!(seen[0].mode, DismissMode::Dismissable);
        assert_eq!(seen[1].severity, Severity::Warning);
        assert_eq!(seen[2].title, "Error");
        assert_eq!(seen[2].mode, DismissMode::Sticky);
        assert_eq!(seen[3].mode, DismissMode::Dismissable);
    }
}
